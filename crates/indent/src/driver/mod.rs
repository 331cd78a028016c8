//! Incremental driver.
//!
//! Every line gets a [`BlockData`] entry keyed by its [`LineId`]. A query for
//! line `n` walks from the first line with the formatter's root state,
//! accepting cached entries while they are still valid, and recomputes from
//! the first stale line through `n`. Lines after `n` are left alone: their
//! entries become stale lazily, when the walk finds that their begin state no
//! longer matches the end state of the line above.

use crate::error::IndentError;
use crate::stats::DriverStats;
use core_types::{BlockData, LineFormatter, LineState, Token};
use std::collections::HashSet;
use std::ops::Range;
use text_buffer::{LineId, SideTable, TextLines};

#[cfg(test)]
mod tests;

pub type LineBlock<F> = BlockData<<F as LineFormatter>::Kind, <F as LineFormatter>::Lexer>;
type Begin<F> = LineState<<F as LineFormatter>::Kind, <F as LineFormatter>::Lexer>;

/// Replacement text for one line produced by [`IndentDriver::reindent_lines`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineEdit {
    pub line: usize,
    pub text: String,
}

/// Owns one formatter and the per-line cache of one document.
pub struct IndentDriver<F: LineFormatter> {
    formatter: F,
    cache: SideTable<LineBlock<F>>,
    stats: DriverStats,
}

impl<F: LineFormatter> IndentDriver<F> {
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            cache: SideTable::new(),
            stats: DriverStats::default(),
        }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Swaps the formatter (for a new configuration, say) and drops every
    /// cached line.
    pub fn set_formatter(&mut self, formatter: F) {
        self.formatter = formatter;
        self.invalidate_all();
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = DriverStats::default();
    }

    /// Number of lines with a cache entry, valid or not.
    pub fn cached_lines(&self) -> usize {
        self.cache.len()
    }

    /// Brings the cache of lines `0..=target` up to date.
    pub fn update_state_until(
        &mut self,
        doc: &impl TextLines,
        target: usize,
    ) -> Result<(), IndentError> {
        check_line(doc, target)?;
        let mut previous_end = self.formatter.initial_state();
        let mut first_recomputed = None;
        for line in 0..=target {
            let (id, revision, text) = line_info(doc, line)?;
            if let Some(block) = self.cache.get(id)
                && block.is_valid_for(revision, &previous_end)
            {
                self.stats.cache_hits += 1;
                previous_end.clone_from(&block.end);
                continue;
            }
            if first_recomputed.is_none() {
                log::trace!(target: "indent.driver", "recomputing lines {line}..={target}");
                first_recomputed = Some(line);
            }
            let block = self.recompute(text, revision, previous_end);
            previous_end = block.end.clone();
            self.cache.insert(id, block);
        }
        if first_recomputed.is_some() {
            self.invalidate_if_stale(doc, target + 1, &previous_end);
        }
        Ok(())
    }

    /// Recomputes `line` alone, after an edit confined to it. Returns whether
    /// its end state changed; if so the next line's entry is marked stale.
    pub fn update_line_state_change(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<bool, IndentError> {
        check_line(doc, line)?;
        let begin = match line.checked_sub(1) {
            None => self.formatter.initial_state(),
            Some(previous) => {
                self.update_state_until(doc, previous)?;
                self.cached(doc, previous)?.end.clone()
            }
        };
        let (id, revision, text) = line_info(doc, line)?;
        let old_end = self.cache.get(id).map(|block| block.end.clone());
        let block = self.recompute(text, revision, begin);
        let changed = old_end.as_ref() != Some(&block.end);
        if changed {
            log::trace!(target: "indent.driver", "end state of line {line} changed");
            self.invalidate_if_stale(doc, line + 1, &block.end);
        }
        self.cache.insert(id, block);
        Ok(changed)
    }

    /// Indent column of `line`.
    pub fn indent_for(&mut self, doc: &impl TextLines, line: usize) -> Result<i32, IndentError> {
        self.update_state_until(doc, line)?;
        Ok(self.cached(doc, line)?.line_indent)
    }

    /// Indent an empty line inserted after `line` would get.
    pub fn indent_for_new_line_after(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<i32, IndentError> {
        self.update_state_until(doc, line)?;
        let end = &self.cached(doc, line)?.end;
        Ok(self.formatter.indent_for_new_line_after(end))
    }

    /// Tokens of `line`, lexed from its cached begin state.
    pub fn tokens_for(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<Vec<Token>, IndentError> {
        self.update_state_until(doc, line)?;
        let (_, _, text) = line_info(doc, line)?;
        let mut lexer = self.cached(doc, line)?.begin.lexer_state.clone();
        Ok(self.formatter.tokenize(text, &mut lexer))
    }

    pub fn block_data(
        &mut self,
        doc: &impl TextLines,
        line: usize,
    ) -> Result<&LineBlock<F>, IndentError> {
        self.update_state_until(doc, line)?;
        self.cached(doc, line)
    }

    /// Edits that give every line in `lines` its computed indent. Lines that
    /// already have it are skipped; blank lines lose their whitespace.
    pub fn reindent_lines(
        &mut self,
        doc: &impl TextLines,
        lines: Range<usize>,
    ) -> Result<Vec<LineEdit>, IndentError> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        self.update_state_until(doc, lines.end - 1)?;
        let config = *self.formatter.config();
        let mut edits = Vec::new();
        for line in lines {
            let indent = self.cached(doc, line)?.line_indent;
            let (_, _, text) = line_info(doc, line)?;
            let columns = usize::try_from(indent).unwrap_or(0);
            let reindented =
                tools::text::reindent(text, columns, config.tab_size, config.insert_spaces);
            if reindented != text {
                edits.push(LineEdit {
                    line,
                    text: reindented,
                });
            }
        }
        log::debug!(target: "indent.driver", "{} lines need reindenting", edits.len());
        Ok(edits)
    }

    /// Drops the entries of lines no longer in `doc`; returns how many.
    pub fn prune(&mut self, doc: &impl TextLines) -> usize {
        let alive: HashSet<LineId> = (0..doc.line_count())
            .filter_map(|line| doc.line_id(line))
            .collect();
        self.cache.retain_lines(|id| alive.contains(&id))
    }

    pub fn invalidate_all(&mut self) {
        self.stats.invalidations += self.cache.len() as u64;
        self.cache.clear();
    }

    fn recompute(&mut self, text: &str, revision: u64, begin: Begin<F>) -> LineBlock<F> {
        let outcome = self.formatter.format_line(text, &begin);
        self.stats.lines_recomputed += 1;
        BlockData {
            revision,
            begin,
            end: outcome.end,
            line_indent: outcome.line_indent,
            lexer_state_valid: true,
        }
    }

    // Marks `line`'s entry stale if it was computed from a different state.
    fn invalidate_if_stale(&mut self, doc: &impl TextLines, line: usize, end: &Begin<F>) {
        let Some(id) = doc.line_id(line) else {
            return;
        };
        if let Some(block) = self.cache.get_mut(id)
            && block.lexer_state_valid
            && block.begin != *end
        {
            log::trace!(target: "indent.driver", "line {line} invalidated");
            block.invalidate();
            self.stats.invalidations += 1;
        }
    }

    fn cached(&self, doc: &impl TextLines, line: usize) -> Result<&LineBlock<F>, IndentError> {
        doc.line_id(line)
            .and_then(|id| self.cache.get(id))
            .ok_or(IndentError::LineOutOfRange {
                line,
                line_count: doc.line_count(),
            })
    }
}

fn check_line(doc: &impl TextLines, line: usize) -> Result<(), IndentError> {
    let line_count = doc.line_count();
    if line < line_count {
        Ok(())
    } else {
        Err(IndentError::LineOutOfRange { line, line_count })
    }
}

fn line_info(doc: &impl TextLines, line: usize) -> Result<(LineId, u64, &str), IndentError> {
    let out_of_range = IndentError::LineOutOfRange {
        line,
        line_count: doc.line_count(),
    };
    let id = doc.line_id(line).ok_or(out_of_range)?;
    let revision = doc.line_revision(line).ok_or(out_of_range)?;
    let text = doc.line_text(line).ok_or(out_of_range)?;
    Ok((id, revision, text))
}
