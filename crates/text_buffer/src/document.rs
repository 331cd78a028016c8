//! In-memory document with per-line revisions.

use crate::error::BufferError;
use crate::id::LineId;
use crate::lines::TextLines;
use crate::text::{normalize_newlines, split_lines};

#[derive(Clone, Debug)]
struct Line {
    id: LineId,
    text: String,
    revision: u64,
}

/// Line-oriented text buffer.
///
/// Every edit bumps a document-wide revision counter and stamps the touched
/// lines with it, so a line's revision changes exactly when its text (or its
/// existence) changed. A document always has at least one line.
///
/// ```
/// use text_buffer::{Document, TextLines};
///
/// let mut doc = Document::from_text("a\nb");
/// let before = doc.line_revision(1);
/// doc.set_line(0, "x").unwrap();
/// assert_eq!(doc.line_text(0), Some("x"));
/// assert_eq!(doc.line_revision(1), before);
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    lines: Vec<Line>,
    next_id: u64,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let mut doc = Self {
            lines: Vec::new(),
            next_id: 0,
            revision: 0,
        };
        doc.revision = 1;
        let lines = split_lines(text)
            .into_iter()
            .map(|text| doc.make_line(text))
            .collect();
        doc.lines = lines;
        doc
    }

    /// Document-wide revision; increases with every edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Full text, lines joined with `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Replaces the text of `line`. A no-op edit keeps the revision.
    pub fn set_line(&mut self, line: usize, text: &str) -> Result<(), BufferError> {
        self.check_line(line)?;
        let text = single_line(text);
        if self.lines[line].text == text {
            return Ok(());
        }
        let revision = self.bump();
        let entry = &mut self.lines[line];
        entry.text = text;
        entry.revision = revision;
        Ok(())
    }

    /// Inserts a new line before `line` (`line == line_count()` appends).
    pub fn insert_line(&mut self, line: usize, text: &str) -> Result<LineId, BufferError> {
        if line > self.lines.len() {
            return Err(BufferError::LineOutOfRange {
                line,
                line_count: self.lines.len(),
            });
        }
        self.bump();
        let new_line = self.make_line(single_line(text));
        let id = new_line.id;
        self.lines.insert(line, new_line);
        Ok(id)
    }

    /// Removes `line`. Removing the only line leaves one empty line.
    pub fn remove_line(&mut self, line: usize) -> Result<(), BufferError> {
        self.check_line(line)?;
        self.bump();
        self.lines.remove(line);
        if self.lines.is_empty() {
            let empty = self.make_line(String::new());
            self.lines.push(empty);
        }
        Ok(())
    }

    /// Inserts `text` (which may contain newlines) at byte `offset` of `line`.
    pub fn insert_text(&mut self, line: usize, offset: usize, text: &str) -> Result<(), BufferError> {
        self.check_boundary(line, offset)?;
        let text = normalize_newlines(text);
        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or("");
        let rest: Vec<&str> = pieces.collect();

        let revision = self.bump();
        let tail = self.lines[line].text.split_off(offset);
        let entry = &mut self.lines[line];
        entry.text.push_str(first);
        entry.revision = revision;

        match rest.split_last() {
            None => self.lines[line].text.push_str(&tail),
            Some((last, middle)) => {
                let mut at = line + 1;
                for piece in middle {
                    let new_line = self.make_line((*piece).to_owned());
                    self.lines.insert(at, new_line);
                    at += 1;
                }
                let mut last_text = (*last).to_owned();
                last_text.push_str(&tail);
                let new_line = self.make_line(last_text);
                self.lines.insert(at, new_line);
            }
        }
        Ok(())
    }

    /// Removes bytes `start..end` of `line`.
    pub fn delete_text(&mut self, line: usize, start: usize, end: usize) -> Result<(), BufferError> {
        self.check_boundary(line, start)?;
        self.check_boundary(line, end)?;
        if start >= end {
            return Ok(());
        }
        let revision = self.bump();
        let entry = &mut self.lines[line];
        entry.text.replace_range(start..end, "");
        entry.revision = revision;
        Ok(())
    }

    /// Splits `line` at byte `offset`, as pressing Enter would.
    pub fn split_line(&mut self, line: usize, offset: usize) -> Result<LineId, BufferError> {
        self.check_boundary(line, offset)?;
        let revision = self.bump();
        let tail = self.lines[line].text.split_off(offset);
        self.lines[line].revision = revision;
        let new_line = self.make_line(tail);
        let id = new_line.id;
        self.lines.insert(line + 1, new_line);
        Ok(id)
    }

    /// Appends the next line to `line` and removes it.
    pub fn join_lines(&mut self, line: usize) -> Result<(), BufferError> {
        self.check_line(line)?;
        self.check_line(line + 1)?;
        let revision = self.bump();
        let next = self.lines.remove(line + 1);
        let entry = &mut self.lines[line];
        entry.text.push_str(&next.text);
        entry.revision = revision;
        Ok(())
    }

    fn make_line(&mut self, text: String) -> Line {
        let id = LineId::from_raw(self.next_id);
        self.next_id += 1;
        Line {
            id,
            text,
            revision: self.revision,
        }
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        log::trace!(target: "text_buffer", "revision {}", self.revision);
        self.revision
    }

    fn check_line(&self, line: usize) -> Result<(), BufferError> {
        if line < self.lines.len() {
            Ok(())
        } else {
            Err(BufferError::LineOutOfRange {
                line,
                line_count: self.lines.len(),
            })
        }
    }

    fn check_boundary(&self, line: usize, offset: usize) -> Result<(), BufferError> {
        self.check_line(line)?;
        if self.lines[line].text.is_char_boundary(offset) {
            Ok(())
        } else {
            Err(BufferError::NotCharBoundary { line, offset })
        }
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

impl TextLines for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| l.text.as_str())
    }

    fn line_revision(&self, line: usize) -> Option<u64> {
        self.lines.get(line).map(|l| l.revision)
    }

    fn line_id(&self, line: usize) -> Option<LineId> {
        self.lines.get(line).map(|l| l.id)
    }
}
