//! Column arithmetic over a single line.
//!
//! Columns are visual: a tab advances to the next multiple of `tab_size`,
//! every other character counts as one column.

/// Visual column of byte `offset` in `line`.
///
/// Offsets past the end (or inside a multi-byte character) are clamped to the
/// preceding character boundary.
pub fn visual_column(line: &str, offset: usize, tab_size: usize) -> usize {
    advance_columns(line, offset, 0, tab_size)
}

/// Visual column of byte `offset` once `line` is reindented to `indent`.
///
/// Tabs after the leading whitespace are expanded from `indent`, so the
/// result does not depend on how the line is currently indented.
pub fn reindented_column(line: &str, offset: usize, indent: usize, tab_size: usize) -> usize {
    let start = leading_whitespace_len(line);
    advance_columns(&line[start..], offset.saturating_sub(start), indent, tab_size)
}

fn advance_columns(text: &str, offset: usize, mut column: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    for (i, ch) in text.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\t' {
            column += tab_size - column % tab_size;
        } else {
            column += 1;
        }
    }
    column
}

/// Byte length of the leading run of spaces and tabs.
pub fn leading_whitespace_len(line: &str) -> usize {
    line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count()
}

/// Visual column of the first non-blank character (or of the end of a blank
/// line).
pub fn indentation_columns(line: &str, tab_size: usize) -> usize {
    visual_column(line, leading_whitespace_len(line), tab_size)
}

pub fn first_non_blank(line: &str) -> Option<usize> {
    let len = leading_whitespace_len(line);
    (len < line.len()).then_some(len)
}

pub fn is_blank(line: &str) -> bool {
    first_non_blank(line).is_none()
}

/// Whitespace filling `columns` columns, using tabs for whole tab stops unless
/// `insert_spaces` is set.
pub fn indentation_string(columns: usize, tab_size: usize, insert_spaces: bool) -> String {
    if insert_spaces || tab_size == 0 {
        return " ".repeat(columns);
    }
    let mut out = "\t".repeat(columns / tab_size);
    out.push_str(&" ".repeat(columns % tab_size));
    out
}

/// `line` with its leading whitespace replaced by `columns` columns of
/// indentation. Blank lines become empty.
pub fn reindent(line: &str, columns: usize, tab_size: usize, insert_spaces: bool) -> String {
    let start = leading_whitespace_len(line);
    if start == line.len() {
        return String::new();
    }
    let mut out = indentation_string(columns, tab_size, insert_spaces);
    out.push_str(&line[start..]);
    out
}
