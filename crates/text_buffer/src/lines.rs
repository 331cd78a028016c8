//! Read-only line access consumed by the incremental driver.

use crate::id::LineId;

/// The host editor abstraction: a sequence of lines, each with text, a
/// monotonically increasing edit revision and a stable identity.
///
/// Neighbouring lines are reached by index; `line + 1` is the next line.
pub trait TextLines {
    fn line_count(&self) -> usize;

    fn line_text(&self, line: usize) -> Option<&str>;

    /// Revision of the last edit that touched `line`.
    fn line_revision(&self, line: usize) -> Option<u64>;

    fn line_id(&self, line: usize) -> Option<LineId>;

    fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

impl<T: TextLines + ?Sized> TextLines for &T {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        (**self).line_text(line)
    }

    fn line_revision(&self, line: usize) -> Option<u64> {
        (**self).line_revision(line)
    }

    fn line_id(&self, line: usize) -> Option<LineId> {
        (**self).line_id(line)
    }
}
