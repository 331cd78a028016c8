#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferError {
    LineOutOfRange { line: usize, line_count: usize },
    NotCharBoundary { line: usize, offset: usize },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::LineOutOfRange { line, line_count } => {
                write!(f, "line {line} out of range (document has {line_count} lines)")
            }
            BufferError::NotCharBoundary { line, offset } => {
                write!(f, "offset {offset} in line {line} is not a character boundary")
            }
        }
    }
}

impl std::error::Error for BufferError {}
