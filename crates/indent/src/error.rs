#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentError {
    LineOutOfRange { line: usize, line_count: usize },
}

impl std::fmt::Display for IndentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndentError::LineOutOfRange { line, line_count } => {
                write!(f, "line {line} out of range (document has {line_count} lines)")
            }
        }
    }
}

impl std::error::Error for IndentError {}
