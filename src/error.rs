use indent::IndentError;
use text_buffer::BufferError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Indent(IndentError),
    Buffer(BufferError),
    UnknownLanguage(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Indent(err) => write!(f, "{err}"),
            Error::Buffer(err) => write!(f, "{err}"),
            Error::UnknownLanguage(name) => write!(f, "unknown document language {name:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Indent(err) => Some(err),
            Error::Buffer(err) => Some(err),
            Error::UnknownLanguage(_) => None,
        }
    }
}

impl From<IndentError> for Error {
    fn from(err: IndentError) -> Self {
        Error::Indent(err)
    }
}

impl From<BufferError> for Error {
    fn from(err: BufferError) -> Self {
        Error::Buffer(err)
    }
}
