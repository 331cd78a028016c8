//! Script scanner and indentation automaton for plain, element-aware and
//! typed script dialects.

pub mod config;
pub mod formatter;
mod keywords;
pub mod lexer;
pub mod scanner;

pub use config::{Dialect, JsConfig};
pub use formatter::{JsAutomaton, JsFormatter, JsKind};
pub use lexer::{JsConstruct, JsLexState, JsxMode};
pub use scanner::JsScanner;
