//! Server-script scanner and indentation automaton.
//!
//! The scanner handles both standalone files, where text outside `<?php ?>`
//! is passed through as markup text, and regions embedded in a markup host,
//! where it stops at the close bracket and hands control back.

pub mod formatter;
mod keywords;
pub mod lexer;
pub mod scanner;

pub use formatter::{PhpAutomaton, PhpFormatter, PhpKind};
pub use lexer::{PhpConstruct, PhpLexState};
pub use scanner::PhpScanner;
