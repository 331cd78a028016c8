pub mod formatter;
pub mod lexer;
pub mod scanner;

// Re-exports so the markup host can embed the style language directly.
pub use formatter::{CssAutomaton, CssFormatter, CssKind};
pub use lexer::{CssConstruct, CssLexState};
pub use scanner::CssScanner;
