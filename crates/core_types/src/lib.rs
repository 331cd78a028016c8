//! Shared vocabulary for the per-language scanners and formatters.
//!
//! Everything that crosses a crate boundary lives here: the token model, the
//! formatter state stack, the per-line cache entry and the traits the
//! incremental driver is generic over.

mod block;
mod config;
mod formatter;
mod language;
mod scanner;
mod state;
mod token;

pub use block::{BlockData, LineState};
pub use config::IndentConfig;
pub use formatter::{Flow, FormatterCore, LineFormatter, LineOutcome, MAX_REPROCESS_PER_TOKEN};
pub use language::Language;
pub use scanner::{Quote, Scanner};
pub use state::{Embeds, State, StateKind, StateStack};
pub use token::{Token, TokenKind};
