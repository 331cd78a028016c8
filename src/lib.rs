//! # polyindent
//!
//! Incremental lexing and indentation for markup documents with embedded
//! style, script and server-script regions, and for standalone style and
//! script files.
//!
//! - [`Indenter`]: one document's formatter plus its per-line cache
//! - [`DocumentLanguage`]: picks the formatter
//! - [`reindent_text`]: one-shot reindent of a whole text
//!
//! The per-language crates (`html`, `css`, `js`, `php`) can also be used on
//! their own through [`indent::IndentDriver`].

mod error;
mod indenter;
mod language;

pub use error::Error;
pub use indenter::{Indenter, Options, apply_edits, reindent_text};
pub use language::DocumentLanguage;

pub use core_types::{IndentConfig, Language, Token, TokenKind};
pub use html::HtmlConfig;
pub use indent::{DriverStats, IndentError, LineEdit};
pub use js::Dialect;
pub use text_buffer::{BufferError, Document, LineId, TextLines};
