//! # text_buffer
//!
//! Line-oriented stand-in for the host editor's buffer.
//!
//! - [`LineId`]: stable identity of a line, unaffected by insertions above it
//! - [`Document`]: lines with per-line edit revisions
//! - [`TextLines`]: the read-only view the incremental driver consumes
//! - [`SideTable`]: per-line storage keyed by [`LineId`]

mod document;
mod error;
mod id;
mod lines;
mod side_table;
mod text;

pub use document::Document;
pub use error::BufferError;
pub use id::LineId;
pub use lines::TextLines;
pub use side_table::SideTable;
pub use text::{normalize_newlines, split_lines};
