//! # indent
//!
//! Incremental indentation over a live document. [`IndentDriver`] wraps any
//! [`core_types::LineFormatter`] and caches one
//! [`core_types::BlockData`] per line, so a single-line edit usually costs a
//! single line of formatting.

mod driver;
mod error;
mod stats;

pub use driver::{IndentDriver, LineBlock, LineEdit};
pub use error::IndentError;
pub use stats::DriverStats;
