//! Markup scanner and indentation automaton.
//!
//! The markup language hosts the others: `<style>` and `<script>` bodies are
//! lexed and indented by the style and script crates, and `<?php ... ?>`
//! regions by the server-script crate, all on one shared state stack.

pub mod config;
pub mod elements;
pub mod formatter;
pub mod lexer;
pub mod scanner;

pub use config::HtmlConfig;
pub use formatter::{HtmlAutomaton, HtmlFormatter, HtmlKind, MarkupKind};
pub use lexer::{Embedded, HtmlConstruct, HtmlLexState};
pub use scanner::HtmlScanner;
