//! Golden indentation fixtures.
//!
//! A fixture is a directory holding `input` (the document as typed),
//! `expected` (the document after reindenting every line) and `config.toml`:
//!
//! ```toml
//! language = "html"
//! indent_size = 2
//! indent_script = false
//! ```

use core_types::IndentConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum FixtureError {
    Io { path: PathBuf, message: String },
    Config { path: PathBuf, message: String },
    Empty { path: PathBuf },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            FixtureError::Config { path, message } => {
                write!(f, "invalid fixture config {}: {message}", path.display())
            }
            FixtureError::Empty { path } => {
                write!(f, "no fixtures under {}", path.display())
            }
        }
    }
}

impl std::error::Error for FixtureError {}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Document language name (`html`, `php`, `css`, `js`, `jsx`, `tsx`).
    pub language: String,
    #[serde(default = "default_width")]
    pub tab_size: usize,
    #[serde(default = "default_width")]
    pub indent_size: usize,
    #[serde(default = "default_true")]
    pub insert_spaces: bool,
    #[serde(default = "default_true")]
    pub indent_script: bool,
    #[serde(default = "default_true")]
    pub indent_style: bool,
}

fn default_width() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl FixtureConfig {
    pub fn indent_config(&self) -> IndentConfig {
        IndentConfig {
            tab_size: self.tab_size,
            indent_size: self.indent_size,
            insert_spaces: self.insert_spaces,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fixture {
    pub name: String,
    pub dir: PathBuf,
    pub input: String,
    pub expected: String,
    pub config: FixtureConfig,
}

impl Fixture {
    pub fn expected_lines(&self) -> Vec<String> {
        self.expected.lines().map(str::to_string).collect()
    }
}

pub fn load_fixture(dir: &Path) -> Result<Fixture, FixtureError> {
    let config_path = dir.join("config.toml");
    let config = toml::from_str(&read(&config_path)?).map_err(|err| FixtureError::Config {
        path: config_path.clone(),
        message: err.to_string(),
    })?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Fixture {
        name,
        dir: dir.to_path_buf(),
        input: read(&dir.join("input"))?,
        expected: read(&dir.join("expected"))?,
        config,
    })
}

/// Every fixture directory directly under `root`, sorted by name.
pub fn load_fixtures(root: &Path) -> Result<Vec<Fixture>, FixtureError> {
    let entries = fs::read_dir(root).map_err(|err| io_error(root, err))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| io_error(root, err))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    if dirs.is_empty() {
        return Err(FixtureError::Empty {
            path: root.to_path_buf(),
        });
    }
    dirs.iter().map(|dir| load_fixture(dir)).collect()
}

fn read(path: &Path) -> Result<String, FixtureError> {
    let text = fs::read_to_string(path).map_err(|err| io_error(path, err))?;
    Ok(text.replace("\r\n", "\n"))
}

fn io_error(path: &Path, err: std::io::Error) -> FixtureError {
    FixtureError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
