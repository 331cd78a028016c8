use crate::error::Error;
use std::path::Path;
use std::str::FromStr;

/// Kind of document an [`crate::Indenter`] is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentLanguage {
    Html,
    /// Markup with server-script islands; also covers plain markup.
    Php,
    /// Server-script file whose text outside `<?php ?>` keeps its indent.
    PhpScript,
    Css,
    Js,
    Jsx,
    Tsx,
}

impl DocumentLanguage {
    pub const ALL: [DocumentLanguage; 7] = [
        DocumentLanguage::Html,
        DocumentLanguage::Php,
        DocumentLanguage::PhpScript,
        DocumentLanguage::Css,
        DocumentLanguage::Js,
        DocumentLanguage::Jsx,
        DocumentLanguage::Tsx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentLanguage::Html => "html",
            DocumentLanguage::Php => "php",
            DocumentLanguage::PhpScript => "php-script",
            DocumentLanguage::Css => "css",
            DocumentLanguage::Js => "js",
            DocumentLanguage::Jsx => "jsx",
            DocumentLanguage::Tsx => "tsx",
        }
    }

    /// Accepts the canonical names plus a few common aliases, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let language = match name.as_str() {
            "html" | "htm" | "xhtml" => DocumentLanguage::Html,
            "php" | "phtml" => DocumentLanguage::Php,
            "php-script" => DocumentLanguage::PhpScript,
            "css" => DocumentLanguage::Css,
            "js" | "javascript" | "mjs" | "cjs" => DocumentLanguage::Js,
            "jsx" | "javascriptreact" => DocumentLanguage::Jsx,
            "tsx" | "typescriptreact" => DocumentLanguage::Tsx,
            _ => return None,
        };
        Some(language)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_name(ext)
    }
}

impl std::fmt::Display for DocumentLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}
