/// Source language a token was produced by.
///
/// A markup line can carry tokens of several languages at once (an inline
/// `<script>` body, a server-script island inside an attribute value, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    None,
    Markup,
    Script,
    Style,
    ServerScript,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::None => "none",
            Language::Markup => "markup",
            Language::Script => "script",
            Language::Style => "style",
            Language::ServerScript => "server-script",
        }
    }
}
