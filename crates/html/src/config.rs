/// Markup formatter options.
///
/// When a container option is off, the body of that container stays at the
/// indent of its start tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HtmlConfig {
    pub indent_script: bool,
    pub indent_style: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            indent_script: true,
            indent_style: true,
        }
    }
}

impl HtmlConfig {
    pub(crate) fn indents_container(&self, name: &str) -> bool {
        match crate::lexer::Embedded::from_tag_name(name) {
            Some(crate::lexer::Embedded::Script) => self.indent_script,
            Some(crate::lexer::Embedded::Style) => self.indent_style,
            None => true,
        }
    }
}
