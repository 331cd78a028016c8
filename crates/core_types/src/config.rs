/// Indentation settings supplied by the host editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndentConfig {
    /// Visual width of a tab character.
    pub tab_size: usize,
    /// Columns per indentation level.
    pub indent_size: usize,
    /// Produce spaces only when re-indenting; otherwise fill with tabs.
    pub insert_spaces: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            indent_size: 4,
            insert_spaces: true,
        }
    }
}

impl IndentConfig {
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            indent_size,
            ..Self::default()
        }
    }

    /// One indentation level in columns.
    #[inline]
    pub fn unit(&self) -> i32 {
        i32::try_from(self.indent_size).unwrap_or(i32::MAX)
    }

    /// Whitespace that fills `columns` visual columns.
    pub fn indentation(&self, columns: i32) -> String {
        tools::text::indentation_string(columns.max(0) as usize, self.tab_size, self.insert_spaces)
    }
}

#[cfg(test)]
mod tests {
    use super::IndentConfig;

    #[test]
    fn default_is_four_spaces() {
        let config = IndentConfig::default();
        assert_eq!(config.unit(), 4);
        assert_eq!(config.indentation(8), "        ");
    }

    #[test]
    fn tabs_fill_whole_stops_first() {
        let config = IndentConfig {
            tab_size: 4,
            indent_size: 2,
            insert_spaces: false,
        };
        assert_eq!(config.unit(), 2);
        assert_eq!(config.indentation(6), "\t  ");
        assert_eq!(config.indentation(-3), "");
    }
}
