use core_types::Token;

/// One line per token: `language Kind "text"`.
pub fn format_tokens(line: &str, tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{} {} {:?}",
                t.language.as_str(),
                t.kind.as_str(),
                t.text(line)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::format_tokens;
    use core_types::{Language, Token, TokenKind};

    #[test]
    fn snapshot_lines() {
        let line = "<p>\"x\"";
        let tokens = [
            Token::new(0, 1, TokenKind::TagOpen, Language::Markup),
            Token::new(3, 3, TokenKind::Text, Language::Markup),
        ];
        assert_eq!(
            format_tokens(line, &tokens),
            vec![
                "markup TagOpen \"<\"".to_string(),
                "markup Text \"\\\"x\\\"\"".to_string(),
            ]
        );
    }
}
