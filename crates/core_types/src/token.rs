//! Token model shared by every scanner.

use crate::Language;

/// Lexical classification of a token.
///
/// One vocabulary serves all languages; each scanner only produces the subset
/// relevant to it. Structural keywords of the C-like scripts get their own
/// variants so formatters can match on them without re-reading token text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Generic lexemes.
    Identifier,
    Keyword,
    Number,
    String,
    TemplateString,
    RegExp,
    Comment,
    Operator,
    Delimiter,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Question,
    Arrow,
    Assign,
    Increment,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Text,
    Unknown,

    // Structural keywords (script and server-script).
    If,
    Else,
    ElseIf,
    For,
    Foreach,
    While,
    Do,
    Switch,
    Case,
    Default,
    Try,
    Catch,
    Finally,
    Function,
    Class,
    Return,
    Throw,
    Break,
    Continue,
    Var,
    /// `endif`, `endwhile`, `endfor`, `endforeach`, `endswitch`, `enddeclare`.
    EndKeyword,

    // Script template markers.
    /// `${` inside a template literal.
    TemplateExpressionOpen,
    /// The `}` closing a template expression.
    TemplateExpressionClose,
    /// `<` opening a generic parameter/argument list.
    GenericOpen,
    /// `>` closing a generic parameter/argument list.
    GenericClose,

    // Markup.
    /// `<` of a start tag.
    TagOpen,
    /// `</` of an end tag.
    EndTagOpen,
    /// `>` closing a start or end tag.
    TagClose,
    /// `/>` closing a self-closing tag.
    SelfClosingTagClose,
    TagName,
    AttributeName,
    AttributeValue,
    /// `<!--`
    CommentOpen,
    /// `-->`
    CommentClose,
    /// `<!DOCTYPE ...>` and other `<!` declarations.
    Doctype,
    EntityReference,

    // Server-script.
    /// `<?php`, `<?=` or a bare `<?`.
    ServerScriptOpen,
    /// `?>`
    ServerScriptClose,
    /// `$name`
    Variable,
    HeredocStart,
    HeredocEnd,

    // Style.
    Selector,
    AtRule,
    PropertyName,
    /// `!important`
    Important,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::CommentOpen | TokenKind::CommentClose
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::ElseIf
                | TokenKind::For
                | TokenKind::Foreach
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Function
                | TokenKind::Class
                | TokenKind::Return
                | TokenKind::Throw
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Var
                | TokenKind::EndKeyword
        )
    }

    pub fn is_string_like(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::TemplateString
                | TokenKind::AttributeValue
                | TokenKind::HeredocStart
                | TokenKind::HeredocEnd
        )
    }

    /// Tokens after which an operand (not an operator) is complete.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::TemplateString
                | TokenKind::RegExp
                | TokenKind::Variable
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightBrace
                | TokenKind::GenericClose
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::TemplateString => "TemplateString",
            TokenKind::RegExp => "RegExp",
            TokenKind::Comment => "Comment",
            TokenKind::Operator => "Operator",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Colon => "Colon",
            TokenKind::Comma => "Comma",
            TokenKind::Dot => "Dot",
            TokenKind::Question => "Question",
            TokenKind::Arrow => "Arrow",
            TokenKind::Assign => "Assign",
            TokenKind::Increment => "Increment",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::Text => "Text",
            TokenKind::Unknown => "Unknown",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::ElseIf => "ElseIf",
            TokenKind::For => "For",
            TokenKind::Foreach => "Foreach",
            TokenKind::While => "While",
            TokenKind::Do => "Do",
            TokenKind::Switch => "Switch",
            TokenKind::Case => "Case",
            TokenKind::Default => "Default",
            TokenKind::Try => "Try",
            TokenKind::Catch => "Catch",
            TokenKind::Finally => "Finally",
            TokenKind::Function => "Function",
            TokenKind::Class => "Class",
            TokenKind::Return => "Return",
            TokenKind::Throw => "Throw",
            TokenKind::Break => "Break",
            TokenKind::Continue => "Continue",
            TokenKind::Var => "Var",
            TokenKind::EndKeyword => "EndKeyword",
            TokenKind::TemplateExpressionOpen => "TemplateExpressionOpen",
            TokenKind::TemplateExpressionClose => "TemplateExpressionClose",
            TokenKind::GenericOpen => "GenericOpen",
            TokenKind::GenericClose => "GenericClose",
            TokenKind::TagOpen => "TagOpen",
            TokenKind::EndTagOpen => "EndTagOpen",
            TokenKind::TagClose => "TagClose",
            TokenKind::SelfClosingTagClose => "SelfClosingTagClose",
            TokenKind::TagName => "TagName",
            TokenKind::AttributeName => "AttributeName",
            TokenKind::AttributeValue => "AttributeValue",
            TokenKind::CommentOpen => "CommentOpen",
            TokenKind::CommentClose => "CommentClose",
            TokenKind::Doctype => "Doctype",
            TokenKind::EntityReference => "EntityReference",
            TokenKind::ServerScriptOpen => "ServerScriptOpen",
            TokenKind::ServerScriptClose => "ServerScriptClose",
            TokenKind::Variable => "Variable",
            TokenKind::HeredocStart => "HeredocStart",
            TokenKind::HeredocEnd => "HeredocEnd",
            TokenKind::Selector => "Selector",
            TokenKind::AtRule => "AtRule",
            TokenKind::PropertyName => "PropertyName",
            TokenKind::Important => "Important",
        }
    }
}

/// Classified span of one line.
///
/// Invariant: `offset` and `offset + length` are UTF-8 boundaries of the line
/// the token was produced from; tokens of a line are offset-ordered and do
/// not overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub offset: usize,
    pub length: usize,
    pub kind: TokenKind,
    pub language: Language,
}

impl Token {
    pub fn new(offset: usize, length: usize, kind: TokenKind, language: Language) -> Self {
        Self {
            offset,
            length,
            kind,
            language,
        }
    }

    pub fn end(self) -> usize {
        self.offset + self.length
    }

    pub fn is(self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Text of this token within `line`; empty if the span does not fit.
    pub fn text(self, line: &str) -> &str {
        line.get(self.offset..self.end()).unwrap_or("")
    }
}
