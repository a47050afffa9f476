//! Lexer for stylesheet text using logos
//!
//! Only the tokens that decide rule boundaries are distinguished. Everything
//! else is lumped into `Text`, and the byte spans are kept so the parser can
//! slice the original source back out verbatim.

use logos::Logos;

/// Token types for rule-level CSS structure
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    Comment,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    #[regex(r"@-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    AtKeyword,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,

    #[regex(r#"[^ \t\r\n\x0C{};@"'/]+"#)]
    Text,

    // Lone characters that only matter as the start of a longer token
    #[token("/")]
    #[token("@")]
    Delim,

    /// Input the lexer could not match (unterminated strings or comments).
    /// Never produced by logos itself; `lex` maps lexer errors onto it.
    Error,
}

impl Token {
    /// Whitespace and comments
    pub fn is_trivia(self) -> bool {
        matches!(self, Token::Whitespace | Token::Comment)
    }
}

/// Span information for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: TokenSpan,
}

/// Lex stylesheet text into tokens with spans.
///
/// The spans of the returned tokens cover the input without gaps.
pub fn lex(source: &str) -> Vec<SpannedToken> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| SpannedToken {
            token: result.unwrap_or(Token::Error),
            span: TokenSpan {
                start: span.start,
                end: span.end,
            },
        })
        .collect()
}
