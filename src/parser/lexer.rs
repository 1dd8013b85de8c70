//! Lexer for placeholder content using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Tokens of the placeholder grammar.
///
/// Matching is longest-first, so `{{` wins over `{` and a complete `{name}`
/// wins over a lone brace. Everything that is not a brace is literal text.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Escaped braces (longer patterns first)
    #[token("{{")]
    EscapedOpen,
    #[token("}}")]
    EscapedClose,

    /// Braced placeholder body, braces stripped. Validated by the grammar.
    #[regex(r"\{[^{}]*\}", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Placeholder(String),

    // Unbalanced braces
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    #[regex(r"[^{}]+", |lex| lex.slice().to_string())]
    Text(String),
}

/// Lex content into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
