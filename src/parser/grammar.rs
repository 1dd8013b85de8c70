//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::{is_identifier, Segment, Spanned};
use crate::parser::lexer::Token;

/// Parse template content into literal and field segments
///
/// Placeholder names are checked after parsing so that every invalid name
/// is reported, not only the first.
pub fn parse(input: &str) -> Result<Vec<Spanned<Segment>>, Vec<crate::FormatError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let segments = content_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect::<Vec<_>>())?;

    let errors: Vec<crate::FormatError> = segments
        .iter()
        .filter_map(|s| match &s.node {
            Segment::Field(name) if !is_identifier(name) => {
                Some(invalid_placeholder(name, s.span.clone()))
            }
            _ => None,
        })
        .collect();

    if errors.is_empty() {
        Ok(segments)
    } else {
        Err(errors)
    }
}

fn invalid_placeholder(name: &str, span: std::ops::Range<usize>) -> crate::FormatError {
    let message = if name.is_empty() {
        "empty placeholder '{}': positional fields are not supported".to_string()
    } else {
        format!(
            "'{}' is not a valid placeholder name: use letters, digits and '_', not starting with a digit",
            name
        )
    };
    crate::FormatError::Syntax {
        span,
        message,
        expected: vec!["identifier".to_string()],
    }
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn content_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Spanned<Segment>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let literal = select! {
        Token::Text(s) => Segment::Literal(s),
        Token::EscapedOpen => Segment::Literal("{".to_string()),
        Token::EscapedClose => Segment::Literal("}".to_string()),
    };

    let field = select! {
        Token::Placeholder(name) => Segment::Field(name),
    };

    choice((literal, field))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}
