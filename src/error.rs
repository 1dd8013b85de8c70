//! Error types for template parsing, rendering and loading

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::{Span, Token};

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Malformed placeholder syntax in template content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Format error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl FormatError {
    /// Byte range of the offending text
    pub fn span(&self) -> &Span {
        match self {
            FormatError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> std::io::Result<String> {
        let mut buf = Vec::new();
        match self {
            FormatError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)?;
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for FormatError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                match found.as_deref() {
                    Some(Token::BraceOpen) => format!(
                        "Unexpected {}: single braces must be escaped as '{{{{'",
                        found_str
                    ),
                    Some(Token::BraceClose) => format!(
                        "Unexpected {}: single braces must be escaped as '}}}}'",
                        found_str
                    ),
                    _ => format!("Unexpected {}", found_str),
                }
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        FormatError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::EscapedOpen => "'{{'".to_string(),
        Token::EscapedClose => "'}}'".to_string(),
        Token::Placeholder(name) => format!("placeholder '{{{}}}'", name),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::Text(_) => "text".to_string(),
    }
}

fn format_syntax_errors(errors: &[FormatError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by templates and template libraries
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template stored under this key
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// File or directory does not exist
    #[error("template file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A required argument was missing or empty
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Serialized template could not be decoded
    #[error("error parsing template from {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Template could not be serialized
    #[error("error serializing template '{name}': {message}")]
    Serialize { name: String, message: String },

    /// Malformed placeholder syntax in content
    #[error("invalid placeholder syntax: {}", format_syntax_errors(.0))]
    FormatSyntax(Vec<FormatError>),

    /// Placeholder without a substitution value
    #[error("missing value for placeholder '{field}'")]
    MissingField { field: String },

    /// Filesystem failure other than a missing file
    #[error("error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid library configuration
    #[error("invalid library configuration: {message}")]
    Config { message: String },
}

impl TemplateError {
    /// True for both missing keys and missing files
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TemplateError::NotFound { .. } | TemplateError::FileNotFound { .. }
        )
    }

    /// Map an I/O error on `path`, keeping not-found distinct
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TemplateError::FileNotFound { path }
        } else {
            TemplateError::Io { path, source }
        }
    }
}

impl From<Vec<FormatError>> for TemplateError {
    fn from(errors: Vec<FormatError>) -> Self {
        TemplateError::FormatSyntax(errors)
    }
}
