//! Parsed representation of template content

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// One piece of template content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied through unchanged (escaped braces already unescaped)
    Literal(String),
    /// A `{name}` substitution point
    Field(String),
}

impl Segment {
    /// Field name, if this segment is a placeholder
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Segment::Field(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

/// Valid placeholder name (Unicode alphanumeric + underscore, starts with letter/_)
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
