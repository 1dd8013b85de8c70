//! Placeholder substitution over parsed segments

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, TemplateError};
use crate::parser::{self, Segment, Spanned};

/// Substitute every field in `segments` from `inputs`.
///
/// Inputs not referenced by any field are ignored. Fails on the first field
/// (in content order) without a value; nothing is returned in that case.
pub fn render_segments(
    segments: &[Spanned<Segment>],
    inputs: &HashMap<String, String>,
) -> Result<String> {
    let mut out = String::new();
    for segment in segments {
        match &segment.node {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field(name) => {
                let value = inputs
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingField {
                        field: name.clone(),
                    })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

/// Distinct field names in lexicographic order
pub fn field_names(segments: &[Spanned<Segment>]) -> Vec<String> {
    segments
        .iter()
        .filter_map(|s| s.node.field_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Render raw content with the given inputs
pub fn render(content: &str, inputs: &HashMap<String, String>) -> Result<String> {
    let segments = parser::parse(content)?;
    render_segments(&segments, inputs)
}
