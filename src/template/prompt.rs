//! Message templates and the chat messages they render to

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::render::{field_names, render_segments};
use crate::error::{Result, TemplateError};
use crate::parser::{self, Segment, Spanned};

/// Role assigned when none is given
pub const DEFAULT_ROLE: &str = "user";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// A rendered chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub role: String,
}

/// A named, role-tagged piece of text with `{field}` placeholders.
///
/// Serialized as `{"content": ..., "name": ..., "role": ...}`; on input
/// `name` defaults to `""` and `role` to `"user"`, and unknown keys are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    content: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_role")]
    role: String,
}

/// Same shape as [`Template`], rejecting keys it does not know
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StrictTemplate {
    content: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_role")]
    role: String,
}

impl From<StrictTemplate> for Template {
    fn from(t: StrictTemplate) -> Self {
        Self {
            content: t.content,
            name: t.name,
            role: t.role,
        }
    }
}

impl Template {
    /// Create an unnamed template with the default role
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: String::new(),
            role: default_role(),
        }
    }

    /// Set the template name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the message role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Parsed content
    pub fn segments(&self) -> Result<Vec<Spanned<Segment>>> {
        Ok(parser::parse(&self.content)?)
    }

    /// Render the content with `inputs` into a chat message
    pub fn message(&self, inputs: &HashMap<String, String>) -> Result<Message> {
        let content = render_segments(&self.segments()?, inputs)?;
        Ok(Message {
            content,
            role: self.role.clone(),
        })
    }

    /// Sorted, distinct placeholder names referenced by the content
    pub fn inputs(&self) -> Result<Vec<String>> {
        Ok(field_names(&self.segments()?))
    }

    /// Compact JSON form, as written by [`Template::save`]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TemplateError::Serialize {
            name: self.name.clone(),
            message: e.to_string(),
        })
    }

    /// Write the template as JSON, overwriting any existing file.
    ///
    /// Without a filename (or with an empty one) the path is `<name>.json`
    /// in the current directory, which requires a non-empty name. Parent
    /// directories are not created. Returns the path written.
    pub fn save(&self, filename: Option<&Path>) -> Result<PathBuf> {
        let path = match filename {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => {
                if self.name.is_empty() {
                    return Err(TemplateError::InvalidArgument {
                        message: "Name must be provided to save the template.".to_string(),
                    });
                }
                PathBuf::from(format!("{}.json", self.name))
            }
        };

        let json = self.to_json()?;
        std::fs::write(&path, json).map_err(|e| TemplateError::io(&path, e))?;
        debug!("Saved template '{}' to {}", self.name, path.display());
        Ok(path)
    }

    /// Parse a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| TemplateError::Parse {
            origin: "JSON string".to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(value, false, "JSON string")
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let value: serde_json::Value = toml::from_str(content).map_err(|e| TemplateError::Parse {
            origin: "TOML string".to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(value, false, "TOML string")
    }

    /// Load a JSON template file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path.as_ref(), crate::library::decode_json, false)
    }

    /// Load a TOML template file
    pub fn parse_toml(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path.as_ref(), crate::library::decode_toml, false)
    }

    /// Read `path` and build a template from the document `decode` produces
    pub(crate) fn load_with(
        path: &Path,
        decode: crate::library::DecodeFn,
        deny_unknown_fields: bool,
    ) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
        let origin = path.display().to_string();
        let value = decode(&content).map_err(|message| TemplateError::Parse {
            origin: origin.clone(),
            message,
        })?;
        Self::from_value(value, deny_unknown_fields, &origin)
    }

    /// Build a template from a decoded document tree
    pub(crate) fn from_value(
        value: serde_json::Value,
        deny_unknown_fields: bool,
        origin: &str,
    ) -> Result<Self> {
        let parsed = if deny_unknown_fields {
            serde_json::from_value::<StrictTemplate>(value).map(Template::from)
        } else {
            serde_json::from_value::<Template>(value)
        };
        parsed.map_err(|e| TemplateError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }
}
