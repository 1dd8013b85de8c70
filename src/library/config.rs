//! Configuration for loading template libraries

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TemplateError};

/// Options controlling how templates are read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Reject template files with keys other than content/name/role
    pub deny_unknown_fields: bool,

    /// Follow symbolic links when scanning a directory
    pub follow_links: bool,
}

/// TOML structure for deserializing library configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    library: Option<TomlLibrary>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLibrary {
    deny_unknown_fields: Option<bool>,
    follow_links: Option<bool>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            deny_unknown_fields: false,
            follow_links: true,
        }
    }
}

impl LibraryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unknown keys in template files are rejected
    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    /// Set whether directory scans follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self> {
        let parsed: TomlConfig = toml::from_str(content).map_err(|e| TemplateError::Config {
            message: e.to_string(),
        })?;

        let defaults = Self::default();
        let Some(library) = parsed.library else {
            return Ok(defaults);
        };
        Ok(Self {
            deny_unknown_fields: library
                .deny_unknown_fields
                .unwrap_or(defaults.deny_unknown_fields),
            follow_links: library.follow_links.unwrap_or(defaults.follow_links),
        })
    }
}
