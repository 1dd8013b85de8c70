//! Named collection of templates

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::config::LibraryConfig;
use super::formats::FormatRegistry;
use crate::error::{Result, TemplateError};
use crate::template::Template;

/// Templates keyed by name.
///
/// Keys are unique; inserting under an existing key replaces the entry.
/// Not synchronized: share behind a lock if several threads mutate it.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, Template>,
    formats: FormatRegistry,
    config: LibraryConfig,
}

impl PartialEq for TemplateLibrary {
    fn eq(&self, other: &Self) -> bool {
        self.templates == other.templates
    }
}

impl TemplateLibrary {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty library with custom load options
    pub fn with_config(config: LibraryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the format registry used when loading files
    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = formats;
        self
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }

    /// Store `template` under `name`, whatever the template's own name
    pub fn set(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), template);
    }

    /// Store `template` under its own name, replacing any existing entry
    pub fn add(&mut self, template: Template) -> Result<()> {
        if template.name().is_empty() {
            return Err(TemplateError::InvalidArgument {
                message: "Template name must be non-empty to add it to a library.".to_string(),
            });
        }
        let name = template.name().to_string();
        if self.templates.insert(name.clone(), template).is_some() {
            debug!("Replaced template '{}'", name);
        }
        Ok(())
    }

    /// Remove and return the template stored under `name`
    pub fn delete(&mut self, name: &str) -> Result<Template> {
        self.templates
            .remove(name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// All template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over (name, template) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Load a library from a template file or a directory of template files
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut library = Self::new();
        library.load_path(path)?;
        Ok(library)
    }

    /// Add the templates found at `path` to this library.
    ///
    /// A directory contributes each immediate child file whose extension
    /// is a registered format, in file-name order; other files and
    /// subdirectories are skipped. A single file is decoded by its
    /// extension, or by the fallback format when the extension is not
    /// registered. Loading stops at the first failure and keeps whatever
    /// was added before it. Returns the number of templates added.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_dir(path)
        } else if path.exists() {
            self.load_file(path)?;
            info!("Loaded template file {}", path.display());
            Ok(1)
        } else {
            Err(TemplateError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
    }

    fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();

        let mut loaded = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    // Dangling links and other unreadable entries only matter
                    // when they would have been loaded.
                    if path != dir && self.formats.for_entry(&path).is_none() {
                        debug!("Skipping {}: {}", path.display(), e);
                        continue;
                    }
                    return Err(match e.into_io_error() {
                        Some(source) => TemplateError::io(path, source),
                        None => TemplateError::InvalidArgument {
                            message: format!("symbolic link loop at {}", path.display()),
                        },
                    });
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(decode) = self.formats.for_entry(entry.path()) else {
                debug!("Skipping {}: unrecognized extension", entry.path().display());
                continue;
            };

            let template =
                Template::load_with(entry.path(), decode, self.config.deny_unknown_fields)?;
            debug!(
                "Loaded template '{}' from {}",
                template.name(),
                entry.path().display()
            );
            self.add(template)?;
            loaded += 1;
        }

        info!("Loaded {} templates from {}", loaded, dir.display());
        Ok(loaded)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let decode = self
            .formats
            .for_file(path)
            .ok_or_else(|| TemplateError::InvalidArgument {
                message: format!("no format registered to read {}", path.display()),
            })?;
        let template = Template::load_with(path, decode, self.config.deny_unknown_fields)?;
        self.add(template)
    }
}
