//! Serialization formats keyed by file extension

use std::collections::HashMap;
use std::path::Path;

/// Decodes a serialized template document into a generic tree
pub type DecodeFn = fn(&str) -> Result<serde_json::Value, String>;

/// Decode a JSON document
pub fn decode_json(content: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

/// Decode a TOML document
pub fn decode_toml(content: &str) -> Result<serde_json::Value, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Registry mapping file extensions (without the dot) to decoders
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    decoders: HashMap<String, DecodeFn>,
    /// Extension whose decoder is used for single files of unknown type
    fallback: String,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::empty("json");
        registry.register("json", decode_json);
        registry.register("toml", decode_toml);
        registry
    }
}

impl FormatRegistry {
    /// Registry with JSON and TOML, falling back to JSON
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no formats and the given fallback extension
    pub fn empty(fallback: impl Into<String>) -> Self {
        Self {
            decoders: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Register or replace the decoder for an extension
    pub fn register(&mut self, extension: impl Into<String>, decode: DecodeFn) {
        self.decoders.insert(extension.into(), decode);
    }

    /// Set the extension used for files of unknown type
    pub fn with_fallback(mut self, extension: impl Into<String>) -> Self {
        self.fallback = extension.into();
        self
    }

    /// Decoder registered for an extension
    pub fn get(&self, extension: &str) -> Option<DecodeFn> {
        self.decoders.get(extension).copied()
    }

    /// Check if an extension is registered
    pub fn contains(&self, extension: &str) -> bool {
        self.decoders.contains_key(extension)
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.decoders.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Decoder for a directory entry; only registered extensions qualify
    pub fn for_entry(&self, path: &Path) -> Option<DecodeFn> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get(ext))
    }

    /// Decoder for an explicitly named file, using the fallback when the
    /// extension is missing or unregistered
    pub fn for_file(&self, path: &Path) -> Option<DecodeFn> {
        self.for_entry(path).or_else(|| self.get(&self.fallback))
    }
}
