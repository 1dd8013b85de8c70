//! Template libraries
//!
//! A [`TemplateLibrary`] keeps templates by name and can be filled from a
//! single template file or a flat directory of them. The file format is
//! chosen by extension through a [`FormatRegistry`]; JSON and TOML are
//! registered by default.

mod config;
mod formats;
mod registry;

pub use config::LibraryConfig;
pub use formats::{decode_json, decode_toml, DecodeFn, FormatRegistry};
pub use registry::TemplateLibrary;
