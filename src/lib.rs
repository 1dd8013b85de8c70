//! Prompt Library - parameterized chat message templates
//!
//! This library provides [`Template`], a piece of text with `{field}`
//! placeholders that renders to a role-tagged chat [`Message`], and
//! [`TemplateLibrary`], a named collection of templates that can be loaded
//! from JSON or TOML files on disk.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use prompt_library::{Template, TemplateLibrary};
//!
//! let mut library = TemplateLibrary::new();
//! library
//!     .add(Template::new("Hello, {name}!").with_name("greeting").with_role("system"))
//!     .unwrap();
//!
//! let inputs = HashMap::from([("name".to_string(), "Ada".to_string())]);
//! let message = library.get("greeting").unwrap().message(&inputs).unwrap();
//! assert_eq!(message.content, "Hello, Ada!");
//! assert_eq!(message.role, "system");
//! ```

pub mod error;
pub mod library;
pub mod parser;
pub mod template;

pub use error::{FormatError, Result, TemplateError};
pub use library::{FormatRegistry, LibraryConfig, TemplateLibrary};
pub use parser::{parse, Segment};
pub use template::{render, Message, Template, DEFAULT_ROLE};
