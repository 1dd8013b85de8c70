//! Message templates
//!
//! A [`Template`] holds content with `{field}` placeholders, a name and a
//! role. Rendering substitutes every placeholder and yields a [`Message`]
//! ready to be sent as a chat message.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use prompt_library::Template;
//!
//! let template = Template::new("Translate {text} into {language}.")
//!     .with_name("translate")
//!     .with_role("user");
//!
//! assert_eq!(template.inputs().unwrap(), vec!["language", "text"]);
//!
//! let inputs = HashMap::from([
//!     ("text".to_string(), "bonjour".to_string()),
//!     ("language".to_string(), "English".to_string()),
//! ]);
//! let message = template.message(&inputs).unwrap();
//! assert_eq!(message.content, "Translate bonjour into English.");
//! assert_eq!(message.role, "user");
//! ```

mod prompt;
mod render;

pub use prompt::{Message, Template, DEFAULT_ROLE};
pub use render::{field_names, render, render_segments};
