//! Transcript preparation: everything that happens to a client-supplied
//! conversation before it is sent upstream.
//!
//! The three stages are pure functions and run in this order:
//! [`sanitize`] → [`window`] → [`augment`].

pub mod augment;
pub mod sanitize;
pub mod window;

pub use augment::{augment, PromptPolicy};
pub use sanitize::{sanitize, SanitizeError};
pub use window::window;
