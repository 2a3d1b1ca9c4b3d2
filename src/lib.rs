#![deny(warnings)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! `promptly` is a crate providing ergonomic access to the [OpenAI Chat
//! Completions API] through named-placeholder prompt templates.
//!
//! To get started, create a [`Client`] with your API key, parse a
//! [`Template`], and hand both to an [`Invoker`]. The invoker renders the
//! template with your values, submits it once, and returns the generated
//! text verbatim. For lower-level control, [`Client::complete`] accepts any
//! serializable [`Prompt`] and returns the raw [`Completion`].
//!
//! [OpenAI Chat Completions API]: <https://platform.openai.com/docs/api-reference/chat>
//!
//! See the `demos` directory for a complete program.

pub mod key;
pub use key::Key;

pub mod client;
pub use client::Client;

pub mod model;
pub use model::Model;

pub mod template;
pub use template::Template;

pub mod prompt;
pub use prompt::Prompt;

pub mod response;
pub use response::Completion;

pub mod invoker;
pub use invoker::{Backend, Invoker};

/// Re-exports of commonly used crates to avoid version conflicts and reduce
/// dependency bloat.
pub mod exports {
    #[cfg(feature = "log")]
    pub use log;
    pub use reqwest;
    pub use serde;
    pub use serde_json;
}

/// Re-export of `serde_json::json!` for convenience because this is used
/// frequently.
pub use exports::serde_json::json;
