//! [`Model`] to use for inference.
use serde::{Deserialize, Serialize};

/// Model to use for inference. Serialized with the exact wire name the API
/// expects. Note that the API reports dated snapshot names (for example,
/// `gpt-3.5-turbo-0125`) in responses, so [`Completion::model`] is a plain
/// string rather than this enum.
///
/// [`Completion::model`]: crate::response::Completion::model
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// GPT-3.5 Turbo. This is the default model.
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// GPT-3.5 Turbo with the 16k context window.
    #[serde(rename = "gpt-3.5-turbo-16k")]
    Gpt35Turbo16k,
    /// GPT-4
    #[serde(rename = "gpt-4")]
    Gpt4,
    /// GPT-4 Turbo
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    /// GPT-4o
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    /// GPT-4o mini
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
}
