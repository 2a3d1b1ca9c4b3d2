//! [`Completion`] response types for the [OpenAI Chat Completions API].
//!
//! [OpenAI Chat Completions API]: <https://platform.openai.com/docs/api-reference/chat>

use derive_more::derive::IsVariant;
use serde::{Deserialize, Serialize};

use crate::prompt;

/// Successful response from the [OpenAI Chat Completions API]. Metadata
/// reported by the backend (`id`, `model`, [`Usage`]) is carried verbatim.
///
/// [OpenAI Chat Completions API]: <https://platform.openai.com/docs/api-reference/chat>
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Completion {
    /// Unique `id` for the completion.
    pub id: String,
    /// Object type. Always `chat.completion` for this endpoint.
    pub object: String,
    /// Unix timestamp (seconds) of when the completion was created.
    pub created: u64,
    /// Model that generated the completion, as reported by the backend. The
    /// backend answers with dated snapshot names (for example,
    /// `gpt-3.5-turbo-0125`), so this is a plain string rather than a
    /// [`Model`].
    ///
    /// [`Model`]: crate::Model
    pub model: String,
    /// Generated [`Choice`]s. One, unless more were requested.
    pub choices: Vec<Choice>,
    /// Token [`Usage`] statistics for the request.
    pub usage: Usage,
}

impl Completion {
    /// The generated text of the first [`Choice`], if any. No
    /// post-processing is applied.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_ref())
    }

    /// Consume the completion, returning the generated text of the first
    /// [`Choice`], if any.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.into_owned())
    }
}

impl std::fmt::Display for Completion {
    /// Write the text of the first [`Choice`], if any.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text().unwrap_or_default())
    }
}

/// A single generated completion choice.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Choice {
    /// Index of the choice in the response.
    pub index: u32,
    /// The generated [`Message`]. The role is `assistant`.
    ///
    /// [`Message`]: prompt::Message
    pub message: prompt::Message<'static>,
    /// Why generation stopped, if the backend reported it.
    pub finish_reason: Option<FinishReason>,
}

/// Reason the model stopped generating tokens.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model reached a natural stopping point or a stop sequence.
    Stop,
    /// Maximum tokens reached.
    Length,
    /// Content was omitted by the backend's content filter.
    ContentFilter,
}

/// Usage statistics from the API, pass-through.
#[derive(Debug, Serialize, Deserialize, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Usage {
    /// Number of prompt tokens used.
    pub prompt_tokens: u64,
    /// Number of generated tokens.
    pub completion_tokens: u64,
    /// Total tokens billed for the request.
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prompt::message::Role;

    pub const RESPONSE_JSON: &str = r#"{
    "id": "chatcmpl-8pQ6LJr6Pc9mTqRzUHvWkA0XLh7fD",
    "object": "chat.completion",
    "created": 1707123456,
    "model": "gpt-3.5-turbo-0125",
    "choices": [
        {
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "Hi! How can I help?"
            },
            "logprobs": null,
            "finish_reason": "stop"
        }
    ],
    "usage": {
        "prompt_tokens": 57,
        "completion_tokens": 17,
        "total_tokens": 74
    }
}"#;

    #[test]
    fn test_deserialize_completion() {
        let completion: Completion =
            serde_json::from_str(RESPONSE_JSON).unwrap();

        assert_eq!(completion.id, "chatcmpl-8pQ6LJr6Pc9mTqRzUHvWkA0XLh7fD");
        assert_eq!(completion.object, "chat.completion");
        assert_eq!(completion.model, "gpt-3.5-turbo-0125");
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].index, 0);
        assert_eq!(completion.choices[0].message.role, Role::Assistant);
        assert_eq!(
            completion.choices[0].finish_reason,
            Some(FinishReason::Stop)
        );
        assert!(completion.choices[0].finish_reason.unwrap().is_stop());
        assert_eq!(completion.usage.prompt_tokens, 57);
        assert_eq!(completion.usage.completion_tokens, 17);
        assert_eq!(completion.usage.total_tokens, 74);
    }

    #[test]
    fn test_text() {
        let completion: Completion =
            serde_json::from_str(RESPONSE_JSON).unwrap();

        assert_eq!(completion.text(), Some("Hi! How can I help?"));
        assert_eq!(completion.to_string(), "Hi! How can I help?");
        assert_eq!(
            completion.into_text().as_deref(),
            Some("Hi! How can I help?")
        );
    }

    #[test]
    fn test_no_choices() {
        let completion = Completion {
            id: "chatcmpl-empty".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gpt-3.5-turbo-0125".to_string(),
            choices: vec![],
            usage: Usage::default(),
        };

        assert_eq!(completion.text(), None);
        assert_eq!(completion.to_string(), "");
        assert_eq!(completion.into_text(), None);
    }

    #[test]
    fn test_finish_reason_serde() {
        let reason: FinishReason =
            serde_json::from_str(r#""content_filter""#).unwrap();
        assert_eq!(reason, FinishReason::ContentFilter);
        assert_eq!(
            serde_json::to_string(&FinishReason::Length).unwrap(),
            r#""length""#
        );
    }
}
