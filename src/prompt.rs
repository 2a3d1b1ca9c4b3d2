//! [OpenAI Chat Completions API] request type. We call it [`Prompt`] since in
//! actual usage this makes the code more readable.
//!
//! [OpenAI Chat Completions API]: <https://platform.openai.com/docs/api-reference/chat>

use std::{borrow::Cow, num::NonZeroU32};

use serde::{Deserialize, Serialize};

use crate::Model;

pub mod message;
pub use message::Message;

/// Request for the [OpenAI Chat Completions API].
///
/// [OpenAI Chat Completions API]: <https://platform.openai.com/docs/api-reference/chat>
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[serde(default)]
pub struct Prompt<'a> {
    /// [`Model`] to use for inference.
    pub model: Model,
    /// Input [`Message`]s. The completion continues the conversation these
    /// form. A lone [`User`] message is the common case.
    ///
    /// [`User`]: message::Role::User
    pub messages: Vec<Message<'a>>,
    /// Max tokens to generate. [`None`] uses the backend default, which is
    /// the model's remaining context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<NonZeroU32>,
    /// Temperature for sampling, between 0 and 2. Higher values mean more
    /// randomness. Note that 0.0 is not fully deterministic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top P nucleus sampling. The probabilities of each token are added in
    /// order from most to least likely until the probability mass exceeds
    /// `top_p`. A token is then sampled from this reduced distribution.
    ///
    /// This is a float between 0 and 1 where higher values mean more
    /// randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Optional stop sequences. If the model generates any of these
    /// sequences, the completion finishes with [`FinishReason::Stop`].
    ///
    /// [`FinishReason::Stop`]: crate::response::FinishReason::Stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<Cow<'a, str>>>,
    /// If `true`, the response is a stream of server-sent events. This crate
    /// does not consume streams; [`Client::complete`] forces this off.
    ///
    /// [`Client::complete`]: crate::Client::complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Optional stable identifier for the end user, to help the backend
    /// detect and prevent abuse. Do not use PII here (email, phone).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Cow<'a, str>>,
}

impl<'a> Prompt<'a> {
    /// Set the [`model`] to a [`Model`].
    ///
    /// [`model`]: Prompt::model
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set the [`messages`] from an iterable of [`Message`]s.
    ///
    /// [`messages`]: Prompt::messages
    pub fn messages<M, Ms>(mut self, messages: Ms) -> Self
    where
        M: Into<Message<'a>>,
        Ms: IntoIterator<Item = M>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Add a [`Message`] to [`messages`].
    ///
    /// [`messages`]: Prompt::messages
    pub fn add_message<M>(mut self, message: M) -> Self
    where
        M: Into<Message<'a>>,
    {
        self.messages.push(message.into());
        self
    }

    /// Extend the [`messages`] from an iterable.
    ///
    /// [`messages`]: Prompt::messages
    pub fn extend_messages<M, Ms>(mut self, messages: Ms) -> Self
    where
        M: Into<Message<'a>>,
        Ms: IntoIterator<Item = M>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    /// Set the [`max_tokens`]. If this is reached, the [`FinishReason`] will
    /// be [`Length`]. Set to [`None`] to use the backend default.
    ///
    /// [`max_tokens`]: Prompt::max_tokens
    /// [`FinishReason`]: crate::response::FinishReason
    /// [`Length`]: crate::response::FinishReason::Length
    pub fn max_tokens(mut self, max_tokens: Option<NonZeroU32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the [`temperature`] to `Some(value)` or [`None`] to use the
    /// default.
    ///
    /// [`temperature`]: Prompt::temperature
    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the top P for nucleus sampling. Set to [`None`] to use the default
    /// value.
    pub fn top_p(mut self, top_p: Option<f32>) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the [`stop`] sequences. If one is generated, the completion
    /// finishes with [`FinishReason::Stop`].
    ///
    /// [`stop`]: Prompt::stop
    /// [`FinishReason::Stop`]: crate::response::FinishReason::Stop
    pub fn stop_sequences<S, Ss>(mut self, stop: Ss) -> Self
    where
        S: Into<Cow<'a, str>>,
        Ss: IntoIterator<Item = S>,
    {
        self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }

    /// Add a stop sequence to [`stop`].
    ///
    /// [`stop`]: Prompt::stop
    pub fn stop_sequence<S>(mut self, stop: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.stop
            .get_or_insert_with(Default::default)
            .push(stop.into());
        self
    }

    /// Turn streaming on.
    ///
    /// **Note**: [`Client::complete`] will overwrite this setting. It exists
    /// for compatible endpoints driven through [`Client::post`] directly.
    ///
    /// [`Client::complete`]: crate::Client::complete
    /// [`Client::post`]: crate::Client::post
    pub fn stream(mut self) -> Self {
        self.stream = Some(true);
        self
    }

    /// Turn streaming off.
    pub fn no_stream(mut self) -> Self {
        self.stream = Some(false);
        self
    }

    /// Set the [`user`] identifier.
    ///
    /// [`user`]: Prompt::user
    pub fn user<S>(mut self, user: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.user = Some(user.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::message::Role;
    use serde_json::json;

    const STOP_SEQUENCES: [&str; 2] = ["stop1", "stop2"];

    #[test]
    fn test_default_prompt() {
        let prompt = Prompt::default();
        assert_eq!(prompt.model, Model::default());
        assert!(prompt.messages.is_empty());
        assert!(prompt.max_tokens.is_none());
        assert!(prompt.temperature.is_none());
        assert!(prompt.top_p.is_none());
        assert!(prompt.stop.is_none());
        assert!(prompt.stream.is_none());
        assert!(prompt.user.is_none());
    }

    #[test]
    fn test_default_serialization_skips_unset() {
        let json = serde_json::to_value(Prompt::default()).unwrap();
        assert_eq!(
            json,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [],
            })
        );
    }

    #[test]
    fn test_wire_format() {
        let prompt = Prompt::default()
            .temperature(Some(0.0))
            .add_message((Role::User, "Hello"));
        let json = serde_json::to_value(prompt).unwrap();

        assert_eq!(
            json,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Hello"}],
                "temperature": 0.0,
            })
        );
    }

    #[test]
    fn test_set_model() {
        let prompt = Prompt::default().model(Model::Gpt4o);
        assert_eq!(prompt.model, Model::Gpt4o);
    }

    fn create_test_messages() -> [Message<'static>; 2] {
        [
            Message {
                role: Role::User,
                content: "Hello".into(),
            },
            Message {
                role: Role::Assistant,
                content: "Hi".into(),
            },
        ]
    }

    #[test]
    fn test_set_messages() {
        let prompt = Prompt::default().messages(create_test_messages());
        assert_eq!(prompt.messages, create_test_messages());
    }

    #[test]
    fn test_add_message() {
        let prompt = Prompt::default()
            .add_message((Role::User, "Hello"))
            .add_message((Role::Assistant, "Hi"));
        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0], (Role::User, "Hello").into());
        assert_eq!(prompt.messages[1], (Role::Assistant, "Hi").into());
    }

    #[test]
    fn test_extend_messages() {
        let prompt =
            Prompt::default().extend_messages(create_test_messages());
        assert_eq!(prompt.messages, create_test_messages());
    }

    #[test]
    fn test_set_max_tokens() {
        let max_tokens = NonZeroU32::new(1024);
        let prompt = Prompt::default().max_tokens(max_tokens);
        assert_eq!(prompt.max_tokens, max_tokens);
    }

    #[test]
    fn test_temperature() {
        let prompt = Prompt::default().temperature(Some(0.5));
        assert_eq!(prompt.temperature, Some(0.5));
    }

    #[test]
    fn test_top_p() {
        let prompt = Prompt::default().top_p(Some(0.5));
        assert_eq!(prompt.top_p, Some(0.5));
    }

    #[test]
    fn test_set_stop_sequences() {
        let prompt = Prompt::default().stop_sequences(STOP_SEQUENCES);
        assert_eq!(prompt.stop.unwrap(), STOP_SEQUENCES);
    }

    #[test]
    fn test_add_stop_sequence() {
        let prompt = Prompt::default().stop_sequence(STOP_SEQUENCES[0]);
        assert_eq!(prompt.stop.as_ref().unwrap().len(), 1);
        assert_eq!(prompt.stop.unwrap()[0], STOP_SEQUENCES[0]);
    }

    #[test]
    fn test_stream_on() {
        let prompt = Prompt::default().stream();
        assert_eq!(prompt.stream, Some(true));
    }

    #[test]
    fn test_stream_off() {
        let prompt = Prompt::default().no_stream();
        assert_eq!(prompt.stream, Some(false));
    }

    #[test]
    fn test_set_user() {
        let prompt = Prompt::default().user("user-123");
        assert_eq!(prompt.user.as_deref(), Some("user-123"));
    }

    #[test]
    fn test_serde() {
        // Test default deserialization.
        const JSON: &str = r#"{}"#;

        let defaults = serde_json::from_str::<Prompt>(JSON).unwrap();

        // Another round trip to ensure serialization works.
        let json = serde_json::to_string(&defaults).unwrap();
        let _ = serde_json::from_str::<Prompt>(&json).unwrap();
    }
}
