//! [`Invoker`] renders a [`Template`] and submits the result to a completion
//! [`Backend`] in one call.
//!
//! This is deliberately a plain function call over an explicit [`Config`],
//! not a composed pipeline object, and it reads no process-wide state. The
//! [`Backend`] trait is the seam between rendering and transport so tests
//! can substitute a stub for the [`Client`].

use std::{future::Future, num::NonZeroU32};

use crate::{
    client,
    prompt::message::Role,
    response::Completion,
    template, Client, Model, Prompt, Template,
};

/// Result type for invocation. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// [`Invoker`] error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The template could not be rendered. No request was made.
    #[error("template error: {0}")]
    Template(#[from] template::Error),
    /// The backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] client::Error),
    /// The backend answered with no choices, so there is no text to return.
    #[error("completion contained no choices")]
    EmptyCompletion,
}

/// Sampling configuration for invocations. The defaults match the common
/// case for extraction-style prompts: [`Model::Gpt35Turbo`] at temperature
/// zero, which keeps the output as deterministic as the backend allows.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// [`Model`] to complete with.
    pub model: Model,
    /// Temperature for sampling. Note that 0.0 is not fully deterministic.
    pub temperature: f32,
    /// Optional cap on generated tokens. [`None`] uses the backend default.
    pub max_tokens: Option<NonZeroU32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

/// A completion backend: anything that accepts a [`Prompt`] and produces a
/// [`Completion`]. [`Client`] is the real one. Tests implement this with
/// stubs to assert what was (or was not) submitted.
pub trait Backend {
    /// Submit a prompt, returning the backend's completion.
    fn complete(
        &self,
        prompt: Prompt<'_>,
    ) -> impl Future<Output = client::Result<Completion>> + Send;
}

impl Backend for Client {
    fn complete(
        &self,
        prompt: Prompt<'_>,
    ) -> impl Future<Output = client::Result<Completion>> + Send {
        Client::complete(self, prompt)
    }
}

/// Renders a [`Template`] with caller-supplied values and submits the result
/// to a [`Backend`] once per call. Stateless: nothing is retained between
/// invocations, so identical inputs against a deterministic backend yield
/// identical output.
#[derive(Clone)]
pub struct Invoker<B> {
    backend: B,
    config: Config,
}

impl<B> Invoker<B>
where
    B: Backend,
{
    /// Create a new invoker with the default [`Config`].
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    /// Create a new invoker with the given [`Config`].
    pub fn with_config(backend: B, config: Config) -> Self {
        Self { backend, config }
    }

    /// The invoker's [`Config`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `template` with `values`, submit the result as a single
    /// [`User`] message, and return the generated text verbatim.
    ///
    /// Template errors surface before any backend call is made. The backend
    /// is called exactly once; there is no retry.
    ///
    /// [`User`]: Role::User
    pub async fn invoke<K, V, I>(
        &self,
        template: &Template,
        values: I,
    ) -> Result<String>
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let text = template.render(values)?;

        let prompt = Prompt::default()
            .model(self.config.model)
            .temperature(Some(self.config.temperature))
            .max_tokens(self.config.max_tokens)
            .add_message((Role::User, text));

        let completion = self.backend.complete(prompt).await?;

        completion.into_text().ok_or(Error::EmptyCompletion)
    }
}
