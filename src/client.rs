//! [`Client`] for the OpenAI Chat Completions API and related types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{key, response::Completion, Key};

/// Result type for the client. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Client for the OpenAI Chat Completions API.
///
/// See [`Self::new`] for creating a new client and [`Self::complete`] to get
/// started.
#[derive(Clone)]
pub struct Client {
    /// Inner [`reqwest::Client`]. Be aware that setting this to a custom
    /// client without a JSON content type will result in rejected requests.
    /// It is **not necessary** to set the API key on a custom client.
    ///
    /// ## Note:
    /// - The API [`Key`] is **set automatically on requests**. Set
    ///   [`Self::key`] to change the [`Key`].
    /// - **Do not use** `client.inner.get` directly. Use [`Self::get`]
    ///   instead to safely set the API [`Key`] as sensitive.
    pub inner: reqwest::Client,
    /// API [`Key`] for convenience. It can be set to a new [`Key`] to change
    /// the key used for requests.
    pub key: Arc<Key>,
}

static_assertions::assert_impl_all!(Client: Clone, Send, Sync);

impl Client {
    /// Our user agent.
    pub const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
    /// Default URL for the Chat Completions API.
    pub const DEFAULT_URL: &'static str =
        "https://api.openai.com/v1/chat/completions";

    /// Create a new client from any type that can be converted into a
    /// [`Key`].
    ///
    /// ## Note:
    /// - It's safest to use a [`String`]. If you use a [`&str`] you must
    ///   zeroize it after creating the client.
    /// - This fails with [`key::InvalidKey`] if the credential is empty, so
    ///   a missing key is caught here, before any request exists to fail.
    pub fn new<K>(key: K) -> std::result::Result<Self, key::InvalidKey>
    where
        K: TryInto<Key, Error = key::InvalidKey>,
    {
        Ok(Self::from_key(key.try_into()?))
    }

    /// Create a new client with the given key.
    pub fn from_key(key: Key) -> Self {
        #[cfg(feature = "log")]
        {
            log::info!(concat!(
                "Creating ",
                env!("CARGO_PKG_NAME"),
                " client..."
            ));
            log::debug!(concat!("Crate version: ", env!("CARGO_PKG_VERSION")));
        }

        // Headers for all requests.
        let mut headers = reqwest::header::HeaderMap::new();

        // Content type needs to be set to JSON.
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Self {
            inner: reqwest::Client::builder()
                .default_headers(headers)
                .user_agent(Self::USER_AGENT)
                .build()
                .unwrap(),
            key: Arc::new(key),
        }
    }

    /// Create a [`reqwest::RequestBuilder`] with the API key set as a
    /// sensitive header value.
    pub fn request_raw<U>(
        &self,
        method: reqwest::Method,
        url: U,
    ) -> reqwest::RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        #[cfg(feature = "log")]
        {
            log::debug!("{} request to {}", method, url.as_str());
        }

        // The key is validated printable ASCII so the header value is valid.
        let mut val = reqwest::header::HeaderValue::try_from(format!(
            "Bearer {}",
            self.key.read()
        ))
        .unwrap();
        val.set_sensitive(true);

        self.inner
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, val)
    }

    /// Send a GET request with the API key set as a sensitive header value.
    pub async fn get<U>(&self, url: U) -> reqwest::Result<reqwest::Response>
    where
        U: reqwest::IntoUrl,
    {
        self.request_raw(reqwest::Method::GET, url).send().await
    }

    /// Send a POST request with the API key set as a sensitive header value.
    pub async fn post<U, B>(
        &self,
        url: U,
        body: B,
    ) -> reqwest::Result<reqwest::Response>
    where
        U: reqwest::IntoUrl,
        B: serde::Serialize,
    {
        let req = self.request_raw(reqwest::Method::POST, url);

        #[cfg(feature = "log")]
        {
            if let Ok(json) = serde_json::to_string_pretty(&body) {
                log::debug!("Sending body:\n{}", json);
            } else {
                log::warn!("Could not serialize body. Request will fail.");
            }
        }

        req.json(&body).send().await
    }

    /// Post a request to the Chat Completions API, forcing `stream` off.
    ///
    /// `prompt` can be a [`Prompt`] (as an example) or anything that can be
    /// serialized, but it should conform to the Chat Completions API. One
    /// request is made; there is no retry. The call blocks (asynchronously)
    /// for as long as the backend takes to generate.
    ///
    /// See [`Self::complete_custom`] for a custom URL.
    ///
    /// [`Prompt`]: crate::Prompt
    pub async fn complete<P>(&self, prompt: P) -> Result<Completion>
    where
        P: Serialize,
    {
        let mut json = serde_json::to_value(prompt)?;
        json["stream"] = serde_json::Value::Bool(false);

        self.complete_custom(json, Self::DEFAULT_URL).await
    }

    /// Post a completion request to a custom URL. This is useful for testing
    /// or for a different Chat Completions compatible endpoint.
    ///
    /// Unlike [`Self::complete`], `stream` is passed through untouched. This
    /// crate does not consume streams, so leave it unset.
    pub async fn complete_custom<P, U>(
        &self,
        prompt: P,
        url: U,
    ) -> Result<Completion>
    where
        P: Serialize,
        U: reqwest::IntoUrl,
    {
        let response: reqwest::Response = self.post(url, prompt).await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let wrapper: ApiErrorWrapper = response.json().await?;

            // Error was successfully parsed from the API.
            return Err(Error::Api {
                status,
                error: wrapper.error,
            });
        }

        Ok(response.json().await?)
    }
}

/// [`Client`] error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP error. The network call could not complete.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The backend reported a failure (bad request, bad credential, rate
    /// limit, service error).
    #[error("OpenAI error ({status}): {error}")]
    Api {
        /// HTTP status the error arrived with.
        status: reqwest::StatusCode,
        /// Parsed [`ApiError`] body.
        #[source]
        error: ApiError,
    },
}

impl Error {
    /// Whether the backend rejected the credential (HTTP 401).
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::Api { status, .. }
                if *status == reqwest::StatusCode::UNAUTHORIZED
        )
    }
}

/// Error object reported by the API. The `type` and `code` taxonomies are
/// owned by the backend and carried as strings.
#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Human readable description of the failure.
    pub message: String,
    /// Error class, for example `invalid_request_error`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Request parameter the error refers to, if any.
    #[serde(default)]
    pub param: Option<String>,
    /// Machine readable code, for example `invalid_api_key`.
    #[serde(default)]
    pub code: Option<String>,
}

// The API nests the error object under an "error" field so we must wrap it.
#[derive(Deserialize)]
pub(crate) struct ApiErrorWrapper {
    pub(crate) error: ApiError,
}
