//! Minimal HTTP transport abstraction consumed by the handlers.
//!
//! The facade only ever issues JSON POST requests, either expecting a buffered
//! response (embeddings) or a streaming body (chat and generation). Everything
//! else — connection management, TLS, timeouts — belongs to the concrete
//! transport behind [`HttpTransport`].

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;
use serde::Serialize;

use crate::error::LLMError;

/// JSON POST request shared across providers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Builds a POST request carrying a JSON body.
    ///
    /// Sets `Content-Type: application/json`; providers stamp additional headers
    /// (such as `Authorization`) before dispatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare_llm::http::HttpRequest;
    ///
    /// let request = HttpRequest::post_json("https://example.com", br"{}".to_vec());
    /// assert_eq!(
    ///     request.headers.get("Content-Type"),
    ///     Some(&"application/json".to_string())
    /// );
    /// ```
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body,
        }
    }

    /// Adds a header to the request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Converts the body into a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::Transport`] when the body is not valid UTF-8.
    pub fn into_string(self) -> Result<String, LLMError> {
        String::from_utf8(self.body).map_err(|err| LLMError::transport(err.to_string()))
    }
}

/// HTTP response that carries a streaming body.
pub struct HttpStreamResponse {
    pub status: u16,
    pub body: HttpBodyStream,
}

/// Alias for the body stream returned by [`HttpTransport::send_stream`].
///
/// Dropping the stream must release the underlying connection promptly; no
/// further chunks may be produced afterwards.
pub type HttpBodyStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, LLMError>> + Send>>;

/// Transport abstraction decoupling handlers from the concrete HTTP client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request and resolves when the full response is available.
    ///
    /// # Errors
    ///
    /// Implementations map network failures to [`LLMError::Transport`].
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError>;

    /// Sends a request and returns an incrementally readable body.
    ///
    /// # Errors
    ///
    /// Implementations map network failures to [`LLMError::Transport`].
    async fn send_stream(&self, request: HttpRequest) -> Result<HttpStreamResponse, LLMError>;
}

/// Thread-safe handle to a transport implementation.
pub type DynHttpTransport = Arc<dyn HttpTransport>;

/// Serializes a body to JSON, attaches headers, and issues a buffered POST.
///
/// # Errors
///
/// Returns [`LLMError::InvalidParameter`] when serialization fails, otherwise
/// forwards the transport's error.
pub async fn post_json<T: Serialize>(
    transport: &dyn HttpTransport,
    url: impl Into<String>,
    headers: HashMap<String, String>,
    body: &T,
) -> Result<HttpResponse, LLMError> {
    let mut request = HttpRequest::post_json(url, serialize_body(body)?);
    request.headers.extend(headers);
    transport.send(request).await
}

/// Serializes a body to JSON, attaches headers, and issues a streaming POST.
///
/// # Errors
///
/// Returns [`LLMError::InvalidParameter`] when serialization fails, otherwise
/// forwards the transport's error.
pub async fn post_json_stream<T: Serialize>(
    transport: &dyn HttpTransport,
    url: impl Into<String>,
    headers: HashMap<String, String>,
    body: &T,
) -> Result<HttpStreamResponse, LLMError> {
    let mut request = HttpRequest::post_json(url, serialize_body(body)?);
    request.headers.extend(headers);
    transport.send_stream(request).await
}

fn serialize_body<T: Serialize>(body: &T) -> Result<Vec<u8>, LLMError> {
    serde_json::to_vec(body)
        .map_err(|err| LLMError::invalid_parameter("body", format!("failed to serialize: {err}")))
}

pub mod reqwest;
