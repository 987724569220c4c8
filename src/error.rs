use thiserror::Error;

/// Aggregates every failure mode exposed by the unified client facade.
///
/// Callers can match on the specific variant to decide whether the request itself
/// must be fixed, the handler configuration is wrong, or the failure came from the
/// network layer.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Signals a missing or mistyped request field, raised by builders at
    /// construction time or by translators at dispatch time.
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter {
        /// Generic (provider-agnostic) name of the offending field.
        field: String,
        /// Explanation of what was expected.
        reason: String,
    },
    /// Raised at resolution time when the requested provider has no registered
    /// translator or decoder.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider { name: String },
    /// Raised at resolution time when the provider requires a credential that was
    /// not supplied.
    #[error("missing credential for provider {provider}")]
    MissingCredential { provider: &'static str },
    /// Reports a malformed frame observed while decoding a streamed body.
    ///
    /// The original payload is kept verbatim so callers can inspect what the
    /// provider actually sent. This error is terminal for the stream it occurred
    /// on; results emitted before it remain valid.
    #[error("decode failure from {provider}: {message}")]
    Decode {
        /// Name of the provider whose frame failed to decode, such as `ollama`.
        provider: &'static str,
        /// Parser error followed by the offending payload.
        message: String,
    },
    /// Represents transport-layer failures: connection errors, invalid headers,
    /// and non-2xx responses.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl LLMError {
    /// Creates an [`LLMError::InvalidParameter`] for the given field.
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare_llm::error::LLMError;
    ///
    /// let err = LLMError::invalid_parameter("model", "is required");
    /// assert!(matches!(err, LLMError::InvalidParameter { .. }));
    /// ```
    pub fn invalid_parameter<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`LLMError::Transport`] from a textual description.
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare_llm::error::LLMError;
    ///
    /// let err = LLMError::transport("dns lookup failed");
    /// assert!(matches!(err, LLMError::Transport { .. }));
    /// ```
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an [`LLMError::Decode`] with the provider name and the raw payload
    /// that failed to parse.
    pub fn decode<T: Into<String>>(provider: &'static str, message: T) -> Self {
        Self::Decode {
            provider,
            message: message.into(),
        }
    }
}
