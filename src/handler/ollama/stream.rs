//! Stream bindings for Ollama's raw-JSON-per-line protocol.

use crate::error::LLMError;
use crate::http::HttpBodyStream;
use crate::stream::{FrameDecoder, Framing, ResultStream};

use super::PROVIDER;
use super::response::{normalize_chat, normalize_generate};
use super::types::{OllamaChatResponse, OllamaGenerateResponse};

pub(crate) fn create_chat_stream(body: HttpBodyStream) -> ResultStream {
    FrameDecoder::new(
        body,
        Framing::JsonLines,
        PROVIDER,
        Box::new(|frame| {
            let parsed: OllamaChatResponse = serde_json::from_str(frame)
                .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {frame}")))?;
            Ok(normalize_chat(parsed))
        }),
    )
    .into_stream()
}

pub(crate) fn create_generate_stream(body: HttpBodyStream) -> ResultStream {
    FrameDecoder::new(
        body,
        Framing::JsonLines,
        PROVIDER,
        Box::new(|frame| {
            let parsed: OllamaGenerateResponse = serde_json::from_str(frame)
                .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {frame}")))?;
            Ok(normalize_generate(parsed))
        }),
    )
    .into_stream()
}
