//! Stream bindings for OpenAI's server-sent-events protocol.

use crate::error::LLMError;
use crate::http::HttpBodyStream;
use crate::stream::{FrameDecoder, Framing, ResultStream};

use super::PROVIDER;
use super::response::{normalize_chat_chunk, normalize_completion_chunk};
use super::types::{OpenAiChatChunk, OpenAiCompletionChunk};

pub(crate) fn create_chat_stream(body: HttpBodyStream) -> ResultStream {
    FrameDecoder::new(
        body,
        Framing::EventStream,
        PROVIDER,
        Box::new(|frame| {
            let parsed: OpenAiChatChunk = serde_json::from_str(frame)
                .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {frame}")))?;
            Ok(normalize_chat_chunk(parsed))
        }),
    )
    .into_stream()
}

pub(crate) fn create_completion_stream(body: HttpBodyStream) -> ResultStream {
    FrameDecoder::new(
        body,
        Framing::EventStream,
        PROVIDER,
        Box::new(|frame| {
            let parsed: OpenAiCompletionChunk = serde_json::from_str(frame)
                .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {frame}")))?;
            Ok(normalize_completion_chunk(parsed))
        }),
    )
    .into_stream()
}
