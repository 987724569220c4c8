//! Normalizers from Ollama wire responses to [`UnifiedResult`].

use crate::result::UnifiedResult;

use super::types::{OllamaChatResponse, OllamaEmbedResponse, OllamaGenerateResponse};

/// Chat frames carry the delta in `message`; `response` mirrors its content so
/// chat and generation consumers can read the same field.
pub(crate) fn normalize_chat(frame: OllamaChatResponse) -> UnifiedResult {
    let response = frame
        .message
        .as_ref()
        .and_then(|message| message.content.clone())
        .unwrap_or_default();
    UnifiedResult {
        model: frame.model,
        created_at: frame.created_at,
        response,
        done: frame.done,
        message: frame.message,
        total_duration: frame.total_duration,
        load_duration: frame.load_duration,
        prompt_eval_count: frame.prompt_eval_count,
        prompt_eval_duration: frame.prompt_eval_duration,
        eval_count: frame.eval_count,
        eval_duration: frame.eval_duration,
        ..UnifiedResult::default()
    }
}

pub(crate) fn normalize_generate(frame: OllamaGenerateResponse) -> UnifiedResult {
    UnifiedResult {
        model: frame.model,
        created_at: frame.created_at,
        response: frame.response,
        done: frame.done,
        context: frame.context,
        total_duration: frame.total_duration,
        load_duration: frame.load_duration,
        prompt_eval_count: frame.prompt_eval_count,
        prompt_eval_duration: frame.prompt_eval_duration,
        eval_count: frame.eval_count,
        eval_duration: frame.eval_duration,
        ..UnifiedResult::default()
    }
}

/// Embeddings are a single non-streamed result, always terminal.
pub(crate) fn normalize_embed(response: OllamaEmbedResponse) -> UnifiedResult {
    UnifiedResult {
        model: response.model,
        done: true,
        embeddings: response.embeddings,
        total_duration: response.total_duration,
        load_duration: response.load_duration,
        prompt_eval_count: response.prompt_eval_count,
        ..UnifiedResult::default()
    }
}
