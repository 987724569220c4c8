//! Normalizers from OpenAI wire responses to [`UnifiedResult`].

use crate::params::Message;
use crate::result::UnifiedResult;

use super::types::{OpenAiChatChunk, OpenAiCompletionChunk, OpenAiEmbeddingResponse};

/// `done` is derived from the presence of a finish reason; the role defaults to
/// `assistant` on continuation frames that omit it.
pub(crate) fn normalize_chat_chunk(chunk: OpenAiChatChunk) -> UnifiedResult {
    let choice = chunk.choices.into_iter().next();
    let done = choice
        .as_ref()
        .is_some_and(|choice| choice.finish_reason.is_some());
    let message = choice.and_then(|choice| choice.delta).map(|delta| Message {
        role: delta.role.unwrap_or_else(|| "assistant".to_string()),
        content: delta.content,
        images: None,
    });
    let response = message
        .as_ref()
        .and_then(|message| message.content.clone())
        .unwrap_or_default();
    UnifiedResult {
        model: chunk.model,
        created_at: chunk.created.to_string(),
        response,
        done,
        message,
        ..UnifiedResult::default()
    }
}

pub(crate) fn normalize_completion_chunk(chunk: OpenAiCompletionChunk) -> UnifiedResult {
    let choice = chunk.choices.into_iter().next();
    let done = choice
        .as_ref()
        .is_some_and(|choice| choice.finish_reason.is_some());
    let response = choice.and_then(|choice| choice.text).unwrap_or_default();
    UnifiedResult {
        model: chunk.model,
        created_at: chunk.created.to_string(),
        response,
        done,
        ..UnifiedResult::default()
    }
}

/// Usage counters map onto the prompt/eval counts when reported; absent usage
/// stays `None` rather than being fabricated.
pub(crate) fn normalize_embedding_response(response: OpenAiEmbeddingResponse) -> UnifiedResult {
    let (prompt_eval_count, eval_count) = response
        .usage
        .map(|usage| (usage.prompt_tokens, usage.total_tokens))
        .unwrap_or((None, None));
    UnifiedResult {
        model: response.model,
        done: true,
        embeddings: response
            .data
            .into_iter()
            .map(|data| data.embedding)
            .collect(),
        prompt_eval_count,
        eval_count,
        ..UnifiedResult::default()
    }
}
