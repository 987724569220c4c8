//! Normalized result shape shared by chat, completion, and embedding calls.

use serde::{Deserialize, Serialize};

use crate::params::Message;

/// One normalized element of a response sequence.
///
/// A single shape serves chat deltas, completion deltas, and embedding batches;
/// fields a capability does not produce stay at their empty defaults. `None` on any
/// counter uniformly means "not reported by the provider" — values are never
/// fabricated.
///
/// `done == true` marks the terminal element of a streamed sequence. Embedding
/// results are always a single element with `done == true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    /// Incremental chat content; `None` for completion and embedding results.
    pub message: Option<Message>,
    /// One vector per embedding input; empty for chat and completion results.
    #[serde(default)]
    pub embeddings: Vec<Vec<f64>>,
    /// Wall time spent generating the response, in nanoseconds.
    pub total_duration: Option<i64>,
    /// Time spent loading the model, in nanoseconds.
    pub load_duration: Option<i64>,
    /// Number of tokens in the prompt.
    pub prompt_eval_count: Option<i32>,
    /// Time spent evaluating the prompt, in nanoseconds.
    pub prompt_eval_duration: Option<i64>,
    /// Number of tokens in the response.
    pub eval_count: Option<i32>,
    /// Time spent generating the response, in nanoseconds.
    pub eval_duration: Option<i64>,
    /// Conversation state encoding that can be replayed into the next request.
    pub context: Option<Vec<i32>>,
}
