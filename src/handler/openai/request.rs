//! Translators from the generic [`ParameterBag`] to OpenAI wire requests.

use crate::error::LLMError;
use crate::handler::input_values;
use crate::params::{Message, ParameterBag};

use super::types::{
    OpenAiChatRequest, OpenAiCompletionRequest, OpenAiEmbeddingRequest, OpenAiMessage,
};

/// `stream` defaults to `true` when the bag does not say otherwise.
pub(crate) fn build_chat_request(params: &ParameterBag) -> Result<OpenAiChatRequest, LLMError> {
    Ok(OpenAiChatRequest {
        model: params.require_str("model")?.to_string(),
        messages: params
            .require_messages("messages")?
            .iter()
            .map(convert_message)
            .collect(),
        stream: params.stream()?.unwrap_or(true),
        temperature: params.get_f64("temperature")?,
        max_tokens: params.get_i64("max_tokens")?,
        top_p: params.get_f64("top_p")?,
        frequency_penalty: params.get_f64("frequency_penalty")?,
        presence_penalty: params.get_f64("presence_penalty")?,
        stop: params.get_string_list("stop")?.map(<[String]>::to_vec),
        user: params.get_str("user")?.map(str::to_string),
    })
}

pub(crate) fn build_completion_request(
    params: &ParameterBag,
) -> Result<OpenAiCompletionRequest, LLMError> {
    Ok(OpenAiCompletionRequest {
        model: params.require_str("model")?.to_string(),
        prompt: params.require_str("prompt")?.to_string(),
        stream: params.stream()?.unwrap_or(true),
        temperature: params.get_f64("temperature")?,
        max_tokens: params.get_i64("max_tokens")?,
        top_p: params.get_f64("top_p")?,
        frequency_penalty: params.get_f64("frequency_penalty")?,
        presence_penalty: params.get_f64("presence_penalty")?,
        stop: params.get_string_list("stop")?.map(<[String]>::to_vec),
        suffix: params.get_str("suffix")?.map(str::to_string),
        user: params.get_str("user")?.map(str::to_string),
    })
}

pub(crate) fn build_embedding_request(
    params: &ParameterBag,
) -> Result<OpenAiEmbeddingRequest, LLMError> {
    Ok(OpenAiEmbeddingRequest {
        model: params.require_str("model")?.to_string(),
        input: input_values(params)?,
        encoding_format: params.get_str("encoding_format")?.map(str::to_string),
        dimensions: params.get_i64("dimensions")?,
        user: params.get_str("user")?.map(str::to_string),
    })
}

fn convert_message(message: &Message) -> OpenAiMessage {
    OpenAiMessage {
        role: message.role.clone(),
        content: message.content.clone(),
    }
}
