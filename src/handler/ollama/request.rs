//! Translators from the generic [`ParameterBag`] to Ollama wire requests.

use crate::error::LLMError;
use crate::handler::input_values;
use crate::params::ParameterBag;

use super::types::{OllamaChatRequest, OllamaEmbedRequest, OllamaGenerateRequest, OllamaOptions};

pub(crate) fn build_chat_request(params: &ParameterBag) -> Result<OllamaChatRequest, LLMError> {
    Ok(OllamaChatRequest {
        model: params.require_str("model")?.to_string(),
        messages: params.require_messages("messages")?.to_vec(),
        tools: params.get_str("tools")?.map(str::to_string),
        stream: params.stream()?,
    })
}

pub(crate) fn build_generate_request(
    params: &ParameterBag,
) -> Result<OllamaGenerateRequest, LLMError> {
    Ok(OllamaGenerateRequest {
        model: params.require_str("model")?.to_string(),
        prompt: params.require_str("prompt")?.to_string(),
        suffix: params.get_str("suffix")?.map(str::to_string),
        stream: params.stream()?,
        options: collect_options(params)?,
    })
}

pub(crate) fn build_embed_request(params: &ParameterBag) -> Result<OllamaEmbedRequest, LLMError> {
    Ok(OllamaEmbedRequest {
        model: params.require_str("model")?.to_string(),
        input: input_values(params)?,
        truncate: params.get_bool("truncate")?,
        options: collect_options(params)?,
    })
}

/// Maps the generic tuning keys onto Ollama's nested `options` object. Generic
/// `max_tokens` becomes `num_predict` on this wire.
fn collect_options(params: &ParameterBag) -> Result<Option<OllamaOptions>, LLMError> {
    let options = OllamaOptions {
        seed: params.get_i64("seed")?,
        num_predict: params.get_i64("max_tokens")?,
        top_k: params.get_i64("top_k")?,
        top_p: params.get_f64("top_p")?,
        temperature: params.get_f64("temperature")?,
        repeat_penalty: params.get_f64("repeat_penalty")?,
        presence_penalty: params.get_f64("presence_penalty")?,
        frequency_penalty: params.get_f64("frequency_penalty")?,
        stop: params.get_string_list("stop")?.map(<[String]>::to_vec),
    };
    Ok(if options.is_empty() {
        None
    } else {
        Some(options)
    })
}
