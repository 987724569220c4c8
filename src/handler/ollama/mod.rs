use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::LLMError;
use crate::handler::{
    ChatHandler, EmbeddingHandler, GenerationHandler, collect_error_body, status_error,
};
use crate::http::{DynHttpTransport, post_json, post_json_stream};
use crate::params::ParameterBag;
use crate::result::UnifiedResult;
use crate::stream::ResultStream;

mod request;
mod response;
mod stream;
pub mod types;

pub(crate) const PROVIDER: &str = "ollama";

const CHAT_PATH: &str = "/api/chat";
const GENERATE_PATH: &str = "/api/generate";
const EMBED_PATH: &str = "/api/embed";

fn headers() -> HashMap<String, String> {
    // Content-Type 由 post_json 统一填充 本地后端无需鉴权
    HashMap::new()
}

/// Ollama 聊天 Handler
pub struct OllamaChatHandler {
    transport: DynHttpTransport,
    base_url: String,
}

impl OllamaChatHandler {
    pub fn new(transport: DynHttpTransport, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }
}

#[async_trait]
impl ChatHandler for OllamaChatHandler {
    async fn chat(&self, params: ParameterBag) -> Result<ResultStream, LLMError> {
        let body = request::build_chat_request(&params)?;
        let url = format!("{}{CHAT_PATH}", self.base_url);
        let response = post_json_stream(self.transport.as_ref(), url, headers(), &body).await?;
        if !(200..300).contains(&response.status) {
            let text = collect_error_body(response.body).await;
            return Err(status_error(PROVIDER, response.status, &text));
        }
        Ok(stream::create_chat_stream(response.body))
    }
}

/// Ollama 文本续写 Handler
pub struct OllamaGenerationHandler {
    transport: DynHttpTransport,
    base_url: String,
}

impl OllamaGenerationHandler {
    pub fn new(transport: DynHttpTransport, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }
}

#[async_trait]
impl GenerationHandler for OllamaGenerationHandler {
    async fn generate(&self, params: ParameterBag) -> Result<ResultStream, LLMError> {
        let body = request::build_generate_request(&params)?;
        let url = format!("{}{GENERATE_PATH}", self.base_url);
        let response = post_json_stream(self.transport.as_ref(), url, headers(), &body).await?;
        if !(200..300).contains(&response.status) {
            let text = collect_error_body(response.body).await;
            return Err(status_error(PROVIDER, response.status, &text));
        }
        Ok(stream::create_generate_stream(response.body))
    }
}

/// Ollama 向量化 Handler
pub struct OllamaEmbeddingHandler {
    transport: DynHttpTransport,
    base_url: String,
}

impl OllamaEmbeddingHandler {
    pub fn new(transport: DynHttpTransport, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }
}

#[async_trait]
impl EmbeddingHandler for OllamaEmbeddingHandler {
    async fn embed(&self, params: ParameterBag) -> Result<UnifiedResult, LLMError> {
        let body = request::build_embed_request(&params)?;
        let url = format!("{}{EMBED_PATH}", self.base_url);
        let response = post_json(self.transport.as_ref(), url, headers(), &body).await?;
        let status = response.status;
        let text = response.into_string()?;
        if !(200..300).contains(&status) {
            return Err(status_error(PROVIDER, status, &text));
        }
        let parsed: types::OllamaEmbedResponse = serde_json::from_str(&text)
            .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {text}")))?;
        Ok(response::normalize_embed(parsed))
    }
}
