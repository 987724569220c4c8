use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::Credential;
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

pub(crate) const PROVIDER: &str = "openai";

const CHAT_PATH: &str = "/v1/chat/completions";
const COMPLETIONS_PATH: &str = "/v1/completions";
const EMBEDDINGS_PATH: &str = "/v1/embeddings";

fn bearer_headers(credential: &Credential) -> HashMap<String, String> {
    HashMap::from([(
        "Authorization".to_string(),
        format!("Bearer {}", credential.token),
    )])
}

/// OpenAI 聊天 Handler
pub struct OpenAiChatHandler {
    transport: DynHttpTransport,
    base_url: String,
    credential: Credential,
}

impl OpenAiChatHandler {
    pub fn new(transport: DynHttpTransport, base_url: String, credential: Credential) -> Self {
        Self {
            transport,
            base_url,
            credential,
        }
    }
}

#[async_trait]
impl ChatHandler for OpenAiChatHandler {
    async fn chat(&self, params: ParameterBag) -> Result<ResultStream, LLMError> {
        let body = request::build_chat_request(&params)?;
        let url = format!("{}{CHAT_PATH}", self.base_url);
        let response = post_json_stream(
            self.transport.as_ref(),
            url,
            bearer_headers(&self.credential),
            &body,
        )
        .await?;
        if !(200..300).contains(&response.status) {
            let text = collect_error_body(response.body).await;
            return Err(status_error(PROVIDER, response.status, &text));
        }
        Ok(stream::create_chat_stream(response.body))
    }
}

/// OpenAI 文本续写 Handler
pub struct OpenAiGenerationHandler {
    transport: DynHttpTransport,
    base_url: String,
    credential: Credential,
}

impl OpenAiGenerationHandler {
    pub fn new(transport: DynHttpTransport, base_url: String, credential: Credential) -> Self {
        Self {
            transport,
            base_url,
            credential,
        }
    }
}

#[async_trait]
impl GenerationHandler for OpenAiGenerationHandler {
    async fn generate(&self, params: ParameterBag) -> Result<ResultStream, LLMError> {
        let body = request::build_completion_request(&params)?;
        let url = format!("{}{COMPLETIONS_PATH}", self.base_url);
        let response = post_json_stream(
            self.transport.as_ref(),
            url,
            bearer_headers(&self.credential),
            &body,
        )
        .await?;
        if !(200..300).contains(&response.status) {
            let text = collect_error_body(response.body).await;
            return Err(status_error(PROVIDER, response.status, &text));
        }
        Ok(stream::create_completion_stream(response.body))
    }
}

/// OpenAI 向量化 Handler
pub struct OpenAiEmbeddingHandler {
    transport: DynHttpTransport,
    base_url: String,
    credential: Credential,
}

impl OpenAiEmbeddingHandler {
    pub fn new(transport: DynHttpTransport, base_url: String, credential: Credential) -> Self {
        Self {
            transport,
            base_url,
            credential,
        }
    }
}

#[async_trait]
impl EmbeddingHandler for OpenAiEmbeddingHandler {
    async fn embed(&self, params: ParameterBag) -> Result<UnifiedResult, LLMError> {
        let body = request::build_embedding_request(&params)?;
        let url = format!("{}{EMBEDDINGS_PATH}", self.base_url);
        let response = post_json(
            self.transport.as_ref(),
            url,
            bearer_headers(&self.credential),
            &body,
        )
        .await?;
        let status = response.status;
        let text = response.into_string()?;
        if !(200..300).contains(&status) {
            return Err(status_error(PROVIDER, status, &text));
        }
        let parsed: types::OpenAiEmbeddingResponse = serde_json::from_str(&text)
            .map_err(|err| LLMError::decode(PROVIDER, format!("{err}: {text}")))?;
        Ok(response::normalize_embedding_response(parsed))
    }
}
