use crate::config::{Credential, HandlerConfig, ProviderIdentity};
use crate::error::LLMError;
use crate::http::DynHttpTransport;

use super::ollama::{OllamaChatHandler, OllamaEmbeddingHandler, OllamaGenerationHandler};
use super::openai::{OpenAiChatHandler, OpenAiEmbeddingHandler, OpenAiGenerationHandler};
use super::{Capability, ChatHandler, EmbeddingHandler, GenerationHandler};

/// 按配置把 (provider, capability) 解析为具体 Handler
///
/// 解析是纯查表 无 I/O 每次调用返回一个轻量 Handler 值
pub struct HandlerFactory {
    config: HandlerConfig,
    transport: DynHttpTransport,
}

impl HandlerFactory {
    pub fn new(config: HandlerConfig, transport: DynHttpTransport) -> Self {
        Self { config, transport }
    }

    /// 指定能力是否有已注册的 translator/decoder
    pub fn supports(&self, _capability: Capability) -> bool {
        // 当前两个内建 provider 支持全部三种能力 Custom 一种都不支持
        !matches!(self.config.identity, ProviderIdentity::Custom(_))
    }

    pub fn chat(&self) -> Result<Box<dyn ChatHandler>, LLMError> {
        match &self.config.identity {
            ProviderIdentity::Ollama => Ok(Box::new(OllamaChatHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
            ))),
            ProviderIdentity::OpenAi => Ok(Box::new(OpenAiChatHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
                self.require_credential()?,
            ))),
            ProviderIdentity::Custom(name) => Err(Self::unsupported(name)),
        }
    }

    pub fn generation(&self) -> Result<Box<dyn GenerationHandler>, LLMError> {
        match &self.config.identity {
            ProviderIdentity::Ollama => Ok(Box::new(OllamaGenerationHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
            ))),
            ProviderIdentity::OpenAi => Ok(Box::new(OpenAiGenerationHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
                self.require_credential()?,
            ))),
            ProviderIdentity::Custom(name) => Err(Self::unsupported(name)),
        }
    }

    pub fn embeddings(&self) -> Result<Box<dyn EmbeddingHandler>, LLMError> {
        match &self.config.identity {
            ProviderIdentity::Ollama => Ok(Box::new(OllamaEmbeddingHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
            ))),
            ProviderIdentity::OpenAi => Ok(Box::new(OpenAiEmbeddingHandler::new(
                self.transport.clone(),
                self.config.resolved_base_url(),
                self.require_credential()?,
            ))),
            ProviderIdentity::Custom(name) => Err(Self::unsupported(name)),
        }
    }

    fn require_credential(&self) -> Result<Credential, LLMError> {
        self.config
            .credential
            .clone()
            .ok_or(LLMError::MissingCredential {
                provider: super::openai::PROVIDER,
            })
    }

    fn unsupported(name: &str) -> LLMError {
        LLMError::UnsupportedProvider {
            name: name.to_string(),
        }
    }
}
