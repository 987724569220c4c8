use async_trait::async_trait;
use futures_util::StreamExt;

use crate::error::LLMError;
use crate::http::HttpBodyStream;
use crate::params::ParameterBag;
use crate::result::UnifiedResult;
use crate::stream::ResultStream;

pub mod factory;
pub mod ollama;
pub mod openai;

pub use factory::HandlerFactory;

/// 能力类型 一个 provider 可支持的操作形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Chat,
    Generation,
    Embeddings,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Generation => "generation",
            Self::Embeddings => "embeddings",
        }
    }
}

/// 聊天 Handler 以流式返回增量结果
#[async_trait]
pub trait ChatHandler: Send + Sync {
    async fn chat(&self, params: ParameterBag) -> Result<ResultStream, LLMError>;
}

/// 文本续写 Handler 以流式返回增量结果
#[async_trait]
pub trait GenerationHandler: Send + Sync {
    async fn generate(&self, params: ParameterBag) -> Result<ResultStream, LLMError>;
}

/// 向量化 Handler 返回单个结果
#[async_trait]
pub trait EmbeddingHandler: Send + Sync {
    async fn embed(&self, params: ParameterBag) -> Result<UnifiedResult, LLMError>;
}

/// 取 input 字段 单个字符串按单元素列表处理
pub(crate) fn input_values(params: &ParameterBag) -> Result<Vec<String>, LLMError> {
    use crate::params::ParamValue;

    match params.get("input") {
        Some(ParamValue::String(value)) => Ok(vec![value.clone()]),
        Some(ParamValue::StringList(values)) => Ok(values.clone()),
        Some(_) => Err(LLMError::invalid_parameter(
            "input",
            "must be a string or a list of strings",
        )),
        None => Err(LLMError::invalid_parameter("input", "is required")),
    }
}

/// 读取出错响应体 尽力而为 不再关心传输错误
pub(crate) async fn collect_error_body(mut body: HttpBodyStream) -> String {
    let mut bytes = Vec::new();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(part) => bytes.extend_from_slice(&part),
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

pub(crate) fn status_error(provider: &'static str, status: u16, body: &str) -> LLMError {
    LLMError::transport(format!("{provider} returned status {status}: {body}"))
}
