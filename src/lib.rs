//! 本地/云端 LLM 统一流式调用库

pub mod builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod params;
pub mod result;
pub mod stream;

pub use builder::{ChatRequestBuilder, CompletionRequestBuilder, EmbeddingRequestBuilder};
pub use config::{Credential, HandlerConfig, ProviderIdentity};
pub use error::LLMError;
pub use handler::{Capability, ChatHandler, EmbeddingHandler, GenerationHandler, HandlerFactory};
pub use params::{Message, ParamValue, ParameterBag};
pub use result::UnifiedResult;
pub use stream::ResultStream;
