use serde::{Deserialize, Serialize};

/// Ollama 默认监听地址
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
/// OpenAI 默认接口地址
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// 供应商标识 Custom 仅携带名称 没有注册任何 translator/decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderIdentity {
    Ollama,
    OpenAi,
    Custom(String),
}

impl ProviderIdentity {
    /// 从实例字符串解析 未知名称归入 Custom
    pub fn parse(instance: &str) -> Self {
        match instance.to_ascii_lowercase().as_str() {
            "ollama" => Self::Ollama,
            "openai" => Self::OpenAi,
            _ => Self::Custom(instance.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Custom(name) => name.as_str(),
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => DEFAULT_OPENAI_BASE_URL,
            _ => DEFAULT_OLLAMA_BASE_URL,
        }
    }
}

/// 鉴权信息 当前仅支持 Bearer Token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Handler 解析所需的全部配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    pub identity: ProviderIdentity,
    /// 留空时按 identity 取默认地址
    pub base_url: Option<String>,
    pub credential: Option<Credential>,
}

impl HandlerConfig {
    pub fn new(identity: ProviderIdentity) -> Self {
        Self {
            identity,
            base_url: None,
            credential: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// 返回去掉末尾斜杠的 base_url
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.identity.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}
