//! Fluent request builders with eager range validation.
//!
//! Builders are the only place early validation happens: numeric ranges are
//! checked at the setter, so an out-of-range value fails before a
//! [`ParameterBag`] is even produced. Translators trust builder-produced bags but
//! still re-validate hand-built ones.

use crate::error::LLMError;
use crate::params::{Message, ParamValue, ParameterBag};

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), LLMError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LLMError::invalid_parameter(
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}

/// Builder for chat requests.
///
/// # Examples
///
/// ```
/// use nagare_llm::ChatRequestBuilder;
///
/// let bag = ChatRequestBuilder::new()
///     .model("llama3")
///     .system_message("You are a helpful assistant.")
///     .user_message("hi")
///     .temperature(0.7)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(bag.model().unwrap(), Some("llama3"));
/// ```
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    model: Option<String>,
    messages: Vec<Message>,
    temperature: Option<f64>,
    max_tokens: Option<i64>,
    top_p: Option<f64>,
    frequency_penalty: Option<f64>,
    presence_penalty: Option<f64>,
    stop: Option<Vec<String>>,
    stream: bool,
    user: Option<String>,
    additional: Vec<(String, ParamValue)>,
}

impl ChatRequestBuilder {
    pub fn new() -> Self {
        Self {
            stream: true,
            ..Self::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn system_message(self, content: impl Into<String>) -> Self {
        self.message(Message::new("system", content))
    }

    pub fn user_message(self, content: impl Into<String>) -> Self {
        self.message(Message::new("user", content))
    }

    pub fn assistant_message(self, content: impl Into<String>) -> Self {
        self.message(Message::new("assistant", content))
    }

    pub fn temperature(mut self, temperature: f64) -> Result<Self, LLMError> {
        check_range("temperature", temperature, 0.0, 2.0)?;
        self.temperature = Some(temperature);
        Ok(self)
    }

    pub fn max_tokens(mut self, max_tokens: i64) -> Result<Self, LLMError> {
        if max_tokens <= 0 {
            return Err(LLMError::invalid_parameter(
                "max_tokens",
                "must be positive",
            ));
        }
        self.max_tokens = Some(max_tokens);
        Ok(self)
    }

    pub fn top_p(mut self, top_p: f64) -> Result<Self, LLMError> {
        check_range("top_p", top_p, 0.0, 1.0)?;
        self.top_p = Some(top_p);
        Ok(self)
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Result<Self, LLMError> {
        check_range("frequency_penalty", penalty, -2.0, 2.0)?;
        self.frequency_penalty = Some(penalty);
        Ok(self)
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Result<Self, LLMError> {
        check_range("presence_penalty", penalty, -2.0, 2.0)?;
        self.presence_penalty = Some(penalty);
        Ok(self)
    }

    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn streaming(mut self, enabled: bool) -> Self {
        self.stream = enabled;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Escape hatch for provider-specific parameters not covered by a setter.
    pub fn additional_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.additional.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<ParameterBag, LLMError> {
        let model = self
            .model
            .ok_or_else(|| LLMError::invalid_parameter("model", "is required"))?;
        if self.messages.is_empty() {
            return Err(LLMError::invalid_parameter(
                "messages",
                "at least one message is required",
            ));
        }

        let mut bag = ParameterBag::new();
        bag.put("model", model);
        bag.put("messages", self.messages);
        if let Some(value) = self.temperature {
            bag.put("temperature", value);
        }
        if let Some(value) = self.max_tokens {
            bag.put("max_tokens", value);
        }
        if let Some(value) = self.top_p {
            bag.put("top_p", value);
        }
        if let Some(value) = self.frequency_penalty {
            bag.put("frequency_penalty", value);
        }
        if let Some(value) = self.presence_penalty {
            bag.put("presence_penalty", value);
        }
        if let Some(value) = self.stop {
            bag.put("stop", value);
        }
        bag.put("stream", self.stream);
        if let Some(value) = self.user {
            bag.put("user", value);
        }
        for (key, value) in self.additional {
            bag.put(key, value);
        }
        Ok(bag)
    }
}

/// Builder for text completion requests.
#[derive(Default)]
pub struct CompletionRequestBuilder {
    model: Option<String>,
    prompt: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<i64>,
    top_p: Option<f64>,
    frequency_penalty: Option<f64>,
    presence_penalty: Option<f64>,
    stop: Option<Vec<String>>,
    stream: bool,
    suffix: Option<String>,
    user: Option<String>,
    additional: Vec<(String, ParamValue)>,
}

impl CompletionRequestBuilder {
    pub fn new() -> Self {
        Self {
            stream: true,
            ..Self::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Result<Self, LLMError> {
        check_range("temperature", temperature, 0.0, 2.0)?;
        self.temperature = Some(temperature);
        Ok(self)
    }

    pub fn max_tokens(mut self, max_tokens: i64) -> Result<Self, LLMError> {
        if max_tokens <= 0 {
            return Err(LLMError::invalid_parameter(
                "max_tokens",
                "must be positive",
            ));
        }
        self.max_tokens = Some(max_tokens);
        Ok(self)
    }

    pub fn top_p(mut self, top_p: f64) -> Result<Self, LLMError> {
        check_range("top_p", top_p, 0.0, 1.0)?;
        self.top_p = Some(top_p);
        Ok(self)
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Result<Self, LLMError> {
        check_range("frequency_penalty", penalty, -2.0, 2.0)?;
        self.frequency_penalty = Some(penalty);
        Ok(self)
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Result<Self, LLMError> {
        check_range("presence_penalty", penalty, -2.0, 2.0)?;
        self.presence_penalty = Some(penalty);
        Ok(self)
    }

    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn streaming(mut self, enabled: bool) -> Self {
        self.stream = enabled;
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn additional_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.additional.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<ParameterBag, LLMError> {
        let model = self
            .model
            .ok_or_else(|| LLMError::invalid_parameter("model", "is required"))?;
        let prompt = self
            .prompt
            .ok_or_else(|| LLMError::invalid_parameter("prompt", "is required"))?;

        let mut bag = ParameterBag::new();
        bag.put("model", model);
        bag.put("prompt", prompt);
        if let Some(value) = self.temperature {
            bag.put("temperature", value);
        }
        if let Some(value) = self.max_tokens {
            bag.put("max_tokens", value);
        }
        if let Some(value) = self.top_p {
            bag.put("top_p", value);
        }
        if let Some(value) = self.frequency_penalty {
            bag.put("frequency_penalty", value);
        }
        if let Some(value) = self.presence_penalty {
            bag.put("presence_penalty", value);
        }
        if let Some(value) = self.stop {
            bag.put("stop", value);
        }
        bag.put("stream", self.stream);
        if let Some(value) = self.suffix {
            bag.put("suffix", value);
        }
        if let Some(value) = self.user {
            bag.put("user", value);
        }
        for (key, value) in self.additional {
            bag.put(key, value);
        }
        Ok(bag)
    }
}

/// Builder for embedding requests.
#[derive(Default)]
pub struct EmbeddingRequestBuilder {
    model: Option<String>,
    input: Vec<String>,
    encoding_format: Option<String>,
    dimensions: Option<i64>,
    user: Option<String>,
    truncate: Option<bool>,
    additional: Vec<(String, ParamValue)>,
}

impl EmbeddingRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input.push(input.into());
        self
    }

    pub fn inputs(mut self, inputs: Vec<String>) -> Self {
        self.input.extend(inputs);
        self
    }

    pub fn encoding_format(mut self, format: impl Into<String>) -> Self {
        self.encoding_format = Some(format.into());
        self
    }

    pub fn dimensions(mut self, dimensions: i64) -> Result<Self, LLMError> {
        if dimensions <= 0 {
            return Err(LLMError::invalid_parameter(
                "dimensions",
                "must be positive",
            ));
        }
        self.dimensions = Some(dimensions);
        Ok(self)
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
        self
    }

    pub fn additional_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.additional.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<ParameterBag, LLMError> {
        let model = self
            .model
            .ok_or_else(|| LLMError::invalid_parameter("model", "is required"))?;
        if self.input.is_empty() {
            return Err(LLMError::invalid_parameter(
                "input",
                "at least one input is required",
            ));
        }

        let mut bag = ParameterBag::new();
        bag.put("model", model);
        bag.put("input", self.input);
        if let Some(value) = self.encoding_format {
            bag.put("encoding_format", value);
        }
        if let Some(value) = self.dimensions {
            bag.put("dimensions", value);
        }
        if let Some(value) = self.user {
            bag.put("user", value);
        }
        if let Some(value) = self.truncate {
            bag.put("truncate", value);
        }
        for (key, value) in self.additional {
            bag.put(key, value);
        }
        Ok(bag)
    }
}
