//! Dynamic request parameter container shared by every provider.
//!
//! Keys are provider-agnostic; provider-specific wire names are only introduced by
//! the translators in [`crate::handler`]. No validation happens at insertion time —
//! type errors surface lazily when a translator extracts the value.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LLMError;

/// Single chat message exchanged with a backend.
///
/// The shape matches the Ollama wire format directly; the OpenAI translator
/// converts it on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
            images: None,
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Dynamically-typed value stored in a [`ParameterBag`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    StringList(Vec<String>),
    Messages(Vec<Message>),
    Map(Map<String, Value>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<Vec<Message>> for ParamValue {
    fn from(value: Vec<Message>) -> Self {
        Self::Messages(value)
    }
}

impl From<Map<String, Value>> for ParamValue {
    fn from(value: Map<String, Value>) -> Self {
        Self::Map(value)
    }
}

/// Loosely-typed request container consumed exactly once per call.
///
/// Each typed accessor distinguishes "absent" (`Ok(None)`) from "present with the
/// wrong type" ([`LLMError::InvalidParameter`]), so translators never coerce
/// silently.
///
/// # Examples
///
/// ```
/// use nagare_llm::params::ParameterBag;
///
/// let mut bag = ParameterBag::new();
/// bag.put("model", "llama3");
/// bag.put("temperature", 0.7);
/// assert_eq!(bag.model().unwrap(), Some("llama3"));
/// assert_eq!(bag.get_f64("temperature").unwrap(), Some(0.7));
/// assert_eq!(bag.get_bool("stream").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterBag {
    entries: HashMap<String, ParamValue>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under the given provider-agnostic key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the raw value for the key, if any.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Reserved accessor for the `model` field.
    pub fn model(&self) -> Result<Option<&str>, LLMError> {
        self.get_str("model")
    }

    /// Reserved accessor for the `stream` field.
    pub fn stream(&self) -> Result<Option<bool>, LLMError> {
        self.get_bool("stream")
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(mistyped(key, "a string")),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::Number(value)) => Ok(Some(*value)),
            Some(ParamValue::Integer(value)) => Ok(Some(*value as f64)),
            Some(_) => Err(mistyped(key, "a number")),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::Integer(value)) => Ok(Some(*value)),
            Some(_) => Err(mistyped(key, "an integer")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(mistyped(key, "a boolean")),
        }
    }

    pub fn get_string_list(&self, key: &str) -> Result<Option<&[String]>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::StringList(value)) => Ok(Some(value.as_slice())),
            Some(_) => Err(mistyped(key, "a list of strings")),
        }
    }

    pub fn get_messages(&self, key: &str) -> Result<Option<&[Message]>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::Messages(value)) => Ok(Some(value.as_slice())),
            Some(_) => Err(mistyped(key, "a list of messages")),
        }
    }

    pub fn get_map(&self, key: &str) -> Result<Option<&Map<String, Value>>, LLMError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ParamValue::Map(value)) => Ok(Some(value)),
            Some(_) => Err(mistyped(key, "a map")),
        }
    }

    /// Like [`ParameterBag::get_str`] but fails when the key is absent.
    pub fn require_str(&self, key: &str) -> Result<&str, LLMError> {
        self.get_str(key)?
            .ok_or_else(|| LLMError::invalid_parameter(key, "is required"))
    }

    /// Like [`ParameterBag::get_messages`] but fails when the key is absent.
    pub fn require_messages(&self, key: &str) -> Result<&[Message], LLMError> {
        self.get_messages(key)?
            .ok_or_else(|| LLMError::invalid_parameter(key, "is required"))
    }
}

fn mistyped(key: &str, expected: &str) -> LLMError {
    LLMError::invalid_parameter(key, format!("must be {expected}"))
}
