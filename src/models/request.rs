use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Request body for the chat completions endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionOptions {
    /// Upper bound on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Conversation so far, system prompt first
    pub messages: Vec<ChatMessage>,
    /// Model identifier, e.g. `openai/gpt-4.1`
    pub model: String,
    /// Whether the response should be streamed as SSE.
    ///
    /// The client decides this from the model; whatever the caller sets is
    /// overwritten before sending.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stream: bool,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ChatCompletionOptions {
    /// Create options for `model` with the given messages.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            max_tokens: None,
            messages,
            model: model.into(),
            stream: false,
            temperature: None,
            top_p: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
}
