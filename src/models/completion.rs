use serde::{Deserialize, Serialize};

/// Incremental fragment carried by a streamed choice
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatChoiceDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Complete message carried by a non-streamed choice
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// One choice in a chat completion
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatChoice {
    #[serde(default)]
    pub delta: Option<ChatChoiceDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub message: Option<ChatChoiceMessage>,
}

impl ChatChoice {
    /// Text fragment of a streamed choice, if it carries one.
    pub fn delta_content(&self) -> Option<&str> {
        self.delta.as_ref().and_then(|d| d.content.as_deref())
    }
}

/// A chat completion, or one chunk of a streamed completion
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletion {
    /// All delta text fragments in choice order.
    pub fn delta_contents(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().filter_map(ChatChoice::delta_content)
    }
}
