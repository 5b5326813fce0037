//! Message list bookkeeping for a chat session.

use crate::models::{ChatMessage, ChatMessageRole};

/// Ordered list of chat turns plus an optional system prompt.
///
/// The system prompt is kept apart from the turns so `reset` can drop the
/// history without losing it.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    system_prompt: String,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Append one turn.
    pub fn add_message(&mut self, role: ChatMessageRole, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Messages to send, system prompt first when non-empty.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        if !self.system_prompt.is_empty() {
            out.push(ChatMessage::system(self.system_prompt.clone()));
        }
        out.extend(self.messages.iter().cloned());
        out
    }

    /// Drop all turns, keeping the system prompt.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
