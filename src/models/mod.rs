//! Wire types for the chat completions API.

mod completion;
mod message;
mod request;

pub use completion::{ChatChoice, ChatChoiceDelta, ChatChoiceMessage, ChatCompletion};
pub use message::{ChatMessage, ChatMessageRole};
pub use request::ChatCompletionOptions;
