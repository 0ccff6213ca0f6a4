mod context;
mod message;

pub use context::{ConversationStore, MemoryStore, SessionId};
pub use message::{ChatMessage, MessageRole};
