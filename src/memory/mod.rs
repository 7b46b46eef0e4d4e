//! 记忆层：消息类型与追加式会话记忆

pub mod message;
pub mod store;

pub use message::{Message, Role};
pub use store::{MemoryEntry, MemoryStore};
