// src/modules/chat/mod.rs
//! Chat module - screen state, key handling and the network tasks behind it

pub mod database;
pub mod handler;
pub mod quick_actions;
pub mod service;
pub mod state;

pub use database::{ConversationSummary, Message, MessageStore};
pub use handler::{ChatHandler, Focus};
pub use service::{ChatOutcome, ChatService, ChatTask};
pub use state::ChatState;
