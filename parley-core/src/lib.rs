//! Shared types, configuration, and data paths for parley.

pub mod config;
pub mod message;
pub mod paths;

pub use config::{Settings, SettingsError};
pub use message::ConversationTurn;
