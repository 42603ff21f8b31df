//! Conversation message types shared between the gateway and its stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user/assistant exchange in a conversation.
///
/// The timestamp is optional on the wire: turns written by older clients may
/// lack one, and the session store backfills it the next time the log is
/// persisted. Once set it is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said.
    pub user: String,
    /// What the assistant replied.
    pub bot: String,
    /// When the turn was durably recorded (RFC 3339, UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time.
    pub fn now(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
            timestamp: Some(Utc::now()),
        }
    }
}
