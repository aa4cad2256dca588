use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single question/response exchange within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The user's (trimmed) question
    pub question: String,
    /// The model's (trimmed) answer
    pub response: String,
}

impl Message {
    /// Create a new exchange
    pub fn new(question: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
        }
    }
}

/// A chat session grouping exchanges under one chat identifier
///
/// `timestamp` is the session creation time, kept as the string found on
/// disk so logs written by other tools round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque chat identifier, unique within the session log
    pub chat_id: String,
    /// Creation time (naive UTC ISO-8601)
    pub timestamp: String,
    /// Exchanges in chronological order
    pub messages: Vec<Message>,
}

impl Session {
    /// Create an empty session stamped with the current UTC time
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            timestamp: utc_timestamp(),
            messages: Vec::new(),
        }
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.ffffff` (no offset suffix)
pub fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
