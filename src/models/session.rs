//! In-memory conversation session records.

use crate::services::intent::Intent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

/// One message in a conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub role: ExchangeRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f32>,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    pub fn user(content: impl Into<String>, intent: Intent, sentiment: f32) -> Self {
        Self {
            role: ExchangeRole::User,
            content: content.into(),
            intent: Some(intent),
            sentiment: Some(sentiment),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ExchangeRole::Assistant,
            content: content.into(),
            intent: None,
            sentiment: None,
            timestamp: Utc::now(),
        }
    }
}

/// A conversation thread with bounded history. Soft state: a process
/// restart loses all sessions and callers simply start a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub language: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub exchanges: Vec<Exchange>,
}

impl Session {
    pub fn new(session_id: &str, user_id: Option<&str>, language: &str) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.to_string(),
            user_id: user_id.map(str::to_string),
            language: language.to_string(),
            status: SessionStatus::Active,
            created_at: now,
            last_activity: now,
            exchanges: Vec::new(),
        }
    }

    /// Append an exchange, trimming to the most recent `limit` entries.
    /// Appending to an ended session reactivates it.
    pub fn push(&mut self, exchange: Exchange, limit: usize) {
        self.exchanges.push(exchange);
        if self.exchanges.len() > limit {
            let excess = self.exchanges.len() - limit;
            self.exchanges.drain(0..excess);
        }
        self.status = SessionStatus::Active;
        self.last_activity = Utc::now();
    }
}

/// Session metadata summary for the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub language: String,
    pub status: SessionStatus,
    pub message_count: usize,
    pub avg_sentiment: f32,
}
