//! In-memory session store with bounded per-session history.
//!
//! Backed by a `DashMap` so appends to different sessions never contend and
//! appends to the same session serialize under the entry lock. The trim to
//! the retention limit happens inside the same locked read-modify-write, so
//! a double-submit cannot lose an exchange.

use crate::models::{Exchange, ExchangeRole, Session, SessionStats, SessionStatus};
use dashmap::DashMap;

pub struct SessionStore {
    sessions: DashMap<String, Session>,
    history_limit: usize,
}

impl SessionStore {
    pub fn new(history_limit: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            history_limit,
        }
    }

    /// Append an exchange, creating the session on first use. History is
    /// trimmed to the most recent `history_limit` entries, oldest first.
    pub fn append(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        language: &str,
        exchange: Exchange,
    ) {
        let mut session = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id, user_id, language));
        session.push(exchange, self.history_limit);
    }

    /// Ordered history window for a session; empty when unknown.
    pub fn history(&self, session_id: &str) -> Vec<Exchange> {
        self.sessions
            .get(session_id)
            .map(|s| s.exchanges.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a session including metadata.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    /// Drop a session entirely. Returns whether one existed.
    pub fn clear(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Mark a session ended, keeping its history until cleared.
    /// Returns false for unknown sessions.
    pub fn end(&self, session_id: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.status = SessionStatus::Ended;
                session.last_activity = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    /// Metadata plus aggregate sentiment over the retained user exchanges.
    pub fn stats(&self, session_id: &str) -> Option<SessionStats> {
        self.sessions.get(session_id).map(|session| {
            let sentiments: Vec<f32> = session
                .exchanges
                .iter()
                .filter(|e| e.role == ExchangeRole::User)
                .filter_map(|e| e.sentiment)
                .collect();
            let avg_sentiment = if sentiments.is_empty() {
                0.0
            } else {
                let sum: f32 = sentiments.iter().sum();
                (sum / sentiments.len() as f32 * 100.0).round() / 100.0
            };
            SessionStats {
                session_id: session.session_id.clone(),
                started_at: session.created_at,
                last_activity: session.last_activity,
                language: session.language.clone(),
                status: session.status,
                message_count: session.exchanges.len(),
                avg_sentiment,
            }
        })
    }

    /// Number of live sessions, for the health surface.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::intent::Intent;
    use std::sync::Arc;

    fn user_exchange(n: usize) -> Exchange {
        Exchange::user(format!("message {}", n), Intent::GeneralInquiry, 0.0)
    }

    #[test]
    fn test_history_of_unknown_session_is_empty() {
        let store = SessionStore::new(20);
        assert!(store.history("nope").is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = SessionStore::new(20);
        for n in 0..5 {
            store.append("s1", None, "fr", user_exchange(n));
        }
        let history = store.history("s1");
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].content, "message 0");
        assert_eq!(history[4].content, "message 4");
    }

    #[test]
    fn test_history_never_exceeds_limit() {
        let store = SessionStore::new(20);
        for n in 0..50 {
            store.append("s1", None, "fr", user_exchange(n));
        }
        let history = store.history("s1");
        assert_eq!(history.len(), 20);
        // FIFO eviction: the oldest 30 are gone.
        assert_eq!(history[0].content, "message 30");
        assert_eq!(history[19].content, "message 49");
    }

    #[test]
    fn test_clear_reports_existence() {
        let store = SessionStore::new(20);
        store.append("s1", None, "fr", user_exchange(0));
        assert!(store.clear("s1"));
        assert!(!store.clear("s1"));
        assert!(store.history("s1").is_empty());
    }

    #[test]
    fn test_end_keeps_history_and_append_reactivates() {
        let store = SessionStore::new(20);
        store.append("s1", None, "fr", user_exchange(0));
        assert!(store.end("s1"));
        assert_eq!(store.get("s1").unwrap().status, SessionStatus::Ended);
        assert_eq!(store.history("s1").len(), 1);

        store.append("s1", None, "fr", user_exchange(1));
        assert_eq!(store.get("s1").unwrap().status, SessionStatus::Active);
    }

    #[test]
    fn test_end_unknown_session_is_false() {
        let store = SessionStore::new(20);
        assert!(!store.end("nope"));
    }

    #[test]
    fn test_concurrent_appends_to_same_session_respect_limit() {
        let store = Arc::new(SessionStore::new(20));
        let mut handles = Vec::new();
        for t in 0..8usize {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for n in 0..25usize {
                    store.append("shared", None, "fr", user_exchange(t * 100 + n));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        // 200 appends raced; the trim inside the entry lock must leave
        // exactly the retention limit.
        assert_eq!(store.history("shared").len(), 20);
    }

    #[test]
    fn test_concurrent_appends_to_distinct_sessions_do_not_interfere() {
        let store = Arc::new(SessionStore::new(20));
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let id = format!("session-{}", t);
                for n in 0..10 {
                    store.append(&id, None, "fr", user_exchange(n));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        for t in 0..4 {
            assert_eq!(store.history(&format!("session-{}", t)).len(), 10);
        }
    }

    #[test]
    fn test_stats_averages_user_sentiment() {
        let store = SessionStore::new(20);
        store.append(
            "s1",
            Some("u1"),
            "fr",
            Exchange::user("merci", Intent::GeneralInquiry, 1.0),
        );
        store.append("s1", Some("u1"), "fr", Exchange::assistant("de rien"));
        store.append(
            "s1",
            Some("u1"),
            "fr",
            Exchange::user("bug", Intent::TechnicalHelp, -0.5),
        );
        let stats = store.stats("s1").unwrap();
        assert_eq!(stats.message_count, 3);
        assert!((stats.avg_sentiment - 0.25).abs() < 1e-6);
        assert!(store.stats("nope").is_none());
    }
}
