//! The chat orchestrator.
//!
//! Per-request pipeline: resolve session id, append the user exchange,
//! classify, generate the reply, append it, attach suggestions. The one
//! hard contract here is the failure path: anything that goes wrong inside
//! the pipeline degrades to the catalog's canned apology with confidence
//! 0.0 and a populated session id. Chat never surfaces internal errors to
//! the caller.

use crate::config::SessionSettings;
use crate::models::{ChatRequest, ChatResponse, Exchange, ProfileFilters, ScoredProfile};
use crate::services::catalog::Catalog;
use crate::services::{intent, matching, responder, session_store::SessionStore, suggestions};
use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Session id used on error paths when no id could be resolved.
const ERROR_SESSION_ID: &str = "error_session";

/// The conversational engine. Constructed once at startup and shared
/// through application state; tests build isolated instances (optionally
/// with a fixed rng seed).
pub struct ChatEngine {
    catalog: Catalog,
    store: SessionStore,
    settings: SessionSettings,
    rng: Mutex<StdRng>,
}

impl ChatEngine {
    pub fn new(catalog: Catalog, settings: SessionSettings) -> Self {
        Self {
            store: SessionStore::new(settings.history_limit),
            catalog,
            settings,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Engine with a fixed rng seed, for deterministic tests of the
    /// randomized paths.
    pub fn with_seed(catalog: Catalog, settings: SessionSettings, seed: u64) -> Self {
        Self {
            store: SessionStore::new(settings.history_limit),
            catalog,
            settings,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handle one chat exchange end to end.
    pub fn exchange(&self, request: &ChatRequest) -> ChatResponse {
        let session_id = resolve_session_id(request.session_id.as_deref());

        match self.exchange_inner(&session_id, request) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(session_id = %session_id, error = %err, "Chat pipeline failed, degrading to canned reply");
                self.degraded(request, &session_id)
            }
        }
    }

    fn exchange_inner(
        &self,
        session_id: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, anyhow::Error> {
        let language = &self.settings.default_language;

        let intent = intent::classify(&self.catalog, &request.message);
        let sentiment = intent::sentiment(&self.catalog, &request.message);
        tracing::debug!(
            session_id = %session_id,
            intent = %intent,
            sentiment = sentiment,
            context = request.context.as_str(),
            "Classified inbound message"
        );

        self.store.append(
            session_id,
            request.user_id.as_deref(),
            language,
            Exchange::user(request.message.clone(), intent, sentiment),
        );

        let history = self.store.history(session_id);
        let window_start = history.len().saturating_sub(self.settings.context_window);
        let response =
            responder::respond(&self.catalog, &request.message, request.context, &history[window_start..]);

        let confidence = self.draw_confidence()?;

        self.store.append(
            session_id,
            request.user_id.as_deref(),
            language,
            Exchange::assistant(response.clone()),
        );

        Ok(ChatResponse {
            response,
            context: request.context,
            confidence: Some(confidence),
            suggested_actions: suggestions::suggested_actions(&self.catalog, request.context),
            session_id: session_id.to_string(),
            timestamp: epoch_seconds(),
        })
    }

    /// The fixed degraded reply for pipeline failures.
    fn degraded(&self, request: &ChatRequest, session_id: &str) -> ChatResponse {
        let session_id = if session_id.is_empty() {
            ERROR_SESSION_ID
        } else {
            session_id
        };
        ChatResponse {
            response: self.catalog.fallback.response.clone(),
            context: request.context,
            confidence: Some(0.0),
            suggested_actions: self.catalog.fallback.suggested_actions.clone(),
            session_id: session_id.to_string(),
            timestamp: epoch_seconds(),
        }
    }

    /// Mock-mode confidence: uniform in [0.80, 0.95), two decimals.
    fn draw_confidence(&self) -> Result<f64, anyhow::Error> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow!("confidence rng lock poisoned"))?;
        let raw: f64 = rng.gen_range(0.80..0.95);
        Ok((raw * 100.0).round() / 100.0)
    }

    /// Score the catalog's demo directory for the networking listing.
    /// This is the randomized sample path, isolated from the deterministic
    /// scorer by construction.
    pub fn demo_profiles(&self, filters: &ProfileFilters) -> Vec<ScoredProfile> {
        let mut scored: Vec<ScoredProfile> = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            self.catalog
                .demo_profiles
                .iter()
                .map(|profile| ScoredProfile {
                    compatibility: matching::sample_compatibility(
                        filters.viewer_role,
                        profile.role,
                        &mut *rng,
                    ),
                    profile: profile.clone(),
                })
                .collect()
        };

        scored.retain(|p| p.compatibility >= filters.compatibility_min);
        scored.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
        scored.truncate(20);
        scored
    }

    /// Number of live sessions, for the chatbot health surface.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }
}

/// Use the caller's session id when supplied, otherwise mint a random one.
/// Random rather than time-derived so concurrent anonymous callers cannot
/// collide.
fn resolve_session_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("session_{}", uuid::Uuid::new_v4()),
    }
}

fn epoch_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContextType, ExchangeRole, Role};

    fn engine() -> ChatEngine {
        ChatEngine::with_seed(
            Catalog::embedded().unwrap(),
            SessionSettings::default(),
            42,
        )
    }

    fn request(message: &str, context: ContextType, session_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            context,
            user_id: None,
            session_id: session_id.map(str::to_string),
        }
    }

    #[test]
    fn test_exchange_populates_session_id_and_response() {
        let engine = engine();
        let response = engine.exchange(&request("Bonjour", ContextType::General, None));
        assert!(!response.session_id.is_empty());
        assert!(response.response.contains("Bonjour"));
        assert_eq!(response.context, ContextType::General);
        let confidence = response.confidence.unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!(!response.suggested_actions.is_empty());
    }

    #[test]
    fn test_exchange_reuses_supplied_session_id() {
        let engine = engine();
        let response = engine.exchange(&request("Bonjour", ContextType::General, Some("mine")));
        assert_eq!(response.session_id, "mine");
    }

    #[test]
    fn test_generated_session_ids_are_distinct() {
        let engine = engine();
        let a = engine.exchange(&request("Bonjour", ContextType::General, None));
        let b = engine.exchange(&request("Bonjour", ContextType::General, None));
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_consecutive_exchanges_accumulate_history_in_order() {
        let engine = engine();
        engine.exchange(&request("Bonjour", ContextType::General, Some("s1")));
        engine.exchange(&request("Quel est le prix?", ContextType::Package, Some("s1")));

        let history = engine.store().history("s1");
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, ExchangeRole::User);
        assert_eq!(history[1].role, ExchangeRole::Assistant);
        assert_eq!(history[2].role, ExchangeRole::User);
        assert_eq!(history[3].role, ExchangeRole::Assistant);
        assert_eq!(history[0].content, "Bonjour");
        assert_eq!(history[2].content, "Quel est le prix?");
    }

    #[test]
    fn test_history_capped_across_many_exchanges() {
        let engine = engine();
        for n in 0..30 {
            engine.exchange(&request(
                &format!("message {}", n),
                ContextType::General,
                Some("s1"),
            ));
        }
        assert_eq!(engine.store().history("s1").len(), 20);
    }

    #[test]
    fn test_confidence_is_two_decimals_in_mock_band() {
        let engine = engine();
        for _ in 0..20 {
            let response = engine.exchange(&request("Bonjour", ContextType::General, None));
            let confidence = response.confidence.unwrap();
            assert!((0.80..=0.95).contains(&confidence));
            let scaled = confidence * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_demo_profiles_filter_and_sort() {
        let engine = engine();
        let profiles = engine.demo_profiles(&ProfileFilters {
            viewer_role: Role::Visitor,
            compatibility_min: 60,
        });
        assert!(!profiles.is_empty());
        assert!(profiles.len() <= 20);
        for pair in profiles.windows(2) {
            assert!(pair[0].compatibility >= pair[1].compatibility);
        }
        for p in &profiles {
            assert!((60..=100).contains(&p.compatibility));
        }
    }

    #[test]
    fn test_demo_profiles_respect_min_threshold() {
        let engine = engine();
        let profiles = engine.demo_profiles(&ProfileFilters {
            viewer_role: Role::Visitor,
            compatibility_min: 100,
        });
        for p in &profiles {
            assert_eq!(p.compatibility, 100);
        }
    }
}
