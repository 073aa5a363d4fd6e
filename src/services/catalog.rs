//! The static reply/knowledge catalog.
//!
//! All business text lives here (keyword tables, canned replies, quick
//! replies, sector compatibility pairs, demo directory) so operators can
//! edit content without touching engine code. The catalog is loaded once at
//! startup from `CHAT_CATALOG_PATH`, falling back to the copy compiled into
//! the binary, and is never mutated afterwards.

use crate::error::AppError;
use crate::models::{ContextType, DemoProfile};
use crate::services::intent::Intent;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default catalog shipped with the service.
const EMBEDDED_CATALOG: &str = include_str!("../../catalog.json");

/// One ordered classification rule: first rule with any keyword hit wins.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// A keyword group and the literal reply it selects.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicGroup {
    pub keywords: Vec<String>,
    pub reply: String,
}

/// Reply templates for one context category.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    /// Keywords that must appear for this context to answer in-scope.
    /// Absent for the general context; when the gate misses, the message
    /// falls through to the general templates.
    #[serde(default)]
    pub gate: Option<Vec<String>>,
    pub topics: Vec<TopicGroup>,
    pub fallback: String,
}

/// A value per context category, with typed lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct PerContext<T> {
    pub general: T,
    pub exhibitor: T,
    pub package: T,
    pub event: T,
}

impl<T> PerContext<T> {
    pub fn get(&self, context: ContextType) -> &T {
        match context {
            ContextType::General => &self.general,
            ContextType::Exhibitor => &self.exhibitor,
            ContextType::Package => &self.package,
            ContextType::Event => &self.event,
        }
    }
}

/// The canned reply returned when the engine fails internally.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackReply {
    pub response: String,
    pub suggested_actions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub intents: Vec<IntentRule>,
    pub sentiment: SentimentLexicon,
    pub contexts: PerContext<ContextEntry>,
    pub suggested_actions: PerContext<Vec<String>>,
    /// Quick-reply tables keyed by language tag, then intent.
    pub quick_replies: HashMap<String, HashMap<Intent, Vec<String>>>,
    pub fallback: FallbackReply,
    /// Unordered sector pairs considered compatible for scoring.
    pub sector_pairs: Vec<(String, String)>,
    pub demo_profiles: Vec<DemoProfile>,
}

impl Catalog {
    /// Load the catalog from a file, or the embedded copy when no path is
    /// configured.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let catalog = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "failed to read catalog file {}: {}",
                        p.display(),
                        e
                    ))
                })?;
                tracing::info!(path = %p.display(), "Loaded reply catalog from file");
                serde_json::from_str::<Catalog>(&raw)?
            }
            None => serde_json::from_str::<Catalog>(EMBEDDED_CATALOG)?,
        };
        catalog.check()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary. Used when no override file is
    /// configured and by tests.
    pub fn embedded() -> Result<Self, AppError> {
        Self::load(None)
    }

    /// Whether the unordered sector pair is in the compatibility table.
    pub fn sectors_compatible(&self, a: &str, b: &str) -> bool {
        self.sector_pairs
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    fn check(&self) -> Result<(), AppError> {
        if self.intents.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "catalog has no intent rules"
            )));
        }
        let fr = self.quick_replies.get("fr").ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("catalog is missing the 'fr' quick replies"))
        })?;
        if !fr.contains_key(&Intent::GeneralInquiry) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "catalog 'fr' quick replies are missing the general_inquiry bucket"
            )));
        }
        Ok(())
    }
}
