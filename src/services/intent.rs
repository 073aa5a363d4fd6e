//! Keyword-driven intent and sentiment classification.
//!
//! Deliberately non-probabilistic: the classifier walks the catalog's
//! ordered rule list and the first rule with any substring hit wins. List
//! order is the tie-break for overlapping keyword sets, so reordering the
//! catalog changes observable classification.

use crate::services::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// Coarse label for what a message is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    InfoPackages,
    InfoEvent,
    Networking,
    TechnicalHelp,
    Matching,
    Navigation,
    Greeting,
    Goodbye,
    GeneralInquiry,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::InfoPackages => "info_packages",
            Intent::InfoEvent => "info_event",
            Intent::Networking => "networking",
            Intent::TechnicalHelp => "technical_help",
            Intent::Matching => "matching",
            Intent::Navigation => "navigation",
            Intent::Greeting => "greeting",
            Intent::Goodbye => "goodbye",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }

    /// Lenient wire-name lookup; anything unrecognized is `GeneralInquiry`.
    pub fn parse(name: &str) -> Intent {
        match name {
            "info_packages" => Intent::InfoPackages,
            "info_event" => Intent::InfoEvent,
            "networking" => Intent::Networking,
            "technical_help" => Intent::TechnicalHelp,
            "matching" => Intent::Matching,
            "navigation" => Intent::Navigation,
            "greeting" => Intent::Greeting,
            "goodbye" => Intent::Goodbye,
            _ => Intent::GeneralInquiry,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a message against the catalog's ordered intent rules.
/// No rule matching yields `GeneralInquiry`.
pub fn classify(catalog: &Catalog, message: &str) -> Intent {
    let lower = message.to_lowercase();
    catalog
        .intents
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw.as_str())))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::GeneralInquiry)
}

/// Bounded sentiment heuristic in [-1, 1].
///
/// Each lexicon word present in the message contributes one point
/// (presence, not occurrence count); the sum is normalized by the
/// whitespace word count and clamped. An empty message scores exactly 0.
pub fn sentiment(catalog: &Catalog, message: &str) -> f32 {
    let word_count = message.split_whitespace().count();
    if word_count == 0 {
        return 0.0;
    }

    let lower = message.to_lowercase();
    let mut score = 0.0f32;
    for word in &catalog.sentiment.positive {
        if lower.contains(word.as_str()) {
            score += 1.0;
        }
    }
    for word in &catalog.sentiment.negative {
        if lower.contains(word.as_str()) {
            score -= 1.0;
        }
    }

    (score / word_count as f32 * 10.0).clamp(-1.0, 1.0)
}
