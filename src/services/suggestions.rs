//! Suggested follow-up actions and quick replies.
//!
//! Pure lookups into the catalog; no state, no randomness.

use crate::models::ContextType;
use crate::services::catalog::Catalog;
use crate::services::intent::Intent;

/// Follow-up action labels for a context category, at most four.
pub fn suggested_actions(catalog: &Catalog, context: ContextType) -> Vec<String> {
    let mut actions = catalog.suggested_actions.get(context).clone();
    actions.truncate(4);
    actions
}

/// Quick-reply labels for an intent, at most three. Unknown languages fall
/// back to French, unknown intents to the general bucket.
pub fn quick_replies(catalog: &Catalog, intent: Intent, language: &str) -> Vec<String> {
    let table = catalog
        .quick_replies
        .get(language)
        .or_else(|| catalog.quick_replies.get("fr"));

    let mut replies = table
        .and_then(|t| t.get(&intent).or_else(|| t.get(&Intent::GeneralInquiry)))
        .cloned()
        .unwrap_or_default();
    replies.truncate(3);
    replies
}
