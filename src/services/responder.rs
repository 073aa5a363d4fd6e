//! Template response selection.
//!
//! Pure function of the message, context category, and the static catalog.
//! Each context has ordered topic keyword groups; the first group with a
//! substring hit selects its literal reply. Non-general contexts are gated:
//! when none of the gate keywords appear, the message is answered by the
//! general templates instead.

use crate::models::{ContextType, Exchange};
use crate::services::catalog::{Catalog, ContextEntry};

pub fn respond(
    catalog: &Catalog,
    message: &str,
    context: ContextType,
    _history: &[Exchange],
) -> String {
    let lower = message.to_lowercase();

    let entry = catalog.contexts.get(context);
    let entry = if in_scope(entry, &lower) {
        entry
    } else {
        catalog.contexts.get(ContextType::General)
    };

    entry
        .topics
        .iter()
        .find(|topic| topic.keywords.iter().any(|kw| lower.contains(kw.as_str())))
        .map(|topic| topic.reply.clone())
        .unwrap_or_else(|| entry.fallback.clone())
}

fn in_scope(entry: &ContextEntry, lower: &str) -> bool {
    match &entry.gate {
        Some(gate) => gate.iter().any(|kw| lower.contains(kw.as_str())),
        None => true,
    }
}
