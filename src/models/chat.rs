//! Boundary DTOs for the chat endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Caller-declared topic scope. Biases which template group answers the
/// message; it is not inferred from the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    #[default]
    General,
    Exhibitor,
    Package,
    Event,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::General => "general",
            ContextType::Exhibitor => "exhibitor",
            ContextType::Package => "package",
            ContextType::Event => "event",
        }
    }
}

/// Inbound chat message. Validated at the HTTP boundary before it reaches
/// the engine; invalid requests never create a session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000, message = "message must be 1 to 1000 characters"))]
    pub message: String,

    #[serde(default)]
    pub context: ContextType,

    /// Optional user identifier, recorded on the session for follow-up.
    pub user_id: Option<String>,

    /// Existing conversation to continue. A fresh id is generated when absent.
    pub session_id: Option<String>,
}

/// Structured reply. `session_id` is always populated, including on the
/// degraded error path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub context: ContextType,
    pub confidence: Option<f64>,
    pub suggested_actions: Vec<String>,
    pub session_id: String,
    /// Epoch seconds.
    pub timestamp: f64,
}
