pub mod chat;
pub mod profile;
pub mod session;

pub use chat::{ChatRequest, ChatResponse, ContextType};
pub use profile::{
    CompatibilityRequest, CompatibilityScore, DemoProfile, MatchProfile, ProfileFilters, Role,
    ScoreBreakdown, ScoredProfile,
};
pub use session::{Exchange, ExchangeRole, Session, SessionStats, SessionStatus};
