//! Profile records consumed by the compatibility scorer.

use serde::{Deserialize, Serialize};

/// Participant role. `Unknown` is the neutral bucket for absent or
/// unrecognized roles; it contributes no pair bonus and never errors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Visitor,
    Exhibitor,
    Partner,
    #[default]
    Unknown,
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "visitor" => Role::Visitor,
            "exhibitor" => Role::Exhibitor,
            "partner" => Role::Partner,
            _ => Role::Unknown,
        }
    }
}

/// Minimal profile shape the deterministic scorer needs. Missing fields
/// deserialize to the neutral defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchProfile {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub sector: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityRequest {
    pub profile_a: MatchProfile,
    pub profile_b: MatchProfile,
}

/// Additive terms behind a compatibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u8,
    pub sector: u8,
    pub role_pair: u8,
    pub overall: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Entry of the static demo directory scored by the sample (randomized)
/// compatibility path for the networking listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoProfile {
    pub name: String,
    pub role: Role,
    pub sector: String,
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProfile {
    #[serde(flatten)]
    pub profile: DemoProfile,
    pub compatibility: u8,
}

/// Filters for the networking profile listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFilters {
    #[serde(default = "default_viewer_role")]
    pub viewer_role: Role,
    #[serde(default = "default_compatibility_min")]
    pub compatibility_min: u8,
}

fn default_viewer_role() -> Role {
    Role::Visitor
}

fn default_compatibility_min() -> u8 {
    70
}

impl Default for ProfileFilters {
    fn default() -> Self {
        Self {
            viewer_role: default_viewer_role(),
            compatibility_min: default_compatibility_min(),
        }
    }
}
