//! HTTP handlers for the matching and networking endpoints.

use crate::models::{CompatibilityRequest, CompatibilityScore, ProfileFilters, ScoredProfile};
use crate::services::matching;
use crate::startup::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// Deterministic compatibility between two profiles. Total: missing fields
/// default to neutral buckets and the score is always in [0, 100].
#[tracing::instrument(skip(state, request))]
pub async fn calculate_compatibility(
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Json<CompatibilityScore> {
    Json(matching::compatibility(
        state.engine.catalog(),
        &request.profile_a,
        &request.profile_b,
    ))
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ScoredProfile>,
}

/// Demo networking listing scored by the randomized sample path.
pub async fn networking_profiles(
    State(state): State<AppState>,
    Json(filters): Json<ProfileFilters>,
) -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        profiles: state.engine.demo_profiles(&filters),
    })
}
