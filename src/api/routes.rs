//! API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use super::SharedState;
use crate::analytics::{referral, sequence};
use crate::model::{ActionType, UserId};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// User lookup response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, StatusCode> {
    let Some(user) = state.users.user_by_id(id) else {
        warn!("user {} not found", id);
        return Err(StatusCode::NOT_FOUND);
    };

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name.clone(),
        created_at: user.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    }))
}

/// Per-user action count response
#[derive(Debug, Serialize)]
pub struct ActionCountResponse {
    pub count: usize,
}

/// GET /users/:id/actions/count
///
/// 404 when the user never appears in the action log.
pub async fn action_count(
    State(state): State<SharedState>,
    Path(id): Path<UserId>,
) -> Result<Json<ActionCountResponse>, StatusCode> {
    if !state.actions.user_exists(id) {
        warn!("user {} has no actions", id);
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(ActionCountResponse {
        count: state.actions.count_actions_by_user(id),
    }))
}

/// Next-action probability response
#[derive(Serialize)]
pub struct NextActionProbabilitiesResponse {
    pub probabilities: HashMap<ActionType, f64>,
}

/// GET /actions/:action_type/next
///
/// An unrecognized action type matches nothing in the log and yields an
/// empty probabilities object, not an error.
pub async fn next_action_probabilities(
    State(state): State<SharedState>,
    Path(action_type): Path<String>,
) -> Json<NextActionProbabilitiesResponse> {
    let probabilities = match ActionType::parse(&action_type) {
        Some(target) => {
            sequence::next_action_probabilities(&state.actions.sorted_actions(), target)
        }
        None => HashMap::new(),
    };

    Json(NextActionProbabilitiesResponse { probabilities })
}

/// Referral index response, keyed by user id
#[derive(Serialize)]
pub struct ReferralIndexResponse {
    #[serde(rename = "referralIndex")]
    pub referral_index: HashMap<UserId, u64>,
}

/// GET /users/referral-index
pub async fn referral_index(State(state): State<SharedState>) -> Json<ReferralIndexResponse> {
    Json(ReferralIndexResponse {
        referral_index: referral::referral_index(state.actions.all_actions()),
    })
}
