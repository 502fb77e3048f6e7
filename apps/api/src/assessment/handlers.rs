use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::ranking::{rank_candidates, CandidateAssessment};
use crate::assessment::scoring::FitPolicy;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidatesQuery {
    /// "score" or "response_rate"; defaults to response_rate.
    #[serde(default)]
    pub policy: FitPolicy,
}

#[derive(Debug, Serialize)]
pub struct CandidatesResponse {
    pub opportunity_id: Uuid,
    pub policy: FitPolicy,
    pub candidates: Vec<CandidateAssessment>,
}

/// GET /api/v1/opportunities/:id/candidates
pub async fn handle_ranked_candidates(
    State(state): State<AppState>,
    Path(opportunity_id): Path<Uuid>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let opportunity = state
        .store
        .get_opportunity(opportunity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Opportunity {opportunity_id} not found"))
        })?;

    let applications = state
        .store
        .applications_by_opportunity(opportunity_id)
        .await?;
    let candidates = rank_candidates(&opportunity, &applications, query.policy);

    Ok(Json(CandidatesResponse {
        opportunity_id,
        policy: query.policy,
        candidates,
    }))
}
