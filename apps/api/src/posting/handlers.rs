use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::question_key;
use crate::models::opportunity::{Opportunity, OpportunityStatus, SurveyQuestion};
use crate::state::AppState;
use crate::store::ApplicationDraft;

/// GET /api/v1/opportunities/:id
pub async fn handle_get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Opportunity>, AppError> {
    let opportunity = state
        .store
        .get_opportunity(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
    Ok(Json(opportunity))
}

/// GET /api/v1/companies/:company_id/opportunities
pub async fn handle_list_company_opportunities(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<Vec<Opportunity>>, AppError> {
    let opportunities = state.store.opportunities_by_company(&company_id).await?;
    Ok(Json(opportunities))
}

/// POST /api/v1/opportunities/:id/close
pub async fn handle_close_opportunity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.close_opportunity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub survey_responses: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
}

/// POST /api/v1/opportunities/:id/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(opportunity_id): Path<Uuid>,
    Json(req): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    let opportunity = state
        .store
        .get_opportunity(opportunity_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Opportunity {opportunity_id} not found"))
        })?;

    if opportunity.status != OpportunityStatus::Active {
        return Err(AppError::Validation(
            "This opportunity is no longer accepting applications".to_string(),
        ));
    }

    validate_required_responses(&opportunity.survey_questions, &req.survey_responses)?;

    let id = state
        .store
        .submit_application(ApplicationDraft {
            opportunity_id,
            applicant_id: req.applicant_id,
            applicant_name: req.applicant_name,
            applicant_email: req.applicant_email,
            survey_responses: req.survey_responses,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse { id })))
}

/// Every required question must have a non-empty answer at submission time.
fn validate_required_responses(
    questions: &[SurveyQuestion],
    responses: &HashMap<String, String>,
) -> Result<(), AppError> {
    for (i, question) in questions.iter().enumerate() {
        if !question.required {
            continue;
        }
        let answered = responses
            .get(&question_key(i))
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false);
        if !answered {
            return Err(AppError::Validation(format!(
                "A response to question {} is required",
                i + 1
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<SurveyQuestion> {
        vec![
            SurveyQuestion::text("One?"),
            SurveyQuestion::text("Two?"),
        ]
    }

    fn responses(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_required_answered_passes() {
        let rs = responses(&[("question_0", "yes"), ("question_1", "also yes")]);
        assert!(validate_required_responses(&questions(), &rs).is_ok());
    }

    #[test]
    fn test_missing_required_response_rejected() {
        let rs = responses(&[("question_0", "yes")]);
        let err = validate_required_responses(&questions(), &rs).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_whitespace_only_response_rejected() {
        let rs = responses(&[("question_0", "yes"), ("question_1", "   ")]);
        assert!(validate_required_responses(&questions(), &rs).is_err());
    }

    #[test]
    fn test_optional_question_may_be_skipped() {
        let mut qs = questions();
        qs[1].required = false;
        let rs = responses(&[("question_0", "yes")]);
        assert!(validate_required_responses(&qs, &rs).is_ok());
    }
}
