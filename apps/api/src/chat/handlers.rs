use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::ranking::rank_candidates;
use crate::assessment::scoring::FitPolicy;
use crate::chat::context::{ConversationContext, Workflow};
use crate::chat::prompts::{
    ASSESSMENT_SYNTHESIS_TEMPLATE, ASSESSMENT_SYSTEM, CAREER_GUIDANCE_SYSTEM,
    HIRING_GUIDANCE_SYSTEM, POSTING_CREATION_SYSTEM,
};
use crate::errors::AppError;
use crate::models::user::UserType;
use crate::posting::parser::{parse_opportunity, OPPORTUNITY_MARKER};
use crate::state::AppState;
use crate::store::OpportunityDraft;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_type: Option<UserType>,
    pub task: Option<String>,
    pub company_id: Option<String>,
    pub opportunity_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub workflow: Workflow,
    /// Set when a posting-creation turn produced a persisted opportunity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<Uuid>,
    /// Human-readable note about a non-fatal problem with this turn, e.g. an
    /// incomplete posting draft that needs another round of conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// POST /api/v1/chat — one conversational turn.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let ctx = ConversationContext::resolve(
        &req.message,
        req.user_type,
        req.task.as_deref(),
        req.company_id,
        req.opportunity_id,
    );
    let workflow = ctx.workflow();
    info!("Chat turn routed to {workflow:?}");

    let response = match workflow {
        Workflow::PostingCreation => posting_creation_turn(&state, &ctx).await?,
        Workflow::CandidateAssessment => assessment_turn(&state, &ctx).await?,
        Workflow::CareerGuidance => guidance_turn(&state, &ctx, CAREER_GUIDANCE_SYSTEM).await?,
        Workflow::HiringGuidance => guidance_turn(&state, &ctx, HIRING_GUIDANCE_SYSTEM).await?,
    };
    Ok(Json(response))
}

async fn guidance_turn(
    state: &AppState,
    ctx: &ConversationContext,
    system: &str,
) -> Result<ChatResponse, AppError> {
    let prompt = format!("{}\n\n{}", ctx.prompt_preamble(), ctx.message);
    let reply = state
        .llm
        .complete(&prompt, system)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;
    Ok(ChatResponse {
        reply,
        workflow: ctx.workflow(),
        opportunity_id: None,
        notice: None,
    })
}

/// Posting creation: if the model's reply carries a complete marker block,
/// parse and persist it; on an incomplete block nothing is persisted and the
/// caller is told to keep the conversation going.
async fn posting_creation_turn(
    state: &AppState,
    ctx: &ConversationContext,
) -> Result<ChatResponse, AppError> {
    let prompt = format!("{}\n\n{}", ctx.prompt_preamble(), ctx.message);
    let reply = state
        .llm
        .complete(&prompt, POSTING_CREATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    if !reply.contains(OPPORTUNITY_MARKER) {
        return Ok(ChatResponse {
            reply,
            workflow: Workflow::PostingCreation,
            opportunity_id: None,
            notice: None,
        });
    }

    match parse_opportunity(&reply) {
        Ok(parsed) => {
            tracing::debug!("Parsed opportunity block:\n{}", parsed.to_block_text());
            let company_id = ctx.company_id.clone().ok_or_else(|| {
                AppError::Validation(
                    "A company ID is required to publish an opportunity".to_string(),
                )
            })?;
            let id = state
                .store
                .create_opportunity(OpportunityDraft {
                    company_id,
                    title: parsed.title,
                    description: parsed.description,
                    requirements: parsed.requirements,
                    location: parsed.location,
                    employment_type: parsed.employment_type,
                    salary_range: parsed.salary_range,
                    survey_questions: parsed.survey_questions,
                })
                .await?;
            Ok(ChatResponse {
                reply,
                workflow: Workflow::PostingCreation,
                opportunity_id: Some(id),
                notice: Some("Your opportunity has been published.".to_string()),
            })
        }
        Err(e) => {
            // Never persist a partial record; ask for another round instead.
            warn!("Opportunity block failed to parse: {e}");
            Ok(ChatResponse {
                reply,
                workflow: Workflow::PostingCreation,
                opportunity_id: None,
                notice: Some(format!(
                    "The posting draft is not complete yet ({e}). \
                     Please continue the conversation to fill in the missing details."
                )),
            })
        }
    }
}

/// Assessment: deterministic ranking first, then one narrative-synthesis
/// completion over the ranked output.
async fn assessment_turn(
    state: &AppState,
    ctx: &ConversationContext,
) -> Result<ChatResponse, AppError> {
    let opportunity_id = ctx.opportunity_id.ok_or_else(|| {
        AppError::Validation("An opportunity ID is required to assess candidates".to_string())
    })?;

    let opportunity = state
        .store
        .get_opportunity(opportunity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opportunity {opportunity_id} not found")))?;

    // Company users may only assess their own postings.
    if let Some(company_id) = &ctx.company_id {
        if company_id != &opportunity.company_id {
            return Err(AppError::Forbidden);
        }
    }

    let applications = state
        .store
        .applications_by_opportunity(opportunity_id)
        .await?;

    if applications.is_empty() {
        return Ok(ChatResponse {
            reply: "No one has applied to this opportunity yet, so there are no candidates \
                    to assess."
                .to_string(),
            workflow: Workflow::CandidateAssessment,
            opportunity_id: None,
            notice: None,
        });
    }

    let ranked = rank_candidates(&opportunity, &applications, FitPolicy::ResponseRate);
    let assessment_json =
        serde_json::to_string_pretty(&ranked).map_err(|e| AppError::Internal(e.into()))?;

    let prompt = ASSESSMENT_SYNTHESIS_TEMPLATE
        .replace("{assessment_json}", &assessment_json)
        .replace("{message}", &ctx.message);
    let reply = state
        .llm
        .complete(&prompt, ASSESSMENT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(ChatResponse {
        reply,
        workflow: Workflow::CandidateAssessment,
        opportunity_id: None,
        notice: None,
    })
}
