//! Repository seam over the document store. Handlers and chat workflows only
//! ever see `Arc<dyn OpportunityStore>`, so the Postgres backend can be
//! swapped for the in-memory one in tests without touching caller code.

pub mod memory;
pub mod pg;

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::opportunity::{EmploymentType, Opportunity, SurveyQuestion};

/// A fully validated opportunity awaiting persistence. Produced by the
/// response parser; the store assigns id, status, and timestamps.
#[derive(Debug, Clone)]
pub struct OpportunityDraft {
    pub company_id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub salary_range: Option<String>,
    pub survey_questions: Vec<SurveyQuestion>,
}

/// A validated application submission. The store assigns id and applied_at,
/// and rejects duplicates per (opportunity, applicant).
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub opportunity_id: Uuid,
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub survey_responses: HashMap<String, String>,
}

#[async_trait]
pub trait OpportunityStore: Send + Sync {
    async fn create_opportunity(&self, draft: OpportunityDraft) -> Result<Uuid, AppError>;

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError>;

    /// Active opportunities for a company, newest first.
    async fn opportunities_by_company(
        &self,
        company_id: &str,
    ) -> Result<Vec<Opportunity>, AppError>;

    async fn close_opportunity(&self, id: Uuid) -> Result<(), AppError>;

    /// Inserts an application. The uniqueness of (opportunity_id, applicant_id)
    /// is enforced by the store itself, not by a caller-side existence check.
    async fn submit_application(&self, draft: ApplicationDraft) -> Result<Uuid, AppError>;

    /// Applications for an opportunity, newest first.
    async fn applications_by_opportunity(
        &self,
        opportunity_id: Uuid,
    ) -> Result<Vec<Application>, AppError>;

    async fn existing_application(
        &self,
        opportunity_id: Uuid,
        applicant_id: &str,
    ) -> Result<bool, AppError>;
}
