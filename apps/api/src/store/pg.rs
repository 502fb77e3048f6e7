use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::opportunity::{
    EmploymentType, Opportunity, OpportunityStatus, SurveyQuestion,
};
use crate::store::{ApplicationDraft, OpportunityDraft, OpportunityStore};

/// PostgreSQL-backed store. Survey payloads live in JSONB columns; the
/// duplicate-application invariant is a unique index on
/// (opportunity_id, applicant_id), so concurrent submissions cannot both win.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct OpportunityRow {
    id: Uuid,
    company_id: String,
    title: String,
    description: String,
    requirements: String,
    location: String,
    employment_type: String,
    salary_range: Option<String>,
    survey_questions: Json<Vec<SurveyQuestion>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OpportunityRow> for Opportunity {
    fn from(row: OpportunityRow) -> Self {
        Opportunity {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            requirements: row.requirements,
            location: row.location,
            employment_type: EmploymentType::from_label(&row.employment_type),
            salary_range: row.salary_range,
            survey_questions: row.survey_questions.0,
            status: if row.status == "closed" {
                OpportunityStatus::Closed
            } else {
                OpportunityStatus::Active
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    opportunity_id: Uuid,
    applicant_id: String,
    applicant_name: String,
    applicant_email: String,
    survey_responses: Json<HashMap<String, String>>,
    applied_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            id: row.id,
            opportunity_id: row.opportunity_id,
            applicant_id: row.applicant_id,
            applicant_name: row.applicant_name,
            applicant_email: row.applicant_email,
            survey_responses: row.survey_responses.0,
            applied_at: row.applied_at,
        }
    }
}

#[async_trait]
impl OpportunityStore for PgStore {
    async fn create_opportunity(&self, draft: OpportunityDraft) -> Result<Uuid, AppError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO opportunities
                (company_id, title, description, requirements, location,
                 employment_type, salary_range, survey_questions, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active')
            RETURNING id
            "#,
        )
        .bind(&draft.company_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.requirements)
        .bind(&draft.location)
        .bind(draft.employment_type.as_str())
        .bind(&draft.salary_range)
        .bind(Json(&draft.survey_questions))
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Created opportunity {id} for company {}",
            draft.company_id
        );
        Ok(id)
    }

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError> {
        let row: Option<OpportunityRow> =
            sqlx::query_as("SELECT * FROM opportunities WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Opportunity::from))
    }

    async fn opportunities_by_company(
        &self,
        company_id: &str,
    ) -> Result<Vec<Opportunity>, AppError> {
        let rows: Vec<OpportunityRow> = sqlx::query_as(
            r#"
            SELECT * FROM opportunities
            WHERE company_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Opportunity::from).collect())
    }

    async fn close_opportunity(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE opportunities SET status = 'closed', updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Opportunity {id} not found")));
        }
        Ok(())
    }

    async fn submit_application(&self, draft: ApplicationDraft) -> Result<Uuid, AppError> {
        // ON CONFLICT DO NOTHING against the unique index makes the
        // duplicate check and the insert a single atomic statement.
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO applications
                (opportunity_id, applicant_id, applicant_name, applicant_email, survey_responses)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (opportunity_id, applicant_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(draft.opportunity_id)
        .bind(&draft.applicant_id)
        .bind(&draft.applicant_name)
        .bind(&draft.applicant_email)
        .bind(Json(&draft.survey_responses))
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some((id,)) => {
                info!(
                    "Created application {id} for opportunity {}",
                    draft.opportunity_id
                );
                Ok(id)
            }
            None => Err(AppError::Conflict(
                "You have already applied to this opportunity".to_string(),
            )),
        }
    }

    async fn applications_by_opportunity(
        &self,
        opportunity_id: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM applications
            WHERE opportunity_id = $1
            ORDER BY applied_at DESC
            "#,
        )
        .bind(opportunity_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Application::from).collect())
    }

    async fn existing_application(
        &self,
        opportunity_id: Uuid,
        applicant_id: &str,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM applications
                WHERE opportunity_id = $1 AND applicant_id = $2
            )
            "#,
        )
        .bind(opportunity_id)
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
