#![allow(dead_code)]

//! In-memory store used by tests. Enforces the same invariants as PgStore:
//! atomic duplicate rejection, newest-first ordering, soft-close only.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::opportunity::{Opportunity, OpportunityStatus};
use crate::store::{ApplicationDraft, OpportunityDraft, OpportunityStore};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    opportunities: Vec<Opportunity>,
    applications: Vec<Application>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OpportunityStore for MemoryStore {
    async fn create_opportunity(&self, draft: OpportunityDraft) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut inner = self.inner.lock().unwrap();
        inner.opportunities.push(Opportunity {
            id,
            company_id: draft.company_id,
            title: draft.title,
            description: draft.description,
            requirements: draft.requirements,
            location: draft.location,
            employment_type: draft.employment_type,
            salary_range: draft.salary_range,
            survey_questions: draft.survey_questions,
            status: OpportunityStatus::Active,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn get_opportunity(&self, id: Uuid) -> Result<Option<Opportunity>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.opportunities.iter().find(|o| o.id == id).cloned())
    }

    async fn opportunities_by_company(
        &self,
        company_id: &str,
    ) -> Result<Vec<Opportunity>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut matches: Vec<Opportunity> = inner
            .opportunities
            .iter()
            .filter(|o| o.company_id == company_id && o.status == OpportunityStatus::Active)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn close_opportunity(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        let opportunity = inner
            .opportunities
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Opportunity {id} not found")))?;
        opportunity.status = OpportunityStatus::Closed;
        opportunity.updated_at = Utc::now();
        Ok(())
    }

    async fn submit_application(&self, draft: ApplicationDraft) -> Result<Uuid, AppError> {
        let mut inner = self.inner.lock().unwrap();
        // The lock makes check-then-insert atomic here, mirroring the
        // unique index in the Postgres backend.
        let duplicate = inner.applications.iter().any(|a| {
            a.opportunity_id == draft.opportunity_id && a.applicant_id == draft.applicant_id
        });
        if duplicate {
            return Err(AppError::Conflict(
                "You have already applied to this opportunity".to_string(),
            ));
        }
        let id = Uuid::new_v4();
        inner.applications.push(Application {
            id,
            opportunity_id: draft.opportunity_id,
            applicant_id: draft.applicant_id,
            applicant_name: draft.applicant_name,
            applicant_email: draft.applicant_email,
            survey_responses: draft.survey_responses,
            applied_at: Utc::now(),
        });
        Ok(id)
    }

    async fn applications_by_opportunity(
        &self,
        opportunity_id: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut matches: Vec<Application> = inner
            .applications
            .iter()
            .filter(|a| a.opportunity_id == opportunity_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(matches)
    }

    async fn existing_application(
        &self,
        opportunity_id: Uuid,
        applicant_id: &str,
    ) -> Result<bool, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.applications.iter().any(|a| {
            a.opportunity_id == opportunity_id && a.applicant_id == applicant_id
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::opportunity::{EmploymentType, SurveyQuestion};

    fn sample_draft() -> OpportunityDraft {
        OpportunityDraft {
            company_id: "company_1".to_string(),
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            requirements: "Rust, SQL".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::FullTime,
            salary_range: None,
            survey_questions: vec![
                SurveyQuestion::text("Describe a time you collaborated across teams."),
                SurveyQuestion::text("How do you troubleshoot production issues?"),
            ],
        }
    }

    fn application_for(opportunity_id: Uuid, applicant_id: &str) -> ApplicationDraft {
        ApplicationDraft {
            opportunity_id,
            applicant_id: applicant_id.to_string(),
            applicant_name: "Jordan Reyes".to_string(),
            applicant_email: "jordan@example.com".to_string(),
            survey_responses: HashMap::from([
                ("question_0".to_string(), "A detailed answer".to_string()),
                ("question_1".to_string(), "Another answer".to_string()),
            ]),
        }
    }

    #[tokio::test]
    async fn test_existing_application_only_after_submit() {
        let store = MemoryStore::new();
        let opp_id = store.create_opportunity(sample_draft()).await.unwrap();

        assert!(!store.existing_application(opp_id, "talent_1").await.unwrap());

        store
            .submit_application(application_for(opp_id, "talent_1"))
            .await
            .unwrap();

        assert!(store.existing_application(opp_id, "talent_1").await.unwrap());
        // A different applicant, and a different opportunity, are unaffected.
        assert!(!store.existing_application(opp_id, "talent_2").await.unwrap());
        assert!(!store
            .existing_application(Uuid::new_v4(), "talent_1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected() {
        let store = MemoryStore::new();
        let opp_id = store.create_opportunity(sample_draft()).await.unwrap();

        store
            .submit_application(application_for(opp_id, "talent_1"))
            .await
            .unwrap();
        let err = store
            .submit_application(application_for(opp_id, "talent_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_closed_opportunities_excluded_from_company_listing() {
        let store = MemoryStore::new();
        let first = store.create_opportunity(sample_draft()).await.unwrap();
        let second = store.create_opportunity(sample_draft()).await.unwrap();

        store.close_opportunity(first).await.unwrap();

        let listed = store.opportunities_by_company("company_1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second);

        // The closed posting is still readable, just not active.
        let closed = store.get_opportunity(first).await.unwrap().unwrap();
        assert_eq!(closed.status, OpportunityStatus::Closed);
    }
}
