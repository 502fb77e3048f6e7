//! Conversation Context Router — decides, per chat turn, which workflow
//! handles the message and what contextual prompt is sent to the model.
//! The router keeps no cross-turn state; continuity lives in the caller's
//! conversation store.

use serde::Serialize;
use uuid::Uuid;

use crate::models::user::UserType;

/// Task tags a company user can attach to a turn. Anything else is treated
/// as untagged and falls through to general guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    CreateOpportunity,
    AssessCandidates,
}

impl TaskKind {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "create_opportunity" => Some(TaskKind::CreateOpportunity),
            "assess_candidates" => Some(TaskKind::AssessCandidates),
            _ => None,
        }
    }
}

/// The four conversational workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    CareerGuidance,
    PostingCreation,
    CandidateAssessment,
    HiringGuidance,
}

pub fn select_workflow(user_type: UserType, task: Option<TaskKind>) -> Workflow {
    match (user_type, task) {
        (UserType::Talent, _) => Workflow::CareerGuidance,
        (UserType::Company, Some(TaskKind::CreateOpportunity)) => Workflow::PostingCreation,
        (UserType::Company, Some(TaskKind::AssessCandidates)) => Workflow::CandidateAssessment,
        (UserType::Company, None) => Workflow::HiringGuidance,
    }
}

/// Metadata recovered from an optional `[Key: value, ...]` prefix embedded in
/// the message text. Any malformation (unterminated bracket, pair without a
/// colon) falls back to the whole original string as the message with every
/// field defaulted — malformed metadata is never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageMetadata {
    pub user_type: Option<UserType>,
    pub task: Option<String>,
    pub company: Option<String>,
    pub company_id: Option<String>,
    pub clean_message: String,
}

pub fn parse_metadata_prefix(raw: &str) -> MessageMetadata {
    let fallback = || MessageMetadata {
        clean_message: raw.to_string(),
        ..Default::default()
    };

    let trimmed = raw.trim_start();
    let Some(body) = trimmed.strip_prefix('[') else {
        return fallback();
    };
    let Some(end) = body.find(']') else {
        return fallback();
    };

    let mut meta = MessageMetadata {
        clean_message: body[end + 1..].trim().to_string(),
        ..Default::default()
    };

    for pair in body[..end].split(',') {
        let Some((key, value)) = pair.split_once(':') else {
            return fallback();
        };
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "user type" => meta.user_type = Some(UserType::from_label(value)),
            "task" => meta.task = Some(value.to_string()),
            "company" => meta.company = Some(value.to_string()),
            "company id" => meta.company_id = Some(value.to_string()),
            // Unrecognized keys are tolerated, not treated as malformed.
            _ => {}
        }
    }
    meta
}

/// Everything one turn needs: resolved identity fields plus the clean
/// message body. Exists only for the duration of building one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationContext {
    pub user_type: UserType,
    pub task: Option<TaskKind>,
    pub company: Option<String>,
    pub company_id: Option<String>,
    pub opportunity_id: Option<Uuid>,
    pub message: String,
}

impl ConversationContext {
    /// Merges structured caller metadata with the bracketed message prefix.
    /// Caller-supplied fields win over prefix values.
    pub fn resolve(
        message: &str,
        user_type: Option<UserType>,
        task: Option<&str>,
        company_id: Option<String>,
        opportunity_id: Option<Uuid>,
    ) -> Self {
        let meta = parse_metadata_prefix(message);
        let task_label = task.map(str::to_string).or(meta.task);
        ConversationContext {
            user_type: user_type.or(meta.user_type).unwrap_or_default(),
            task: task_label.as_deref().and_then(TaskKind::from_label),
            company: meta.company,
            company_id: company_id.or(meta.company_id),
            opportunity_id,
            message: meta.clean_message,
        }
    }

    pub fn workflow(&self) -> Workflow {
        select_workflow(self.user_type, self.task)
    }

    /// Context preamble prepended to the user message in every prompt.
    pub fn prompt_preamble(&self) -> String {
        let mut lines = vec![format!(
            "User type: {}",
            match self.user_type {
                UserType::Talent => "talent",
                UserType::Company => "company",
            }
        )];
        if let Some(company) = &self.company {
            lines.push(format!("Company: {company}"));
        }
        if let Some(company_id) = &self.company_id {
            lines.push(format!("Company ID: {company_id}"));
        }
        if let Some(opportunity_id) = &self.opportunity_id {
            lines.push(format!("Opportunity ID: {opportunity_id}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_prefix_parses_all_fields() {
        let meta = parse_metadata_prefix(
            "[User type: company, Task: create_opportunity, Company ID: abc] hello",
        );
        assert_eq!(meta.user_type, Some(UserType::Company));
        assert_eq!(meta.task.as_deref(), Some("create_opportunity"));
        assert_eq!(meta.company_id.as_deref(), Some("abc"));
        assert_eq!(meta.clean_message, "hello");
    }

    #[test]
    fn test_unterminated_bracket_falls_back_to_original() {
        let raw = "[User type: company hello";
        let meta = parse_metadata_prefix(raw);
        assert_eq!(meta, MessageMetadata {
            clean_message: raw.to_string(),
            ..Default::default()
        });
    }

    #[test]
    fn test_pair_without_colon_falls_back_to_original() {
        let raw = "[User type: company, nonsense] hello";
        let meta = parse_metadata_prefix(raw);
        assert_eq!(meta.user_type, None);
        assert_eq!(meta.clean_message, raw);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let meta = parse_metadata_prefix("[USER TYPE: company, COMPANY: Acme] hi");
        assert_eq!(meta.user_type, Some(UserType::Company));
        assert_eq!(meta.company.as_deref(), Some("Acme"));
        assert_eq!(meta.clean_message, "hi");
    }

    #[test]
    fn test_unrecognized_key_is_ignored() {
        let meta = parse_metadata_prefix("[User type: talent, Mood: great] hi");
        assert_eq!(meta.user_type, Some(UserType::Talent));
        assert_eq!(meta.clean_message, "hi");
    }

    #[test]
    fn test_message_without_prefix_passes_through() {
        let meta = parse_metadata_prefix("just a plain question");
        assert_eq!(meta.clean_message, "just a plain question");
        assert_eq!(meta.user_type, None);
    }

    #[test]
    fn test_workflow_selection_table() {
        assert_eq!(
            select_workflow(UserType::Talent, None),
            Workflow::CareerGuidance
        );
        assert_eq!(
            select_workflow(UserType::Talent, Some(TaskKind::CreateOpportunity)),
            Workflow::CareerGuidance
        );
        assert_eq!(
            select_workflow(UserType::Company, Some(TaskKind::CreateOpportunity)),
            Workflow::PostingCreation
        );
        assert_eq!(
            select_workflow(UserType::Company, Some(TaskKind::AssessCandidates)),
            Workflow::CandidateAssessment
        );
        assert_eq!(
            select_workflow(UserType::Company, None),
            Workflow::HiringGuidance
        );
    }

    #[test]
    fn test_caller_metadata_wins_over_prefix() {
        let ctx = ConversationContext::resolve(
            "[User type: talent, Company ID: from_prefix] hello",
            Some(UserType::Company),
            Some("assess_candidates"),
            Some("from_caller".to_string()),
            None,
        );
        assert_eq!(ctx.user_type, UserType::Company);
        assert_eq!(ctx.task, Some(TaskKind::AssessCandidates));
        assert_eq!(ctx.company_id.as_deref(), Some("from_caller"));
        assert_eq!(ctx.message, "hello");
        assert_eq!(ctx.workflow(), Workflow::CandidateAssessment);
    }

    #[test]
    fn test_prefix_fills_in_missing_caller_fields() {
        let ctx = ConversationContext::resolve(
            "[User type: company, Task: create_opportunity, Company ID: abc] draft a posting",
            None,
            None,
            None,
            None,
        );
        assert_eq!(ctx.user_type, UserType::Company);
        assert_eq!(ctx.task, Some(TaskKind::CreateOpportunity));
        assert_eq!(ctx.company_id.as_deref(), Some("abc"));
        assert_eq!(ctx.workflow(), Workflow::PostingCreation);
    }

    #[test]
    fn test_unknown_task_routes_company_to_hiring_guidance() {
        let ctx = ConversationContext::resolve(
            "hello",
            Some(UserType::Company),
            Some("something_else"),
            None,
            None,
        );
        assert_eq!(ctx.task, None);
        assert_eq!(ctx.workflow(), Workflow::HiringGuidance);
    }

    #[test]
    fn test_prompt_preamble_lists_known_fields() {
        let ctx = ConversationContext::resolve(
            "[User type: company, Company: Acme, Company ID: abc] hi",
            None,
            None,
            None,
            None,
        );
        let preamble = ctx.prompt_preamble();
        assert!(preamble.contains("User type: company"));
        assert!(preamble.contains("Company: Acme"));
        assert!(preamble.contains("Company ID: abc"));
    }
}
