use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment type for an opportunity. Anything the model emits that is not
/// recognizably part-time or contract is treated as full-time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "full-time")]
    FullTime,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
}

impl EmploymentType {
    /// Lenient mapping from free-form model output ("Full-time (Remote)",
    /// "6-month contract", ...). Empty input defaults to full-time.
    pub fn from_label(value: &str) -> Self {
        let lower = value.to_lowercase();
        if lower.contains("part") {
            EmploymentType::PartTime
        } else if lower.contains("contract") {
            EmploymentType::Contract
        } else {
            EmploymentType::FullTime
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Active,
    Closed,
}

/// One screening question attached to an opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub required: bool,
}

impl SurveyQuestion {
    /// Parser-produced questions are always free-text and required.
    pub fn text(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            question_type: "text".to_string(),
            required: true,
        }
    }
}

/// A published job posting. Immutable after creation except for status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Uuid,
    pub company_id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub employment_type: EmploymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub survey_questions: Vec<SurveyQuestion>,
    pub status: OpportunityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_type_from_label_variants() {
        assert_eq!(
            EmploymentType::from_label("Full-time"),
            EmploymentType::FullTime
        );
        assert_eq!(
            EmploymentType::from_label("Part-time (20h/week)"),
            EmploymentType::PartTime
        );
        assert_eq!(
            EmploymentType::from_label("6-month contract"),
            EmploymentType::Contract
        );
    }

    #[test]
    fn test_employment_type_empty_defaults_full_time() {
        assert_eq!(EmploymentType::from_label(""), EmploymentType::FullTime);
    }

    #[test]
    fn test_employment_type_serde_uses_kebab_labels() {
        let json = serde_json::to_string(&EmploymentType::PartTime).unwrap();
        assert_eq!(json, r#""part-time""#);
        let back: EmploymentType = serde_json::from_str(r#""contract""#).unwrap();
        assert_eq!(back, EmploymentType::Contract);
    }
}
