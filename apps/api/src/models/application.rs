use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate's submitted answers to an opportunity's survey.
/// `survey_responses` is keyed `question_0`, `question_1`, ... matching the
/// opportunity's question order. Created once at submission, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub opportunity_id: Uuid,
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub survey_responses: HashMap<String, String>,
    pub applied_at: DateTime<Utc>,
}

/// Positional key used for survey responses.
pub fn question_key(index: usize) -> String {
    format!("question_{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_key_is_positional() {
        assert_eq!(question_key(0), "question_0");
        assert_eq!(question_key(12), "question_12");
    }
}
