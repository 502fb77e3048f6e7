//! Candidate Ranking Engine — orders scored candidates for one opportunity
//! and derives interview-question suggestions from weak-answer patterns.

use std::cmp::Ordering;

use serde::Serialize;

use crate::assessment::scoring::{score_survey, FitLevel, FitPolicy, QuestionInput, SurveyScore};
use crate::models::application::Application;
use crate::models::opportunity::Opportunity;

/// Suggestions are capped here; extra matches are truncated, not re-ranked.
const MAX_SUGGESTED_QUESTIONS: usize = 5;

/// One candidate's derived assessment. Computed on demand, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateAssessment {
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub fit_level: FitLevel,
    /// The ranking metric under the chosen policy: fit_percentage for
    /// score-weighted, response_rate otherwise.
    pub fit_metric: f64,
    pub survey: SurveyScore,
    /// 1-based position after the stable descending sort.
    pub rank: usize,
    pub suggested_questions: Vec<String>,
}

/// Scores every application and returns assessments sorted best-first.
/// Equal metrics keep their input order (stable sort), so the earlier
/// submission ranks ahead on a tie.
pub fn rank_candidates(
    opportunity: &Opportunity,
    applications: &[Application],
    policy: FitPolicy,
) -> Vec<CandidateAssessment> {
    let questions: Vec<QuestionInput> = opportunity
        .survey_questions
        .iter()
        .cloned()
        .map(QuestionInput::from)
        .collect();

    let mut assessments: Vec<CandidateAssessment> = applications
        .iter()
        .map(|application| {
            let survey = score_survey(&questions, &application.survey_responses);
            let suggested_questions = suggest_interview_questions(&opportunity.title, &survey);
            CandidateAssessment {
                applicant_id: application.applicant_id.clone(),
                applicant_name: application.applicant_name.clone(),
                applicant_email: application.applicant_email.clone(),
                fit_level: policy.fit_level(&survey),
                fit_metric: policy.metric(&survey),
                survey,
                rank: 0,
                suggested_questions,
            }
        })
        .collect();

    assessments.sort_by(|a, b| {
        b.fit_metric
            .partial_cmp(&a.fit_metric)
            .unwrap_or(Ordering::Equal)
    });
    for (i, assessment) in assessments.iter_mut().enumerate() {
        assessment.rank = i + 1;
    }
    assessments
}

/// Deterministic keyword-to-template lookup over a candidate's weak answers
/// plus the opportunity title. Question text matching no known keyword yields
/// nothing.
pub fn suggest_interview_questions(title: &str, survey: &SurveyScore) -> Vec<String> {
    let mut questions = Vec::new();

    for scored in &survey.per_question {
        if scored.quality.is_good() {
            continue;
        }
        let original = scored.question.to_lowercase();
        if original.contains("technical concept") {
            questions.push(
                "Can you walk me through a recent technical project you worked on and explain \
                 how you would describe it to a non-technical stakeholder?"
                    .to_string(),
            );
        } else if original.contains("troubleshoot") {
            questions.push(
                "Describe your approach to debugging a complex issue. What tools and \
                 methodologies do you use?"
                    .to_string(),
            );
        } else if original.contains("collaborate") {
            questions.push(
                "Tell me about a time when you had to work closely with other team members. \
                 What was your role and how did you contribute?"
                    .to_string(),
            );
        }
    }

    let title_lower = title.to_lowercase();
    if title_lower.contains("senior") {
        questions.push("How do you approach mentoring junior developers?".to_string());
        questions.push(
            "Describe a time when you had to make a significant technical decision. \
             What was your process?"
                .to_string(),
        );
    }
    if title_lower.contains("full stack") {
        questions.push(
            "How do you stay current with both frontend and backend technologies?".to_string(),
        );
        questions.push(
            "Describe your experience with system design and architecture decisions.".to_string(),
        );
    }

    questions.truncate(MAX_SUGGESTED_QUESTIONS);
    questions
}
