//! Survey Scoring Engine — deterministic, length/content-based quality
//! judgments over a candidate's free-text survey answers. Not semantic: the
//! heuristic only looks at non-answers and response length, so it is fully
//! testable without a model call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::application::question_key;
use crate::models::opportunity::SurveyQuestion;

/// Answers that count as no response at all, compared case-insensitively
/// after trimming.
const NON_ANSWERS: &[&str] = &["", "n/a", "none", "no", "i don't know", "i can't remember"];

/// Per-question quality judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseQuality {
    #[serde(rename = "No response")]
    NoResponse,
    #[serde(rename = "Brief response")]
    Brief,
    #[serde(rename = "Moderate response")]
    Moderate,
    #[serde(rename = "Detailed response")]
    Detailed,
}

impl ResponseQuality {
    pub fn score(&self) -> u32 {
        match self {
            ResponseQuality::NoResponse => 0,
            ResponseQuality::Brief => 2,
            ResponseQuality::Moderate => 3,
            ResponseQuality::Detailed => 4,
        }
    }

    /// A question counts as answered for the response-rate policy unless it
    /// scored zero.
    pub fn is_good(&self) -> bool {
        !matches!(self, ResponseQuality::NoResponse)
    }
}

/// Judges one answer. A missing key is treated identically to an empty one.
pub fn judge_response(response: Option<&str>) -> ResponseQuality {
    let trimmed = response.unwrap_or("").trim();
    if NON_ANSWERS.contains(&trimmed.to_lowercase().as_str()) {
        return ResponseQuality::NoResponse;
    }
    match trimmed.chars().count() {
        0..=19 => ResponseQuality::Brief,
        20..=99 => ResponseQuality::Moderate,
        _ => ResponseQuality::Detailed,
    }
}

/// A survey question as callers may supply it: either plain text or the
/// structured `{question, type, required}` shape. Both are treated uniformly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionInput {
    Structured(SurveyQuestion),
    Text(String),
}

impl QuestionInput {
    pub fn text(&self) -> &str {
        match self {
            QuestionInput::Structured(q) => &q.question,
            QuestionInput::Text(t) => t,
        }
    }
}

impl From<SurveyQuestion> for QuestionInput {
    fn from(q: SurveyQuestion) -> Self {
        QuestionInput::Structured(q)
    }
}

/// One question's judgment alongside the answer it was based on.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionScore {
    pub question: String,
    pub response: Option<String>,
    pub quality: ResponseQuality,
    pub score: u32,
}

/// Aggregate over one candidate's survey.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyScore {
    pub per_question: Vec<QuestionScore>,
    pub total_score: u32,
    pub max_possible: u32,
    /// total_score / max_possible * 100; 0.0 when there are no questions.
    pub fit_percentage: f64,
    pub good_responses: usize,
    pub total_questions: usize,
    /// good_responses / total_questions; 0.0 when there are no questions.
    pub response_rate: f64,
}

/// Scores every question against the positional response mapping
/// (`question_0`, `question_1`, ... in question order).
pub fn score_survey(
    questions: &[QuestionInput],
    responses: &HashMap<String, String>,
) -> SurveyScore {
    let per_question: Vec<QuestionScore> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let response = responses.get(&question_key(i));
            let quality = judge_response(response.map(String::as_str));
            QuestionScore {
                question: question.text().to_string(),
                response: response.cloned(),
                quality,
                score: quality.score(),
            }
        })
        .collect();

    let total_questions = per_question.len();
    let total_score: u32 = per_question.iter().map(|q| q.score).sum();
    let max_possible = total_questions as u32 * 4;
    let good_responses = per_question.iter().filter(|q| q.quality.is_good()).count();

    let fit_percentage = if max_possible > 0 {
        f64::from(total_score) / f64::from(max_possible) * 100.0
    } else {
        0.0
    };
    let response_rate = if total_questions > 0 {
        good_responses as f64 / total_questions as f64
    } else {
        0.0
    };

    SurveyScore {
        per_question,
        total_score,
        max_possible,
        fit_percentage,
        good_responses,
        total_questions,
        response_rate,
    }
}

/// Categorical fit derived from one of the two policies below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FitLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FitLevel {
    /// Banding over fit_percentage (percentage of max score).
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            FitLevel::Excellent
        } else if pct >= 65.0 {
            FitLevel::Good
        } else if pct >= 50.0 {
            FitLevel::Fair
        } else {
            FitLevel::Poor
        }
    }

    /// Banding over response_rate (ratio of good answers).
    pub fn from_response_rate(rate: f64) -> Self {
        if rate >= 0.8 {
            FitLevel::Excellent
        } else if rate >= 0.6 {
            FitLevel::Good
        } else if rate >= 0.4 {
            FitLevel::Fair
        } else {
            FitLevel::Poor
        }
    }
}

/// The two fit-banding schemes in use. They serve different callers and use
/// different thresholds, so they are kept as distinct named policies rather
/// than merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitPolicy {
    /// Percentage-of-max-score banding (80 / 65 / 50).
    #[serde(rename = "score")]
    ScoreWeighted,
    /// Ratio-of-good-answers banding (0.8 / 0.6 / 0.4).
    #[default]
    #[serde(rename = "response_rate")]
    ResponseRate,
}

impl FitPolicy {
    /// The metric candidates are ranked by under this policy.
    pub fn metric(&self, score: &SurveyScore) -> f64 {
        match self {
            FitPolicy::ScoreWeighted => score.fit_percentage,
            FitPolicy::ResponseRate => score.response_rate,
        }
    }

    pub fn fit_level(&self, score: &SurveyScore) -> FitLevel {
        match self {
            FitPolicy::ScoreWeighted => FitLevel::from_percentage(score.fit_percentage),
            FitPolicy::ResponseRate => FitLevel::from_response_rate(score.response_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(texts: &[&str]) -> Vec<QuestionInput> {
        texts
            .iter()
            .map(|t| QuestionInput::Text(t.to_string()))
            .collect()
    }

    fn responses(answers: &[(&str, &str)]) -> HashMap<String, String> {
        answers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_non_answers_score_zero() {
        for answer in ["", "  ", "n/a", "N/A", "None", "no", "I don't know", "i can't remember"] {
            let quality = judge_response(Some(answer));
            assert_eq!(quality, ResponseQuality::NoResponse, "answer {answer:?}");
            assert_eq!(quality.score(), 0);
        }
        assert_eq!(judge_response(None), ResponseQuality::NoResponse);
    }

    #[test]
    fn test_length_bands() {
        assert_eq!(judge_response(Some("short")), ResponseQuality::Brief);
        assert_eq!(
            judge_response(Some("a".repeat(19).as_str())),
            ResponseQuality::Brief
        );
        assert_eq!(
            judge_response(Some("a".repeat(20).as_str())),
            ResponseQuality::Moderate
        );
        assert_eq!(
            judge_response(Some("a".repeat(99).as_str())),
            ResponseQuality::Moderate
        );
        let detailed = "a".repeat(150);
        let quality = judge_response(Some(&detailed));
        assert_eq!(quality, ResponseQuality::Detailed);
        assert_eq!(quality.score(), 4);
    }

    #[test]
    fn test_fit_percentage_for_mixed_answers() {
        // Scores [0, 2, 4] out of 12 -> 50.0% -> Fair.
        let qs = questions(&["One?", "Two?", "Three?"]);
        let rs = responses(&[
            ("question_0", "n/a"),
            ("question_1", "too short"),
            ("question_2", &"d".repeat(120)),
        ]);
        let score = score_survey(&qs, &rs);
        assert_eq!(score.total_score, 6);
        assert_eq!(score.max_possible, 12);
        assert!((score.fit_percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(
            FitPolicy::ScoreWeighted.fit_level(&score),
            FitLevel::Fair
        );
    }

    #[test]
    fn test_missing_key_same_as_empty_answer() {
        let qs = questions(&["One?", "Two?"]);
        let only_first = responses(&[("question_0", ""), ("question_1", "a fine enough answer here")]);
        let missing_first = responses(&[("question_1", "a fine enough answer here")]);
        let a = score_survey(&qs, &only_first);
        let b = score_survey(&qs, &missing_first);
        assert_eq!(a.total_score, b.total_score);
        assert_eq!(a.per_question[0].quality, b.per_question[0].quality);
    }

    #[test]
    fn test_zero_questions_does_not_divide_by_zero() {
        let score = score_survey(&[], &HashMap::new());
        assert_eq!(score.fit_percentage, 0.0);
        assert_eq!(score.response_rate, 0.0);
        assert_eq!(FitPolicy::ResponseRate.fit_level(&score), FitLevel::Poor);
    }

    #[test]
    fn test_question_input_accepts_both_shapes() {
        let json = r#"[
            "Plain question text?",
            {"question": "Structured question?", "type": "text", "required": true}
        ]"#;
        let inputs: Vec<QuestionInput> = serde_json::from_str(json).unwrap();
        assert_eq!(inputs[0].text(), "Plain question text?");
        assert_eq!(inputs[1].text(), "Structured question?");
    }

    #[test]
    fn test_percentage_banding_thresholds() {
        assert_eq!(FitLevel::from_percentage(80.0), FitLevel::Excellent);
        assert_eq!(FitLevel::from_percentage(79.9), FitLevel::Good);
        assert_eq!(FitLevel::from_percentage(65.0), FitLevel::Good);
        assert_eq!(FitLevel::from_percentage(50.0), FitLevel::Fair);
        assert_eq!(FitLevel::from_percentage(49.9), FitLevel::Poor);
    }

    #[test]
    fn test_response_rate_banding_thresholds() {
        assert_eq!(FitLevel::from_response_rate(0.8), FitLevel::Excellent);
        assert_eq!(FitLevel::from_response_rate(0.6), FitLevel::Good);
        assert_eq!(FitLevel::from_response_rate(0.4), FitLevel::Fair);
        assert_eq!(FitLevel::from_response_rate(0.39), FitLevel::Poor);
    }

    #[test]
    fn test_quality_serializes_to_human_label() {
        let json = serde_json::to_string(&ResponseQuality::NoResponse).unwrap();
        assert_eq!(json, r#""No response""#);
        let json = serde_json::to_string(&ResponseQuality::Detailed).unwrap();
        assert_eq!(json, r#""Detailed response""#);
    }
}
