//! Response Parser — turns the structured marker block a model emits when a
//! job posting is ready into a validated opportunity draft.
//!
//! The grammar is an explicit line classifier over the text following the
//! `OPPORTUNITY_READY` marker: each line is either a `Label: value` line, a
//! numbered/bulleted survey question, or a continuation of the field opened
//! by the most recent label. A failed parse never produces a partial record;
//! the caller must re-prompt instead of persisting.

use thiserror::Error;

use crate::models::opportunity::{EmploymentType, SurveyQuestion};

/// The literal token the model is instructed to emit when a posting is
/// complete. Accepted with or without a trailing colon.
pub const OPPORTUNITY_MARKER: &str = "OPPORTUNITY_READY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("assistant output does not contain an {OPPORTUNITY_MARKER} block")]
    MarkerNotFound,

    #[error("required field '{0}' is missing from the opportunity block")]
    MissingField(&'static str),

    #[error("at least 2 survey questions are required, found {found}")]
    InsufficientQuestions { found: usize },
}

/// A fully validated opportunity extracted from one assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOpportunity {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub salary_range: Option<String>,
    pub survey_questions: Vec<SurveyQuestion>,
}

impl ParsedOpportunity {
    /// Re-serializes the record in the same label format the parser consumes.
    /// Used when echoing a draft back to the user for confirmation.
    pub fn to_block_text(&self) -> String {
        let mut out = String::new();
        out.push_str(OPPORTUNITY_MARKER);
        out.push_str(":\n");
        out.push_str(&format!("Title: {}\n", self.title));
        out.push_str(&format!("Description: {}\n", self.description));
        out.push_str(&format!("Requirements: {}\n", self.requirements));
        out.push_str(&format!("Location: {}\n", self.location));
        out.push_str(&format!(
            "Employment Type: {}\n",
            self.employment_type.as_str()
        ));
        if let Some(salary) = &self.salary_range {
            out.push_str(&format!("Salary Range: {salary}\n"));
        }
        out.push_str("Survey Questions:\n");
        for (i, q) in self.survey_questions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, q.question));
        }
        out
    }
}

/// Fields a label line can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Requirements,
    Location,
    EmploymentType,
    SalaryRange,
    Questions,
}

/// Recognized labels, matched case-insensitively at the start of a line.
/// "Required Skills" and "Key Responsibilities" are alternate spellings the
/// model uses for the requirements section.
const LABELS: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("description", Field::Description),
    ("requirements", Field::Requirements),
    ("required skills", Field::Requirements),
    ("key responsibilities", Field::Requirements),
    ("location", Field::Location),
    ("employment type", Field::EmploymentType),
    ("salary range", Field::SalaryRange),
    ("survey questions", Field::Questions),
];

/// Parses one block of assistant text into a validated opportunity.
pub fn parse_opportunity(text: &str) -> Result<ParsedOpportunity, ParseError> {
    let section = marker_section(text).ok_or(ParseError::MarkerNotFound)?;

    let mut title = String::new();
    let mut description = String::new();
    let mut requirements = String::new();
    let mut location = String::new();
    // None means the label was never seen; Some("") means present but empty.
    let mut employment: Option<String> = None;
    let mut salary: Option<String> = None;
    let mut questions: Vec<String> = Vec::new();

    let mut current: Option<Field> = None;

    for line in section.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((field, rest)) = classify_label(trimmed) {
            current = Some(field);
            match field {
                Field::Title => append(&mut title, rest),
                Field::Description => append(&mut description, rest),
                Field::Requirements => append(&mut requirements, rest),
                Field::Location => append(&mut location, rest),
                Field::EmploymentType => {
                    append_opt(&mut employment, rest);
                }
                Field::SalaryRange => {
                    append_opt(&mut salary, rest);
                }
                Field::Questions => {}
            }
            continue;
        }

        match current {
            Some(Field::Questions) => {
                if let Some(q) = strip_question_prefix(trimmed) {
                    questions.push(q.to_string());
                }
                // Lines that are neither numbered nor bulleted are skipped.
            }
            Some(Field::Title) => append(&mut title, trimmed),
            Some(Field::Description) => append(&mut description, trimmed),
            Some(Field::Requirements) => append(&mut requirements, trimmed),
            Some(Field::Location) => append(&mut location, trimmed),
            Some(Field::EmploymentType) => append_opt(&mut employment, trimmed),
            Some(Field::SalaryRange) => append_opt(&mut salary, trimmed),
            // Free text between the marker and the first label is ignored.
            None => {}
        }
    }

    if title.is_empty() {
        return Err(ParseError::MissingField("Title"));
    }
    if description.is_empty() {
        return Err(ParseError::MissingField("Description"));
    }
    if requirements.is_empty() {
        return Err(ParseError::MissingField("Requirements"));
    }
    if location.is_empty() {
        return Err(ParseError::MissingField("Location"));
    }
    // The label itself is required; an empty value defaults to full-time.
    let employment_type = match &employment {
        Some(value) => EmploymentType::from_label(value),
        None => return Err(ParseError::MissingField("Employment Type")),
    };

    if questions.len() < 2 {
        return Err(ParseError::InsufficientQuestions {
            found: questions.len(),
        });
    }

    let salary_range = salary.filter(|s| {
        let lower = s.trim().to_lowercase();
        !lower.is_empty() && lower != "not specified" && lower != "n/a"
    });

    Ok(ParsedOpportunity {
        title,
        description,
        requirements,
        location,
        employment_type,
        salary_range,
        survey_questions: questions.into_iter().map(SurveyQuestion::text).collect(),
    })
}

/// Returns the text following the marker, preferring the first fenced code
/// block when one contains the marker. Strips the marker's optional colon.
fn marker_section(text: &str) -> Option<&str> {
    let candidate = first_fenced_block(text)
        .filter(|block| block.contains(OPPORTUNITY_MARKER))
        .unwrap_or(text);

    let idx = candidate.find(OPPORTUNITY_MARKER)?;
    let after = &candidate[idx + OPPORTUNITY_MARKER.len()..];
    Some(after.trim_start_matches(':'))
}

/// Content of the first triple-backtick fence, if the text has a closed one.
fn first_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let body = &text[open + 3..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Matches a known label at the start of a line (case-insensitive, optional
/// colon) and returns the field plus the remainder of the line.
fn classify_label(line: &str) -> Option<(Field, &str)> {
    let lower = line.to_lowercase();
    for (label, field) in LABELS {
        if lower.starts_with(label) {
            let rest = &line[label.len()..];
            // A label must be terminated by a colon or end of line so that
            // e.g. "Location matters to us" is not mistaken for a label.
            let rest = match rest.trim_start().strip_prefix(':') {
                Some(r) => r,
                None if rest.trim().is_empty() => rest,
                None => continue,
            };
            return Some((*field, rest.trim()));
        }
    }
    None
}

/// Strips `<n>.` / `<n>)` numbering or a `-` bullet from a question line.
fn strip_question_prefix(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('-') {
        let rest = rest.trim();
        return (!rest.is_empty()).then_some(rest);
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

fn append(buf: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push('\n');
    }
    buf.push_str(text);
}

fn append_opt(buf: &mut Option<String>, text: &str) {
    let buf = buf.get_or_insert_with(String::new);
    append(buf, text);
}
