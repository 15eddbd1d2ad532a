//! Improvement suggestions derived from a resume scan.

use serde::{Deserialize, Serialize};

use crate::ats::signals::{ContactInfo, SectionFlags};

/// Resumes shorter than this read as incomplete to a recruiter.
pub const MIN_RESUME_CHARS: usize = 500;
/// Resumes longer than this tend to lose a recruiter's attention.
pub const MAX_RESUME_CHARS: usize = 3000;
/// Below this keyword match rate the resume is flagged as poorly tailored.
pub const LOW_MATCH_RATE: f64 = 0.5;
/// Fewer verbs than this triggers the action-verb suggestion.
pub const MIN_ACTION_VERBS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Improvement,
    Formatting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub text: String,
}

impl Suggestion {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// Everything the suggestion rules look at.
pub struct SuggestionInputs<'a> {
    pub contact: &'a ContactInfo,
    pub sections: &'a SectionFlags,
    pub keyword_match_rate: f64,
    pub verb_count: usize,
    pub resume_chars: usize,
}

/// Builds suggestions in fixed priority order. Every rule is checked
/// independently, so several of the same severity can fire together.
pub fn build_suggestions(inputs: &SuggestionInputs<'_>) -> Vec<Suggestion> {
    let SuggestionInputs {
        contact,
        sections,
        keyword_match_rate,
        verb_count,
        resume_chars,
    } = *inputs;

    let mut out = Vec::new();

    if !contact.email {
        out.push(Suggestion::new(
            Severity::Critical,
            "Your resume is missing an email address. Recruiters need a way to contact you.",
        ));
    }
    if !contact.phone {
        out.push(Suggestion::new(
            Severity::Critical,
            "Your resume is missing a phone number.",
        ));
    }
    if !sections.education {
        out.push(Suggestion::new(
            Severity::Critical,
            "No Education section detected. Use a clear header such as \"Education\".",
        ));
    }
    if !sections.experience {
        out.push(Suggestion::new(
            Severity::Critical,
            "No Experience section detected. Use a clear header such as \"Experience\" or \"Work History\".",
        ));
    }
    if !contact.linkedin {
        out.push(Suggestion::new(
            Severity::Improvement,
            "Add your LinkedIn profile URL to increase credibility.",
        ));
    }
    if !sections.projects {
        out.push(Suggestion::new(
            Severity::Improvement,
            "Add a Projects section to showcase hands-on work.",
        ));
    }
    if keyword_match_rate < LOW_MATCH_RATE {
        let percent = (keyword_match_rate * 100.0).round() as u32;
        out.push(Suggestion::new(
            Severity::Improvement,
            format!(
                "Your resume matches only {percent}% of the job description keywords. \
                 Tailor it by adding the missing keywords where they genuinely apply."
            ),
        ));
    }
    if verb_count < MIN_ACTION_VERBS {
        out.push(Suggestion::new(
            Severity::Improvement,
            "Use more strong action verbs such as \"led\", \"developed\" or \"optimized\" to describe your work.",
        ));
    }
    if resume_chars < MIN_RESUME_CHARS {
        out.push(Suggestion::new(
            Severity::Formatting,
            "Your resume seems too short. Add more detail about your experience and projects.",
        ));
    }
    if resume_chars > MAX_RESUME_CHARS {
        out.push(Suggestion::new(
            Severity::Formatting,
            "Your resume seems too long. Keep it concise, ideally one to two pages.",
        ));
    }

    out
}
