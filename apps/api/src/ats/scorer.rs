//! Resume scoring — compatibility between a resume and a job description.
//!
//! Default: `KeywordResumeScorer` (pure, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn ResumeScorer>` so another backend can be
//! swapped in without touching the handlers.
//!
//! Score weights (max 100):
//! - keyword match rate × 40
//! - detected sections (0–100) × 0.30
//! - contact channels (0–100) × 0.20
//! - action verbs, saturating at 5 distinct verbs, × 10

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ats::keywords::{extract_keywords, match_keywords};
use crate::ats::signals::{
    detect_contact_info, detect_sections, find_action_verbs, ContactInfo, SectionFlags,
};
use crate::ats::suggestions::{build_suggestions, Suggestion, SuggestionInputs};

const KEYWORD_WEIGHT: f64 = 40.0;
const SECTION_WEIGHT: f64 = 0.30;
const CONTACT_WEIGHT: f64 = 0.20;
const VERB_WEIGHT: f64 = 10.0;
/// Distinct action verbs needed for the full verb contribution.
const VERB_SATURATION: usize = 5;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanDetails {
    pub contact_info: ContactInfo,
    pub sections: SectionFlags,
    pub found_verbs: Vec<String>,
}

/// Result of one scan. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub details: ScanDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends. Carried in `AppState` as
/// `Arc<dyn ResumeScorer>`.
pub trait ResumeScorer: Send + Sync {
    fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScanResult, ScanError>;
}

/// Keyword and heuristic scorer.
pub struct KeywordResumeScorer;

impl ResumeScorer for KeywordResumeScorer {
    fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScanResult, ScanError> {
        analyze(resume_text, job_description)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against `job_description`.
///
/// Fails only when both inputs are empty.
pub fn analyze(resume_text: &str, job_description: &str) -> Result<ScanResult, ScanError> {
    if resume_text.is_empty() && job_description.is_empty() {
        return Err(ScanError::InvalidInput(
            "resume text and job description are both empty".to_string(),
        ));
    }

    let resume_lower = resume_text.to_lowercase();
    let jd_lower = job_description.to_lowercase();

    let keywords = match_keywords(extract_keywords(&jd_lower), &resume_lower);
    let keyword_match_rate = keywords.match_rate();

    let sections = detect_sections(resume_text);
    let section_score = percent(sections.count(), SectionFlags::TOTAL);

    let contact_info = detect_contact_info(resume_text);
    let contact_score = percent(contact_info.count(), ContactInfo::TOTAL);

    let found_verbs = find_action_verbs(&resume_lower);
    let verb_score = verb_score(found_verbs.len());

    let score = weighted_score(keyword_match_rate, section_score, contact_score, verb_score);

    debug!(
        score,
        keyword_match_rate,
        section_score,
        contact_score,
        verb_score,
        "resume scanned"
    );

    let suggestions = build_suggestions(&SuggestionInputs {
        contact: &contact_info,
        sections: &sections,
        keyword_match_rate,
        verb_count: found_verbs.len(),
        resume_chars: resume_text.chars().count(),
    });

    Ok(ScanResult {
        score,
        matched_keywords: keywords.matched,
        missing_keywords: keywords.missing,
        suggestions,
        details: ScanDetails {
            contact_info,
            sections,
            found_verbs,
        },
    })
}

fn percent(found: usize, total: usize) -> f64 {
    found as f64 / total as f64 * 100.0
}

/// 0.0 – 1.0, full credit from `VERB_SATURATION` verbs upwards.
fn verb_score(found: usize) -> f64 {
    (found as f64 / VERB_SATURATION as f64).min(1.0)
}

fn weighted_score(
    keyword_rate: f64,
    section_score: f64,
    contact_score: f64,
    verb_score: f64,
) -> u32 {
    let raw = keyword_rate * KEYWORD_WEIGHT
        + section_score * SECTION_WEIGHT
        + contact_score * CONTACT_WEIGHT
        + verb_score * VERB_WEIGHT;
    (raw.round() as u32).min(MAX_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::suggestions::Severity;
    use std::collections::BTreeSet;

    const FULL_RESUME: &str = "Jane Doe, full-stack developer\n\
        email: jane@example.com, phone 555-123-4567, linkedin.com/in/jane, github.com/jane\n\
        Education: BS CS. Experience: 3 years at Acme. Skills: React, Node. \
        Projects: built X. Certifications: AWS.\n\
        Led a team of four, developed React and Node services backed by MongoDB and Express, \
        optimized queries, managed releases, designed APIs.";

    const MERN_JD: &str = "React Node MongoDB Express developer role requiring experience";

    fn critical_count(result: &ScanResult) -> usize {
        result
            .suggestions
            .iter()
            .filter(|s| s.severity == Severity::Critical)
            .count()
    }

    #[test]
    fn test_both_empty_is_invalid_input() {
        assert!(matches!(analyze("", ""), Err(ScanError::InvalidInput(_))));
    }

    #[test]
    fn test_whitespace_only_inputs_are_scored() {
        let result = analyze("  \n", "\t").unwrap();
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_empty_resume_scores_near_zero() {
        let result = analyze("", MERN_JD).unwrap();
        assert!(result.score <= 5, "score was {}", result.score);
        assert!(result.matched_keywords.is_empty());
        assert_eq!(
            result.missing_keywords,
            vec!["react", "node", "mongodb", "express", "developer"]
        );
        assert_eq!(result.details.sections, SectionFlags::default());
        assert_eq!(result.details.contact_info, ContactInfo::default());
        assert_eq!(critical_count(&result), 4);
    }

    #[test]
    fn test_complete_resume_scores_high() {
        let result = analyze(FULL_RESUME, MERN_JD).unwrap();
        assert!(result.missing_keywords.is_empty(), "{:?}", result.missing_keywords);
        assert_eq!(result.details.contact_info.count(), ContactInfo::TOTAL);
        assert_eq!(result.details.sections.count(), SectionFlags::TOTAL);
        assert!(result.details.found_verbs.len() >= 5);
        assert!(result.score >= 90, "score was {}", result.score);
        assert_eq!(critical_count(&result), 0);
    }

    #[test]
    fn test_empty_job_description_contributes_nothing() {
        let with_jd = analyze(FULL_RESUME, "the and experience").unwrap();
        assert!(with_jd.matched_keywords.is_empty());
        assert!(with_jd.missing_keywords.is_empty());
        // sections 30 + contact 20 + verbs 10, no keyword share
        assert_eq!(with_jd.score, 60);

        let without_jd = analyze(FULL_RESUME, "").unwrap();
        assert_eq!(without_jd.score, 60);
    }

    #[test]
    fn test_keyword_partition_matches_extracted_set() {
        let jd = "Rust engineer: tokio, axum, postgres, kafka, kubernetes. Rust again.";
        let result = analyze("I write rust with tokio and postgres", jd).unwrap();

        let matched: BTreeSet<_> = result.matched_keywords.iter().cloned().collect();
        let missing: BTreeSet<_> = result.missing_keywords.iter().cloned().collect();
        assert!(matched.is_disjoint(&missing));

        let union: BTreeSet<String> = matched.union(&missing).cloned().collect();
        let expected: BTreeSet<String> = extract_keywords(&jd.to_lowercase()).into_iter().collect();
        assert_eq!(union, expected);
        assert_eq!(result.matched_keywords.len() + result.missing_keywords.len(), expected.len());
    }

    #[test]
    fn test_verb_contribution_saturates() {
        assert_eq!(verb_score(0), 0.0);
        assert!((verb_score(3) - 0.6).abs() < f64::EPSILON);
        assert_eq!(verb_score(5), 1.0);
        assert_eq!(verb_score(7), 1.0);

        let five = analyze("led developed optimized managed designed", "").unwrap();
        let nine = analyze(
            "led developed optimized managed designed implemented created built launched",
            "",
        )
        .unwrap();
        assert_eq!(five.score, nine.score);
        assert_eq!(five.score, 10);
    }

    #[test]
    fn test_weighted_score_is_rounded_and_clamped() {
        assert_eq!(weighted_score(0.0, 0.0, 0.0, 0.0), 0);
        assert_eq!(weighted_score(1.0, 100.0, 100.0, 1.0), 100);
        // 0.5*40 + 20*0.3 + 25*0.2 + 0.2*10 = 20 + 6 + 5 + 2
        assert_eq!(weighted_score(0.5, 20.0, 25.0, 0.2), 33);
        // 0.0125*40 = 0.5 rounds up
        assert_eq!(weighted_score(0.0125, 0.0, 0.0, 0.0), 1);
        assert_eq!(weighted_score(2.0, 100.0, 100.0, 1.0), MAX_SCORE);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let inputs = [
            ("", "rust"),
            ("rust", ""),
            (FULL_RESUME, MERN_JD),
            (FULL_RESUME, FULL_RESUME),
            ("x".repeat(5000).as_str(), "xxx yyy"),
        ]
        .map(|(r, j)| (r.to_string(), j.to_string()));
        for (resume, jd) in &inputs {
            let result = analyze(resume, jd).unwrap();
            assert!(result.score <= MAX_SCORE);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = analyze(FULL_RESUME, MERN_JD).unwrap();
        let b = analyze(FULL_RESUME, MERN_JD).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_length_boundaries() {
        let too_short = |len: usize| {
            analyze(&"a".repeat(len), "rust")
                .unwrap()
                .suggestions
                .iter()
                .any(|s| s.severity == Severity::Formatting && s.text.contains("too short"))
        };
        let too_long = |len: usize| {
            analyze(&"a".repeat(len), "rust")
                .unwrap()
                .suggestions
                .iter()
                .any(|s| s.severity == Severity::Formatting && s.text.contains("too long"))
        };
        assert!(too_short(499));
        assert!(!too_short(500));
        assert!(!too_long(3000));
        assert!(too_long(3001));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let result = analyze(&"é".repeat(500), "rust").unwrap();
        assert!(!result.suggestions.iter().any(|s| s.text.contains("too short")));
    }

    #[test]
    fn test_json_field_names() {
        let result = analyze(FULL_RESUME, MERN_JD).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["score"].is_u64());
        assert!(json["matchedKeywords"].is_array());
        assert!(json["missingKeywords"].is_array());
        assert!(json["suggestions"].is_array());
        assert_eq!(json["details"]["contactInfo"]["email"], true);
        assert_eq!(json["details"]["sections"]["certifications"], true);
        assert!(json["details"]["foundVerbs"].is_array());
    }

    #[test]
    fn test_json_round_trip_preserves_structure() {
        let result = analyze("", MERN_JD).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ScanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_trait_object_delegates() {
        let scorer: Box<dyn ResumeScorer> = Box::new(KeywordResumeScorer);
        assert_eq!(
            scorer.analyze(FULL_RESUME, MERN_JD).unwrap(),
            analyze(FULL_RESUME, MERN_JD).unwrap()
        );
    }
}
