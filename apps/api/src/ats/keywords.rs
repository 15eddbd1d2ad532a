//! Keyword extraction from job descriptions and matching against resume text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Words of three letters or more; shorter tokens never count as keywords.
/// Boundaries are ASCII-only, so a non-ASCII letter splits a word.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[a-z]{3,}(?-u:\b)").expect("keyword pattern is valid")
});

/// Generic words that appear in almost every job posting and say nothing
/// about the role itself.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "you", "your", "our", "are", "will", "that", "this",
        "from", "have", "who", "about", "experience", "role", "requiring", "required",
        "resume", "job", "work", "years",
    ]
    .into_iter()
    .collect()
});

/// Outcome of checking every required keyword against the resume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordMatch {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    /// Fraction of required keywords found. Zero when nothing was required.
    pub fn match_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.matched.len() as f64 / total as f64,
        }
    }
}

/// Extracts the required keywords from an already-lowercased job description.
///
/// Keywords are deduplicated and returned in order of first appearance.
pub fn extract_keywords(jd_lower: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD.find_iter(jd_lower)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(*word))
        .filter(|word| seen.insert(*word))
        .map(String::from)
        .collect()
}

/// Splits `keywords` into matched and missing by plain substring containment
/// in the lowercased resume. `java` matches inside `javascript`.
pub fn match_keywords(keywords: Vec<String>, resume_lower: &str) -> KeywordMatch {
    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|kw| resume_lower.contains(kw.as_str()));
    KeywordMatch { matched, missing }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_words_of_three_letters_or_more() {
        let kws = extract_keywords("go rust sql is ok");
        assert_eq!(kws, vec!["rust", "sql"]);
    }

    #[test]
    fn test_removes_stop_words() {
        let kws = extract_keywords(
            "react node mongodb express developer role requiring experience",
        );
        assert_eq!(kws, vec!["react", "node", "mongodb", "express", "developer"]);
    }

    #[test]
    fn test_deduplicates_in_first_seen_order() {
        let kws = extract_keywords("kafka rust kafka postgres rust");
        assert_eq!(kws, vec!["kafka", "rust", "postgres"]);
    }

    #[test]
    fn test_ignores_digits_and_punctuation() {
        let kws = extract_keywords("node.js, c++ and 5+ years of aws3");
        // "aws3" is a single word token so the boundary after "aws" never holds
        assert_eq!(kws, vec!["node"]);
    }

    #[test]
    fn test_non_ascii_letters_split_words() {
        let kws = extract_keywords("développeur react");
        assert_eq!(kws, vec!["veloppeur", "react"]);
        assert_eq!(extract_keywords("naïve café"), vec!["caf"]);
    }

    #[test]
    fn test_only_stop_words_yields_nothing() {
        assert!(extract_keywords("the experience and the role").is_empty());
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_stop_word_list_is_small_and_generic() {
        assert!(STOP_WORDS.len() <= 25);
        assert!(STOP_WORDS.contains("experience"));
        assert!(STOP_WORDS.contains("resume"));
        assert!(!STOP_WORDS.contains("rust"));
    }

    #[test]
    fn test_substring_matching_is_permissive() {
        let result = match_keywords(
            vec!["java".to_string(), "script".to_string(), "kotlin".to_string()],
            "five years of javascript",
        );
        assert_eq!(result.matched, vec!["java", "script"]);
        assert_eq!(result.missing, vec!["kotlin"]);
    }

    #[test]
    fn test_match_rate_zero_when_no_keywords() {
        let result = match_keywords(vec![], "anything at all");
        assert_eq!(result.total(), 0);
        assert_eq!(result.match_rate(), 0.0);
    }

    #[test]
    fn test_match_rate_fraction() {
        let result = match_keywords(
            vec!["rust".into(), "tokio".into(), "axum".into(), "kafka".into()],
            "rust and tokio services",
        );
        assert!((result.match_rate() - 0.5).abs() < f64::EPSILON);
    }
}
