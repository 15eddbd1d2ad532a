//! Resume signals — section headers, contact details and action verbs.
//!
//! All patterns are compiled once and shared read-only between requests.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Which of the standard resume sections were detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFlags {
    pub education: bool,
    pub experience: bool,
    pub skills: bool,
    pub projects: bool,
    pub certifications: bool,
}

impl SectionFlags {
    pub const TOTAL: usize = 5;

    pub fn count(&self) -> usize {
        [
            self.education,
            self.experience,
            self.skills,
            self.projects,
            self.certifications,
        ]
        .into_iter()
        .filter(|&found| found)
        .count()
    }
}

struct SectionPatterns {
    education: Regex,
    experience: Regex,
    skills: Regex,
    projects: Regex,
    certifications: Regex,
}

static SECTION_PATTERNS: LazyLock<SectionPatterns> = LazyLock::new(|| SectionPatterns {
    education: compile(r"(?i)\b(education|academic background|qualifications?)\b"),
    experience: compile(
        r"(?i)\b(experience|employment|work history|professional background|internships?)\b",
    ),
    skills: compile(r"(?i)\b(skills|technical skills|technologies|competencies)\b"),
    projects: compile(r"(?i)\b(projects?|portfolio)\b"),
    certifications: compile(r"(?i)\b(certifications?|certificates?|licenses)\b"),
});

/// Detects standard section headers anywhere in the resume text.
pub fn detect_sections(resume: &str) -> SectionFlags {
    let p = &*SECTION_PATTERNS;
    SectionFlags {
        education: p.education.is_match(resume),
        experience: p.experience.is_match(resume),
        skills: p.skills.is_match(resume),
        projects: p.projects.is_match(resume),
        certifications: p.certifications.is_match(resume),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact info
// ────────────────────────────────────────────────────────────────────────────

/// Which contact channels the resume exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: bool,
    pub phone: bool,
    pub linkedin: bool,
    pub github: bool,
}

impl ContactInfo {
    pub const TOTAL: usize = 4;

    pub fn count(&self) -> usize {
        [self.email, self.phone, self.linkedin, self.github]
            .into_iter()
            .filter(|&found| found)
            .count()
    }
}

struct ContactPatterns {
    email: Regex,
    phone: Regex,
    linkedin: Regex,
    github: Regex,
}

static CONTACT_PATTERNS: LazyLock<ContactPatterns> = LazyLock::new(|| ContactPatterns {
    email: compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"),
    // NANP grouping: optional +country code, optional parens, space/dot/dash separators
    phone: compile(r"(\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}"),
    linkedin: compile(r"(?i)linkedin\.com/in/"),
    github: compile(r"(?i)github\.com/"),
});

/// Detects contact details. Runs on the original-case text so that email
/// local parts and URLs are not altered before matching.
pub fn detect_contact_info(resume: &str) -> ContactInfo {
    let p = &*CONTACT_PATTERNS;
    ContactInfo {
        email: p.email.is_match(resume),
        phone: p.phone.is_match(resume),
        linkedin: p.linkedin.is_match(resume),
        github: p.github.is_match(resume),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Action verbs
// ────────────────────────────────────────────────────────────────────────────

/// Strong verbs recruiters look for in experience bullets.
pub const ACTION_VERBS: &[&str] = &[
    "led",
    "developed",
    "optimized",
    "managed",
    "designed",
    "implemented",
    "created",
    "built",
    "launched",
    "improved",
    "increased",
    "reduced",
];

/// Returns the action verbs present in the lowercased resume, in list order.
///
/// Substring containment: "led" is also found inside "skilled".
pub fn find_action_verbs(resume_lower: &str) -> Vec<String> {
    ACTION_VERBS
        .iter()
        .filter(|verb| resume_lower.contains(*verb))
        .map(|verb| verb.to_string())
        .collect()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static resume pattern is valid")
}
