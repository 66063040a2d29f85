//! Ticket classification — local keyword and regex analysis of a support
//! ticket body. No LLM call; deterministic by construction.

pub mod handlers;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Question,
    Feature,
}

/// Entities pulled out of a ticket body. Missing fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketEntities {
    pub user: String,
    pub os: String,
    pub version: String,
}

const HIGH_PRIORITY_WORDS: &[&str] = &[
    "critical",
    "urgent",
    "emergency",
    "blocking",
    "crash",
    "down",
    "broken",
    "not working",
    "failed",
    "error",
    "exception",
    "serious",
    "major",
    "severe",
    "asap",
    "immediately",
    "production",
    "outage",
    "unavailable",
    "cannot",
    "can't",
    "unable",
    "stuck",
    "freeze",
    "hang",
];

const LOW_PRIORITY_WORDS: &[&str] = &[
    "question",
    "how",
    "what",
    "when",
    "where",
    "why",
    "can i",
    "is there",
    "would like",
    "could you",
    "suggestion",
    "idea",
    "enhancement",
    "improvement",
    "nice to have",
    "eventually",
    "minor",
    "small",
    "trivial",
    "cosmetic",
];

const BUG_WORDS: &[&str] = &[
    "crash",
    "error",
    "exception",
    "bug",
    "broken",
    "not working",
    "fail",
    "wrong",
    "incorrect",
    "unexpected",
    "freeze",
    "hang",
    "stuck",
    "glitch",
    "malfunction",
    "defect",
];

const FEATURE_WORDS: &[&str] = &[
    "feature",
    "add",
    "new",
    "request",
    "enhancement",
    "improvement",
    "suggest",
    "idea",
    "would like",
    "please implement",
    "support for",
    "integrate",
    "allow",
    "enable",
];

const QUESTION_STARTERS: &[&str] = &[
    "how", "what", "when", "where", "why", "can", "is", "does", "will", "would", "could", "should",
];

static USER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\buser[:\s]+(\w+)",
        r"\breported by[:\s]+(\w+)",
        r"\bfrom[:\s]+(\w+)",
        r"\bby[:\s]+(\w+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid user pattern"))
    .collect()
});

static OS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:operating system|os|platform)[:\s]+([^,\n]+)").expect("valid os pattern")
});

static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bversion[:\s]+(v?[\d.]+\S*)",
        r"\bver[:\s]+(v?[\d.]+\S*)",
        r"\bv[:\s]*([\d.]+\S*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid version pattern"))
    .collect()
});

/// Extracts user, OS, and version fields from a ticket body.
/// First matching pattern wins per field; bare numeric versions get a `v`.
pub fn extract_entities(text: &str) -> TicketEntities {
    let text_lower = text.to_lowercase();
    let mut entities = TicketEntities::default();

    for pattern in USER_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text_lower) {
            entities.user = caps[1].to_string();
            break;
        }
    }

    if let Some(caps) = OS_PATTERN.captures(&text_lower) {
        entities.os = caps[1].trim().to_string();
    }

    for pattern in VERSION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text_lower) {
            let mut version = caps[1].trim().to_string();
            if version.starts_with(|c: char| c.is_ascii_digit()) {
                version.insert(0, 'v');
            }
            entities.version = version;
            break;
        }
    }

    entities
}

/// Classifies a ticket body into (priority, category) via keyword tables.
///
/// Priority: first high-priority hit wins, then low, else medium.
/// Category: bug indicators win outright; otherwise feature indicators, and a
/// `?` or a leading question word pulls a non-bug ticket back to question.
pub fn classify(text: &str) -> (Priority, Category) {
    let text_lower = text.to_lowercase();

    let priority = if contains_any(&text_lower, HIGH_PRIORITY_WORDS) {
        Priority::High
    } else if contains_any(&text_lower, LOW_PRIORITY_WORDS) {
        Priority::Low
    } else {
        Priority::Medium
    };

    let category = if contains_any(&text_lower, BUG_WORDS) {
        Category::Bug
    } else if looks_like_question(&text_lower) {
        Category::Question
    } else if contains_any(&text_lower, FEATURE_WORDS) {
        Category::Feature
    } else {
        Category::Question
    };

    (priority, category)
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn looks_like_question(text_lower: &str) -> bool {
    text_lower.contains('?')
        || QUESTION_STARTERS
            .iter()
            .any(|w| text_lower.starts_with(&format!("{w} ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_entities_structured_ticket() {
        let entities = extract_entities(
            "User: bob\nOS: Ubuntu 22.04\nVersion: 2.1.3\nThe app crashes on startup.",
        );
        assert_eq!(entities.user, "bob");
        assert_eq!(entities.os, "ubuntu 22.04");
        assert_eq!(entities.version, "v2.1.3");
    }

    #[test]
    fn test_extract_entities_prose_ticket() {
        let entities =
            extract_entities("Reported by alice. Platform: macos sonoma. Running v1.0.2 here.");
        assert_eq!(entities.user, "alice");
        assert_eq!(entities.os, "macos sonoma. running v1.0.2 here.");
        assert_eq!(entities.version, "v1.0.2");
    }

    #[test]
    fn test_extract_entities_missing_fields_stay_empty() {
        let entities = extract_entities("Everything is fine, just saying hi.");
        assert_eq!(entities, TicketEntities::default());
    }

    #[test]
    fn test_extract_entities_version_gets_v_prefix() {
        let entities = extract_entities("version: 3.0");
        assert_eq!(entities.version, "v3.0");
    }

    #[test]
    fn test_classify_crash_is_high_priority_bug() {
        let (priority, category) = classify("The app crashes immediately on startup!");
        assert_eq!(priority, Priority::High);
        assert_eq!(category, Category::Bug);
    }

    #[test]
    fn test_classify_question_is_low_priority() {
        let (priority, category) = classify("How do I export my data to CSV?");
        assert_eq!(priority, Priority::Low);
        assert_eq!(category, Category::Question);
    }

    #[test]
    fn test_classify_feature_request() {
        let (priority, category) = classify("Please implement dark mode, it would be great.");
        assert_eq!(priority, Priority::Medium);
        assert_eq!(category, Category::Feature);
    }

    #[test]
    fn test_classify_bug_wins_over_question_mark() {
        let (_, category) = classify("Why does the export throw an error every time?");
        assert_eq!(category, Category::Bug);
    }

    #[test]
    fn test_classify_neutral_text_defaults() {
        let (priority, category) = classify("The dashboard looks different today.");
        assert_eq!(priority, Priority::Medium);
        assert_eq!(category, Category::Question);
    }
}
