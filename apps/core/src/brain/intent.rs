//! Intent Classification using trigger phrases.
//!
//! Each intent owns a fixed set of trigger phrases. A message is lower-cased
//! and matched against the sets in priority order; the first set with any
//! phrase contained in the message wins. Matching is plain substring search
//! over the whole message, so phrases embedded in longer words still match.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Look up community members by name, email, role or city
    MemberSearch,
    /// Look up job postings
    JobSearch,
    /// Community statistics
    Statistics,
    /// General information about the community
    CommunityInfo,
    /// Anything else, answered by the LLM
    Fallback,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::MemberSearch => "member_search",
            Intent::JobSearch => "job_search",
            Intent::Statistics => "statistics",
            Intent::CommunityInfo => "community_info",
            Intent::Fallback => "fallback",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Trigger phrases of the winning intent found in the message
    pub matched_phrases: Vec<String>,
    /// Lower-cased message with the intent's strip phrases removed, trimmed.
    /// Equal to the normalized message for intents that take no query.
    pub residual: String,
}

const MEMBER_TRIGGERS: &[&str] = &[
    "find member",
    "search member",
    "search for member",
    "look for member",
    "find user",
    "search user",
];

const JOB_TRIGGERS: &[&str] = &[
    "find job",
    "search job",
    "show job",
    "show me jobs",
    "list jobs",
    "search for job",
    "job opening",
    "job opportunity",
];

// "job opening" and "job opportunity" classify but stay in the query.
const JOB_STRIP: &[&str] = &[
    "find job",
    "search job",
    "show job",
    "show me jobs",
    "list jobs",
    "search for job",
];

const STATISTICS_TRIGGERS: &[&str] = &[
    "how many",
    "total",
    "statistics",
    "stats",
    "count",
    "number of members",
    "how many members",
    "member count",
];

const COMMUNITY_TRIGGERS: &[&str] = &[
    "about community",
    "about garje",
    "what is garje",
    "community info",
    "community details",
    "who are we",
];

/// Phrase set for one intent
struct IntentPattern {
    intent: Intent,
    triggers: &'static [&'static str],
    /// Phrases removed, in this order, to recover the residual query
    strip: &'static [&'static str],
}

/// Intent classifier using ordered trigger phrase sets
pub struct IntentClassifier {
    patterns: Vec<IntentPattern>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier. Pattern order is the priority order.
    pub fn new() -> Self {
        let patterns = vec![
            IntentPattern {
                intent: Intent::MemberSearch,
                triggers: MEMBER_TRIGGERS,
                strip: MEMBER_TRIGGERS,
            },
            IntentPattern {
                intent: Intent::JobSearch,
                triggers: JOB_TRIGGERS,
                strip: JOB_STRIP,
            },
            IntentPattern {
                intent: Intent::Statistics,
                triggers: STATISTICS_TRIGGERS,
                strip: &[],
            },
            IntentPattern {
                intent: Intent::CommunityInfo,
                triggers: COMMUNITY_TRIGGERS,
                strip: &[],
            },
        ];

        Self { patterns }
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> IntentResult {
        let normalized = text.to_lowercase().trim().to_string();

        for pattern in &self.patterns {
            let matched_phrases: Vec<String> = pattern
                .triggers
                .iter()
                .filter(|phrase| normalized.contains(*phrase))
                .map(|phrase| phrase.to_string())
                .collect();

            if !matched_phrases.is_empty() {
                return IntentResult {
                    intent: pattern.intent,
                    matched_phrases,
                    residual: strip_phrases(&normalized, pattern.strip),
                };
            }
        }

        IntentResult {
            intent: Intent::Fallback,
            matched_phrases: vec![],
            residual: normalized,
        }
    }
}

/// Removes every occurrence of each phrase, in order, then trims.
///
/// Removal is literal: a phrase that is a prefix of a longer word leaves the
/// remainder behind ("find jobs" loses "find job" and keeps "s").
fn strip_phrases(text: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_search_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("Find member Asha");
        assert_eq!(result.intent, Intent::MemberSearch);
        assert_eq!(result.residual, "asha");
        assert_eq!(result.matched_phrases, vec!["find member"]);

        let result = classifier.classify("please search user john@x.com");
        assert_eq!(result.intent, Intent::MemberSearch);
        assert_eq!(result.residual, "please  john@x.com");
    }

    #[test]
    fn test_member_search_without_query() {
        let classifier = IntentClassifier::new();
        let result = classifier.classify("  look for member  ");
        assert_eq!(result.intent, Intent::MemberSearch);
        assert!(result.residual.is_empty());
    }

    #[test]
    fn test_job_search_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("show me jobs");
        assert_eq!(result.intent, Intent::JobSearch);
        assert!(result.residual.is_empty());

        let result = classifier.classify("find job Pune");
        assert_eq!(result.intent, Intent::JobSearch);
        assert_eq!(result.residual, "pune");
    }

    #[test]
    fn test_job_strip_is_literal() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("find jobs in pune");
        assert_eq!(result.intent, Intent::JobSearch);
        assert_eq!(result.residual, "s in pune");

        let result = classifier.classify("any job opening at acme");
        assert_eq!(result.intent, Intent::JobSearch);
        assert_eq!(result.residual, "any job opening at acme");
    }

    #[test]
    fn test_priority_order() {
        let classifier = IntentClassifier::new();

        // Job phrases are checked before statistics phrases.
        let result = classifier.classify("how many jobs? list jobs");
        assert_eq!(result.intent, Intent::JobSearch);

        // "jobs" alone is not a job trigger.
        let result = classifier.classify("how many jobs");
        assert_eq!(result.intent, Intent::Statistics);

        // Member phrases beat everything.
        let result = classifier.classify("find member count");
        assert_eq!(result.intent, Intent::MemberSearch);
        assert_eq!(result.residual, "count");
    }

    #[test]
    fn test_statistics_detection() {
        let classifier = IntentClassifier::new();

        for text in ["How many members?", "show stats", "Total jobs", "accounts"] {
            assert_eq!(classifier.classify(text).intent, Intent::Statistics, "{}", text);
        }
    }

    #[test]
    fn test_community_info_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("What is Garje Marathi?");
        assert_eq!(result.intent, Intent::CommunityInfo);
        assert_eq!(result.matched_phrases, vec!["what is garje"]);
    }

    #[test]
    fn test_fallback_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("Tell me a joke");
        assert_eq!(result.intent, Intent::Fallback);
        assert!(result.matched_phrases.is_empty());

        assert_eq!(classifier.classify("").intent, Intent::Fallback);
        assert_eq!(classifier.classify("   ").intent, Intent::Fallback);
    }
}
