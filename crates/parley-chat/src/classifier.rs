//! Rule-based intent classifier.
//!
//! Maps raw message text to exactly one [`Intent`] by walking an ordered list
//! of `(pattern, intent)` rules and returning the first match.

use std::sync::LazyLock;

use regex::Regex;

use parley_core::Intent;

// =============================================================================
// Compiled rules (compiled once, reused across calls)
// =============================================================================

struct IntentRule {
    intent: Intent,
    pattern: Regex,
}

/// Rules in priority order. Categories overlap ("what is the weather" holds a
/// weather cue and a knowledge cue), so order decides the winner.
static INTENT_RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    let rule = |intent: Intent, pattern: &str| IntentRule {
        intent,
        pattern: Regex::new(pattern).expect("Invalid intent regex"),
    };

    vec![
        rule(Intent::Weather, r"(?i)weather|temperature"),
        rule(Intent::Time, r"(?i)time|date"),
        // digits, operator, digits; parentheses may sit between operand and operator
        rule(Intent::Math, r"\d+\s*\)*\s*[+\-*/]\s*\(*\s*\d+"),
        rule(Intent::Knowledge, r"(?i)who is|what is|define"),
    ]
});

// =============================================================================
// Classifier
// =============================================================================

/// Pure, total message classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. Falls back to [`Intent::General`] when no rule matches.
    pub fn classify(&self, text: &str) -> Intent {
        INTENT_RULES
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::General)
    }
}

// =============================================================================
// Tests
// =============================================================================
