use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User id assigned to queries that arrive without one.
pub const ANONYMOUS_USER: &str = "anonymous";

// =============================================================================
// Enums
// =============================================================================

/// The classification label assigned to an incoming message.
///
/// Produced by a single first-match decision; intents are never combined
/// or weighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Current conditions for a named location.
    Weather,
    /// Current local date and time.
    Time,
    /// An arithmetic expression to evaluate.
    Math,
    /// Encyclopedic "who is" / "what is" / "define" lookup.
    Knowledge,
    /// Anything else; answered by web search.
    General,
}

impl Intent {
    /// Every intent, in classification priority order.
    pub const ALL: [Intent; 5] = [
        Intent::Weather,
        Intent::Time,
        Intent::Math,
        Intent::Knowledge,
        Intent::General,
    ];

    /// Returns the wire name of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Weather => "weather",
            Intent::Time => "time",
            Intent::Math => "math",
            Intent::Knowledge => "knowledge",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pipeline values
// =============================================================================

/// A single incoming question. Created per request and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub user_id: String,
}

impl Query {
    /// Build a query, falling back to [`ANONYMOUS_USER`] when no user id is given
    /// or the given one is blank.
    pub fn new(text: impl Into<String>, user_id: Option<&str>) -> Self {
        let user_id = match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => ANONYMOUS_USER.to_string(),
        };
        Self {
            text: text.into(),
            user_id,
        }
    }
}

/// Outcome of one resolver attempt.
///
/// A resolver either fully answers (`succeeded`) or fully declines with a
/// human-readable sentinel text. There are no partial results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverResult {
    pub text: String,
    pub succeeded: bool,
}

impl ResolverResult {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    pub fn declined(sentinel: impl Into<String>) -> Self {
        Self {
            text: sentinel.into(),
            succeeded: false,
        }
    }
}

/// Final answer returned by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Only present in rule-routed mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

/// One persisted question/answer exchange. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub intent: Option<Intent>,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(query: &Query, answer: &Answer) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: query.user_id.clone(),
            message: query.text.clone(),
            response: answer.text.clone(),
            intent: answer.intent,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Capability payloads
// =============================================================================

/// Current conditions for a geocoded location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Location name as resolved by the geocoder.
    pub resolved_name: String,
    pub temperature_celsius: f64,
    pub wind_speed_kph: f64,
}

/// A single language-model completion request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_content: String,
    pub max_tokens: u32,
    pub temperature: f32,
}
