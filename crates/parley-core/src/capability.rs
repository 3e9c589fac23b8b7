//! Capability interfaces for the external collaborators the pipeline consumes.
//!
//! Each trait is a narrow input/output contract. Concrete HTTP adapters live in
//! `parley-providers`, persistence lives in `parley-storage`, and tests supply
//! hand-written stubs.

use async_trait::async_trait;

use crate::types::{ChatRecord, CompletionRequest, WeatherReport};

/// Errors a capability can report back to its resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("not found: {0}")]
    NotFound(String),
    /// Missing or rejected credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("result is not a finite number")]
    NonFinite,
}

/// Geocode a place name, then fetch its current conditions.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Returns `CapabilityError::NotFound` when the name does not geocode.
    async fn geocode_and_forecast(&self, location: &str)
        -> Result<WeatherReport, CapabilityError>;
}

/// Short encyclopedia summary for a topic.
#[async_trait]
pub trait EncyclopediaLookup: Send + Sync {
    async fn summary(&self, topic: &str) -> Result<String, CapabilityError>;
}

/// Free-text web search returning a single digest of the results.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// `Ok(None)` means the search ran but produced nothing usable.
    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError>;
}

/// Language-model text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CapabilityError>;
}

/// Numeric expression evaluation.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// Append-only sink for finished exchanges.
#[async_trait]
pub trait ChatRecorder: Send + Sync {
    /// Whether the backing store can currently accept writes.
    fn is_ready(&self) -> bool;

    async fn record_chat(&self, record: ChatRecord) -> Result<(), CapabilityError>;
}
