use std::sync::Arc;

use async_trait::async_trait;

use parley_core::{Query, ResolverResult, WebSearch};

use super::Resolver;
use crate::error::ResolveError;

/// Answers with the instant-answer text for the full message.
///
/// Declines with an empty sentinel when search has nothing, so that the
/// acknowledgment step of the general chain supplies the text.
pub struct SearchResolver {
    search: Arc<dyn WebSearch>,
}

impl SearchResolver {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Resolver for SearchResolver {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        match self.search.search(&query.text).await? {
            Some(text) if !text.trim().is_empty() => Ok(ResolverResult::answered(text)),
            _ => Ok(ResolverResult::declined("")),
        }
    }
}

/// Canned reply that echoes the message back. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgmentResolver;

impl AcknowledgmentResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn acknowledge(text: &str) -> String {
        format!(
            "I received your message: \"{}\". I'm still learning, so I don't have a good answer for that yet.",
            text
        )
    }
}

#[async_trait]
impl Resolver for AcknowledgmentResolver {
    fn name(&self) -> &'static str {
        "acknowledgment"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        Ok(ResolverResult::answered(Self::acknowledge(&query.text)))
    }
}
