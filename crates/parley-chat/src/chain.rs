//! Ordered fallback over resolvers.

use std::sync::Arc;

use async_trait::async_trait;

use parley_core::{Query, ResolverResult};

use crate::error::ResolveError;
use crate::resolver::Resolver;

pub const NO_ANSWER: &str = "Sorry, I couldn't come up with an answer to that.";

/// Runs its steps in order and returns the first success.
///
/// A step that errors is logged and skipped. When no step succeeds the chain
/// declines with the most recent non-blank sentinel, or with its terminal
/// text if every step declined silently. The chain itself never errors.
pub struct FallbackChain {
    name: &'static str,
    steps: Vec<Arc<dyn Resolver>>,
    terminal: String,
}

impl FallbackChain {
    pub fn new(name: &'static str, steps: Vec<Arc<dyn Resolver>>) -> Self {
        Self {
            name,
            steps,
            terminal: NO_ANSWER.to_string(),
        }
    }

    /// Wrap a single resolver so its errors are captured too.
    pub fn single(resolver: Arc<dyn Resolver>) -> Self {
        Self::new(resolver.name(), vec![resolver])
    }

    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl Resolver for FallbackChain {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let mut last_sentinel: Option<String> = None;

        for step in &self.steps {
            match step.resolve(query).await {
                Ok(result) if result.succeeded => {
                    tracing::debug!(chain = self.name, step = step.name(), "Step answered");
                    return Ok(result);
                }
                Ok(result) => {
                    tracing::debug!(chain = self.name, step = step.name(), "Step declined");
                    if !result.text.trim().is_empty() {
                        last_sentinel = Some(result.text);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        chain = self.name,
                        step = step.name(),
                        error = %e,
                        "Step failed, trying next"
                    );
                }
            }
        }

        Ok(ResolverResult::declined(
            last_sentinel.unwrap_or_else(|| self.terminal.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::CapabilityError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Step with a fixed outcome that counts its invocations.
    struct Fixed {
        outcome: fn() -> Result<ResolverResult, ResolveError>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(outcome: fn() -> Result<ResolverResult, ResolveError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Resolver for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn resolve(&self, _query: &Query) -> Result<ResolverResult, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn answer() -> Result<ResolverResult, ResolveError> {
        Ok(ResolverResult::answered("yes"))
    }

    fn decline_loudly() -> Result<ResolverResult, ResolveError> {
        Ok(ResolverResult::declined("sorry"))
    }

    fn decline_silently() -> Result<ResolverResult, ResolveError> {
        Ok(ResolverResult::declined(""))
    }

    fn fail() -> Result<ResolverResult, ResolveError> {
        Err(CapabilityError::Unavailable("boom".into()).into())
    }

    fn query() -> Query {
        Query::new("q", None)
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = Fixed::new(answer);
        let second = Fixed::new(answer);
        let steps: Vec<Arc<dyn Resolver>> = vec![first.clone(), second.clone()];
        let chain = FallbackChain::new("t", steps);

        let result = chain.resolve(&query()).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_error_moves_to_next_step() {
        let first = Fixed::new(fail);
        let second = Fixed::new(answer);
        let steps: Vec<Arc<dyn Resolver>> = vec![first.clone(), second.clone()];
        let chain = FallbackChain::new("t", steps);

        let result = chain.resolve(&query()).await.unwrap();
        assert_eq!(result.text, "yes");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_last_sentinel_is_kept() {
        let steps: Vec<Arc<dyn Resolver>> = vec![
            Fixed::new(decline_loudly),
            Fixed::new(decline_silently),
            Fixed::new(fail),
        ];
        let chain = FallbackChain::new("t", steps);

        let result = chain.resolve(&query()).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.text, "sorry");
    }

    #[tokio::test]
    async fn test_terminal_when_no_sentinel() {
        let steps: Vec<Arc<dyn Resolver>> = vec![Fixed::new(fail), Fixed::new(decline_silently)];
        let chain = FallbackChain::new("t", steps).with_terminal("nothing");

        let result = chain.resolve(&query()).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.text, "nothing");
    }

    #[tokio::test]
    async fn test_empty_chain_uses_default_terminal() {
        let chain = FallbackChain::new("t", Vec::new());
        assert!(chain.is_empty());

        let result = chain.resolve(&query()).await.unwrap();
        assert_eq!(result.text, NO_ANSWER);
    }

    #[tokio::test]
    async fn test_single_captures_errors() {
        let chain = FallbackChain::single(Fixed::new(fail));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.name(), "fixed");
        assert!(chain.resolve(&query()).await.is_ok());
    }
}
