//! Resolver trait and the concrete resolvers.
//!
//! A resolver attempts to answer a [`Query`] using one or two capabilities.
//! It either answers, declines with a sentinel text, or raises a
//! [`ResolveError`] that the enclosing fallback chain captures.

pub mod completion;
pub mod knowledge;
pub mod math;
pub mod search;
pub mod time;
pub mod weather;

use async_trait::async_trait;

use parley_core::{Query, ResolverResult};

use crate::error::ResolveError;

pub use completion::{CompletionSettings, ContextualCompletionResolver, DirectCompletionResolver};
pub use knowledge::KnowledgeResolver;
pub use math::MathResolver;
pub use search::{AcknowledgmentResolver, SearchResolver};
pub use time::TimeResolver;
pub use weather::WeatherResolver;

/// A strategy that turns a query into an answer or a sentinel.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError>;
}
