//! Answer pipeline for Parley.
//!
//! Classifies incoming messages, resolves them through dedicated resolvers
//! or a model-augmented chain, and records each exchange.

pub mod arith;
pub mod chain;
pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use arith::ArithmeticEvaluator;
pub use chain::FallbackChain;
pub use classifier::Classifier;
pub use error::{ChatError, ResolveError};
pub use orchestrator::{ChatOrchestrator, Dispatcher, Pipeline, Routes};
pub use resolver::completion::model_augmented;
pub use resolver::{CompletionSettings, Resolver};
