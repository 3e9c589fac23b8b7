//! Error types for the answer pipeline.

use parley_core::CapabilityError;

/// Errors surfaced to the caller of the pipeline.
///
/// Everything except input validation is absorbed into sentinel text.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is required")]
    MissingMessage,
}

/// Errors a resolver may raise. The fallback chain captures them and moves
/// on to the next strategy; they never reach the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("capability failed: {0}")]
    Capability(#[from] CapabilityError),
}
