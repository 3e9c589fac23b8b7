//! Language-model resolvers for the model-augmented pipeline.
//!
//! The pipeline is a two-step [`FallbackChain`]: synthesis over search
//! context first, then a direct completion of the bare message.

use std::sync::Arc;

use async_trait::async_trait;

use parley_core::{
    CapabilityError, CompletionRequest, LanguageModel, PipelineConfig, Query, ResolverResult,
    WebSearch,
};

use super::Resolver;
use crate::chain::FallbackChain;
use crate::error::ResolveError;

pub const MODEL_UNAUTHORIZED: &str =
    "The language model is not configured correctly: the API key is missing or invalid.";
pub const MODEL_UNAVAILABLE: &str =
    "Sorry, the language model is unavailable right now. Please try again later.";

/// Prompt parameters shared by both completion steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionSettings {
    fn request(&self, user_content: String) -> CompletionRequest {
        CompletionRequest {
            system_prompt: self.system_prompt.clone(),
            user_content,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl From<&PipelineConfig> for CompletionSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

fn contextual_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the following search results to answer the question.\n\n\
         Search results:\n{}\n\nQuestion: {}",
        context, question
    )
}

// =============================================================================
// Contextual synthesis
// =============================================================================

/// Searches the message, then asks the model to answer using the result.
///
/// Declines when search yields nothing so the direct step takes over.
pub struct ContextualCompletionResolver {
    search: Arc<dyn WebSearch>,
    model: Arc<dyn LanguageModel>,
    settings: CompletionSettings,
}

impl ContextualCompletionResolver {
    pub fn new(
        search: Arc<dyn WebSearch>,
        model: Arc<dyn LanguageModel>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            search,
            model,
            settings,
        }
    }
}

#[async_trait]
impl Resolver for ContextualCompletionResolver {
    fn name(&self) -> &'static str {
        "contextual_completion"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let context = match self.search.search(&query.text).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::debug!("No search context, deferring to direct completion");
                return Ok(ResolverResult::declined(""));
            }
        };

        let request = self
            .settings
            .request(contextual_prompt(&context, &query.text));
        let completion = self.model.complete(&request).await?;

        if completion.trim().is_empty() {
            Ok(ResolverResult::declined(""))
        } else {
            Ok(ResolverResult::answered(completion))
        }
    }
}

// =============================================================================
// Direct completion
// =============================================================================

/// Sends the bare message to the model. Turns every failure into a sentinel.
pub struct DirectCompletionResolver {
    model: Arc<dyn LanguageModel>,
    settings: CompletionSettings,
}

impl DirectCompletionResolver {
    pub fn new(model: Arc<dyn LanguageModel>, settings: CompletionSettings) -> Self {
        Self { model, settings }
    }
}

#[async_trait]
impl Resolver for DirectCompletionResolver {
    fn name(&self) -> &'static str {
        "direct_completion"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let request = self.settings.request(query.text.clone());

        match self.model.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => Ok(ResolverResult::answered(text)),
            Ok(_) => Ok(ResolverResult::declined(MODEL_UNAVAILABLE)),
            Err(CapabilityError::Unauthorized(reason)) => {
                tracing::warn!(reason = %reason, "Language model rejected credentials");
                Ok(ResolverResult::declined(MODEL_UNAUTHORIZED))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Language model completion failed");
                Ok(ResolverResult::declined(MODEL_UNAVAILABLE))
            }
        }
    }
}

/// Build the model-augmented pipeline: contextual synthesis, then direct completion.
pub fn model_augmented(
    search: Arc<dyn WebSearch>,
    model: Arc<dyn LanguageModel>,
    settings: CompletionSettings,
) -> FallbackChain {
    let steps: Vec<Arc<dyn Resolver>> = vec![
        Arc::new(ContextualCompletionResolver::new(
            search,
            model.clone(),
            settings.clone(),
        )),
        Arc::new(DirectCompletionResolver::new(model, settings)),
    ];
    FallbackChain::new("model_augmented", steps)
}
