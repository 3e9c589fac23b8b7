//! Chat orchestrator: validates input, runs the configured pipeline, and
//! hands the exchange to the recorder without waiting on it.

use std::sync::Arc;

use parley_core::{
    Answer, ChatRecord, ChatRecorder, EncyclopediaLookup, Evaluator, Intent, PipelineMode, Query,
    WeatherLookup, WebSearch,
};

use crate::chain::{FallbackChain, NO_ANSWER};
use crate::classifier::Classifier;
use crate::error::ChatError;
use crate::resolver::{
    AcknowledgmentResolver, KnowledgeResolver, MathResolver, Resolver, SearchResolver,
    TimeResolver, WeatherResolver,
};

// =============================================================================
// Rule-routed dispatch
// =============================================================================

/// One resolver per intent.
pub struct Routes {
    pub weather: Arc<dyn Resolver>,
    pub time: Arc<dyn Resolver>,
    pub math: Arc<dyn Resolver>,
    pub knowledge: Arc<dyn Resolver>,
    pub general: Arc<dyn Resolver>,
}

impl Routes {
    /// Standard routing table over the given capabilities. The general route
    /// tries search first and falls back to an acknowledgment.
    pub fn standard(
        weather: Arc<dyn WeatherLookup>,
        encyclopedia: Arc<dyn EncyclopediaLookup>,
        search: Arc<dyn WebSearch>,
        evaluator: Arc<dyn Evaluator>,
        default_location: &str,
    ) -> Self {
        let general: Vec<Arc<dyn Resolver>> = vec![
            Arc::new(SearchResolver::new(search)),
            Arc::new(AcknowledgmentResolver::new()),
        ];

        Self {
            weather: Arc::new(WeatherResolver::new(weather, default_location)),
            time: Arc::new(TimeResolver::new()),
            math: Arc::new(MathResolver::new(evaluator)),
            knowledge: Arc::new(KnowledgeResolver::new(encyclopedia)),
            general: Arc::new(FallbackChain::new("general", general)),
        }
    }
}

/// Classifier plus routing table.
pub struct Dispatcher {
    classifier: Classifier,
    routes: Routes,
}

impl Dispatcher {
    pub fn new(routes: Routes) -> Self {
        Self {
            classifier: Classifier::new(),
            routes,
        }
    }

    pub fn route(&self, intent: Intent) -> &Arc<dyn Resolver> {
        match intent {
            Intent::Weather => &self.routes.weather,
            Intent::Time => &self.routes.time,
            Intent::Math => &self.routes.math,
            Intent::Knowledge => &self.routes.knowledge,
            Intent::General => &self.routes.general,
        }
    }
}

pub enum Pipeline {
    RuleRouted(Dispatcher),
    ModelAugmented(Arc<dyn Resolver>),
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Central coordinator for answering a single message.
pub struct ChatOrchestrator {
    pipeline: Pipeline,
    recorder: Option<Arc<dyn ChatRecorder>>,
}

impl ChatOrchestrator {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            recorder: None,
        }
    }

    pub fn rule_routed(routes: Routes) -> Self {
        Self::new(Pipeline::RuleRouted(Dispatcher::new(routes)))
    }

    pub fn model_augmented(resolver: Arc<dyn Resolver>) -> Self {
        Self::new(Pipeline::ModelAugmented(resolver))
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn ChatRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn mode(&self) -> PipelineMode {
        match self.pipeline {
            Pipeline::RuleRouted(_) => PipelineMode::RuleRouted,
            Pipeline::ModelAugmented(_) => PipelineMode::ModelAugmented,
        }
    }

    /// Whether a recorder is attached and ready to accept records.
    pub fn recorder_ready(&self) -> bool {
        self.recorder.as_ref().is_some_and(|r| r.is_ready())
    }

    /// Validate, answer, and record one message.
    ///
    /// Only an absent or empty message is rejected. Every other outcome,
    /// including capability failures, is an answer.
    pub async fn produce_answer(
        &self,
        message: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Answer, ChatError> {
        let text = match message {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ChatError::MissingMessage),
        };

        let query = Query::new(text, user_id);
        let answer = self.answer(&query).await;
        self.record(&query, &answer);
        Ok(answer)
    }

    /// Run the configured pipeline. Never fails.
    pub async fn answer(&self, query: &Query) -> Answer {
        let (resolver, intent) = match &self.pipeline {
            Pipeline::RuleRouted(dispatcher) => {
                let intent = dispatcher.classifier.classify(&query.text);
                tracing::debug!(intent = %intent, user_id = %query.user_id, "Classified message");
                (dispatcher.route(intent), Some(intent))
            }
            Pipeline::ModelAugmented(resolver) => (resolver, None),
        };

        let text = match resolver.resolve(query).await {
            Ok(result) => {
                tracing::debug!(
                    resolver = resolver.name(),
                    succeeded = result.succeeded,
                    "Resolver finished"
                );
                result.text
            }
            Err(e) => {
                tracing::warn!(resolver = resolver.name(), error = %e, "Resolver failed");
                NO_ANSWER.to_string()
            }
        };

        Answer { text, intent }
    }

    fn record(&self, query: &Query, answer: &Answer) {
        let Some(recorder) = self.recorder.as_ref() else {
            return;
        };
        if !recorder.is_ready() {
            tracing::debug!("Recorder not ready, skipping persistence");
            return;
        }

        let recorder = Arc::clone(recorder);
        let record = ChatRecord::new(query, answer);
        tokio::spawn(async move {
            if let Err(e) = recorder.record_chat(record).await {
                tracing::warn!(error = %e, "Failed to record chat exchange");
            }
        });
    }
}
