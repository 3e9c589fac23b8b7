pub mod capability;
pub mod config;
pub mod error;
pub mod types;

pub use capability::{
    CapabilityError, ChatRecorder, EncyclopediaLookup, EvalError, Evaluator, LanguageModel,
    WeatherLookup, WebSearch,
};
pub use config::{
    EncyclopediaProviderConfig, GeneralConfig, LlmProviderConfig, ParleyConfig, PipelineConfig,
    PipelineMode, ProvidersConfig, SearchProviderConfig, StorageConfig, WeatherProviderConfig,
};
pub use error::{ParleyError, Result};
pub use types::*;
