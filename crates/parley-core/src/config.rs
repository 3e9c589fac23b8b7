use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParleyError, Result};

/// Top-level configuration for the Parley service.
///
/// Loaded from `~/.parley/config.toml` by default. Every section and field
/// has a default, so a partial file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ParleyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// API server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.parley/data".to_string(),
            log_level: "info".to_string(),
            port: 3030,
        }
    }
}

/// Which pipeline variant answers messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Classify, then dispatch to one dedicated resolver per intent.
    #[default]
    RuleRouted,
    /// Search for context, then synthesize with the language model.
    ModelAugmented,
}

impl PipelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineMode::RuleRouted => "rule_routed",
            PipelineMode::ModelAugmented => "model_augmented",
        }
    }
}

/// Answer pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    /// Location used when a weather question names none, or names one that
    /// does not geocode.
    pub default_location: String,
    /// System prompt for language-model completions.
    pub system_prompt: String,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Completion sampling temperature.
    pub temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::RuleRouted,
            default_location: "London".to_string(),
            system_prompt: "You are a helpful assistant. Answer concisely and accurately."
                .to_string(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// External data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent to every provider.
    pub user_agent: String,
    #[serde(default)]
    pub weather: WeatherProviderConfig,
    #[serde(default)]
    pub encyclopedia: EncyclopediaProviderConfig,
    #[serde(default)]
    pub search: SearchProviderConfig,
    #[serde(default)]
    pub llm: LlmProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Parley/0.1 (query assistant)".to_string(),
            weather: WeatherProviderConfig::default(),
            encyclopedia: EncyclopediaProviderConfig::default(),
            search: SearchProviderConfig::default(),
            llm: LlmProviderConfig::default(),
        }
    }
}

/// Geocoding + forecast endpoints (Open-Meteo compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherProviderConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for WeatherProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

/// Encyclopedia summary endpoint (Wikipedia REST compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncyclopediaProviderConfig {
    pub base_url: String,
}

impl Default for EncyclopediaProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
        }
    }
}

/// Web search endpoint (DuckDuckGo Instant Answer compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProviderConfig {
    pub base_url: String,
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.duckduckgo.com/".to_string(),
        }
    }
}

/// Chat-completions endpoint (OpenAI compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is never stored in the config file.
    pub api_key_env: String,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Chat history persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Whether exchanges are recorded at all.
    pub enabled: bool,
    /// Database file name inside `general.data_dir`.
    pub db_file: String,
    /// Default number of records returned by a history query.
    pub history_limit: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            db_file: "parley.db".to_string(),
            history_limit: 20,
        }
    }
}
