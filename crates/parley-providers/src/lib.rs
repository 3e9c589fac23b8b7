//! HTTP-backed capability adapters for Parley.
//!
//! Each adapter implements one capability trait from `parley-core` and maps
//! transport failures onto [`parley_core::CapabilityError`].

pub mod duckduckgo;
pub mod http;
pub mod open_meteo;
pub mod openai;
pub mod wikipedia;

use std::sync::Arc;

use parley_core::{
    EncyclopediaLookup, LanguageModel, ParleyError, ProvidersConfig, WeatherLookup, WebSearch,
};

pub use duckduckgo::DuckDuckGoSearch;
pub use http::build_client;
pub use open_meteo::OpenMeteoWeather;
pub use openai::OpenAiChat;
pub use wikipedia::WikipediaSummaries;

/// One instance of every capability, sharing a single HTTP client.
#[derive(Clone)]
pub struct Providers {
    pub weather: Arc<dyn WeatherLookup>,
    pub encyclopedia: Arc<dyn EncyclopediaLookup>,
    pub search: Arc<dyn WebSearch>,
    pub llm: Arc<dyn LanguageModel>,
}

impl Providers {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ParleyError> {
        let client = build_client(config)?;

        Ok(Self {
            weather: Arc::new(OpenMeteoWeather::new(client.clone(), config.weather.clone())),
            encyclopedia: Arc::new(WikipediaSummaries::new(
                client.clone(),
                config.encyclopedia.clone(),
            )),
            search: Arc::new(DuckDuckGoSearch::new(client.clone(), config.search.clone())),
            llm: Arc::new(OpenAiChat::new(client, config.llm.clone())),
        })
    }
}
