use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use parley_core::{CapabilityError, Query, ResolverResult, WeatherLookup, WeatherReport};

use super::Resolver;
use crate::error::ResolveError;

pub const WEATHER_UNAVAILABLE: &str =
    "Sorry, I couldn't fetch the weather right now. Please try again later.";

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin ([a-zA-Z\s]+)").expect("Invalid location regex"));

/// Pull the location out of "... in <place>". Returns `None` when absent or blank.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|loc| !loc.is_empty())
}

/// Current conditions for the location named in the message.
pub struct WeatherResolver {
    lookup: Arc<dyn WeatherLookup>,
    default_location: String,
}

impl WeatherResolver {
    pub fn new(lookup: Arc<dyn WeatherLookup>, default_location: impl Into<String>) -> Self {
        Self {
            lookup,
            default_location: default_location.into(),
        }
    }

    async fn lookup_with_default(&self, location: &str) -> Result<WeatherReport, CapabilityError> {
        match self.lookup.geocode_and_forecast(location).await {
            Err(CapabilityError::NotFound(_)) if location != self.default_location => {
                tracing::debug!(
                    location = %location,
                    fallback = %self.default_location,
                    "Location not found, retrying with default"
                );
                self.lookup
                    .geocode_and_forecast(&self.default_location)
                    .await
            }
            other => other,
        }
    }
}

#[async_trait]
impl Resolver for WeatherResolver {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let location =
            extract_location(&query.text).unwrap_or_else(|| self.default_location.clone());

        match self.lookup_with_default(&location).await {
            Ok(report) => Ok(ResolverResult::answered(format!(
                "The current weather in {} is {}°C with wind speeds of {} km/h.",
                report.resolved_name, report.temperature_celsius, report.wind_speed_kph
            ))),
            Err(e) => {
                tracing::warn!(location = %location, error = %e, "Weather lookup failed");
                Ok(ResolverResult::declined(WEATHER_UNAVAILABLE))
            }
        }
    }
}
