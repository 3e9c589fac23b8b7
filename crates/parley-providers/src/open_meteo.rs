//! Open-Meteo geocoding and current-weather adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use parley_core::{CapabilityError, WeatherLookup, WeatherProviderConfig, WeatherReport};

use crate::http::{status_error, transport_error};

const SERVICE: &str = "open-meteo";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
struct Place {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    /// km/h unless a different unit is requested.
    windspeed: f64,
}

fn first_place(response: GeocodingResponse, location: &str) -> Result<Place, CapabilityError> {
    response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| CapabilityError::NotFound(format!("no location named '{}'", location)))
}

fn into_report(place: Place, forecast: ForecastResponse) -> Result<WeatherReport, CapabilityError> {
    let current = forecast.current_weather.ok_or_else(|| {
        CapabilityError::InvalidResponse("forecast without current_weather".into())
    })?;
    Ok(WeatherReport {
        resolved_name: place.name,
        temperature_celsius: current.temperature,
        wind_speed_kph: current.windspeed,
    })
}

/// [`WeatherLookup`] backed by the Open-Meteo public API.
pub struct OpenMeteoWeather {
    client: Client,
    config: WeatherProviderConfig,
}

impl OpenMeteoWeather {
    pub fn new(client: Client, config: WeatherProviderConfig) -> Self {
        Self { client, config }
    }

    async fn geocode(&self, location: &str) -> Result<Place, CapabilityError> {
        let response = self
            .client
            .get(&self.config.geocoding_url)
            .query(&[
                ("name", location),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response.status()));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        first_place(body, location)
    }

    async fn forecast(&self, place: &Place) -> Result<ForecastResponse, CapabilityError> {
        let response = self
            .client
            .get(&self.config.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoWeather {
    async fn geocode_and_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherReport, CapabilityError> {
        let place = self.geocode(location).await?;
        tracing::debug!(
            location = %location,
            resolved = %place.name,
            lat = place.latitude,
            lon = place.longitude,
            "Geocoded location"
        );
        let forecast = self.forecast(&place).await?;
        into_report(place, forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_place() {
        let body: GeocodingResponse = serde_json::from_value(json!({
            "results": [
                {"name": "Paris", "latitude": 48.85, "longitude": 2.35, "country": "France"},
                {"name": "Paris", "latitude": 33.66, "longitude": -95.55, "country": "United States"}
            ],
            "generationtime_ms": 0.5
        }))
        .unwrap();

        let place = first_place(body, "Paris").unwrap();
        assert_eq!(place.name, "Paris");
        assert_eq!(place.latitude, 48.85);
    }

    #[test]
    fn test_missing_results_is_not_found() {
        let body: GeocodingResponse =
            serde_json::from_value(json!({"generationtime_ms": 0.3})).unwrap();
        let err = first_place(body, "Atlantis").unwrap_err();
        assert!(matches!(err, CapabilityError::NotFound(_)));
    }

    #[test]
    fn test_into_report() {
        let place = Place {
            name: "Oslo".into(),
            latitude: 59.9,
            longitude: 10.7,
        };
        let forecast: ForecastResponse = serde_json::from_value(json!({
            "latitude": 59.9,
            "longitude": 10.75,
            "current_weather": {
                "temperature": -3.2,
                "windspeed": 14.8,
                "winddirection": 250,
                "weathercode": 3,
                "time": "2026-01-10T12:00"
            }
        }))
        .unwrap();

        let report = into_report(place, forecast).unwrap();
        assert_eq!(report.resolved_name, "Oslo");
        assert_eq!(report.temperature_celsius, -3.2);
        assert_eq!(report.wind_speed_kph, 14.8);
    }

    #[test]
    fn test_forecast_without_current_weather() {
        let place = Place {
            name: "Nowhere".into(),
            latitude: 0.0,
            longitude: 0.0,
        };
        let forecast: ForecastResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            into_report(place, forecast),
            Err(CapabilityError::InvalidResponse(_))
        ));
    }
}
