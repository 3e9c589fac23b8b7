//! Shared HTTP client construction and error mapping.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use parley_core::{CapabilityError, ParleyError, ProvidersConfig};

/// Build the client shared by every adapter.
pub fn build_client(config: &ProvidersConfig) -> Result<Client, ParleyError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ParleyError::Provider(format!("Failed to build HTTP client: {}", e)))
}

/// Map a transport or decode failure onto the capability vocabulary.
pub(crate) fn transport_error(service: &str, err: reqwest::Error) -> CapabilityError {
    if err.is_decode() {
        CapabilityError::InvalidResponse(format!("{}: {}", service, err))
    } else {
        CapabilityError::Unavailable(format!("{}: {}", service, err))
    }
}

/// Map a non-success status. 404 is `NotFound`, 401/403 `Unauthorized`.
pub(crate) fn status_error(service: &str, status: StatusCode) -> CapabilityError {
    match status {
        StatusCode::NOT_FOUND => CapabilityError::NotFound(format!("{} returned {}", service, status)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CapabilityError::Unauthorized(format!("{} returned {}", service, status))
        }
        _ => CapabilityError::Unavailable(format!("{} returned {}", service, status)),
    }
}
