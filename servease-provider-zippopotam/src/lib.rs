//! Region lookup implementation using the Zippopotam postal code API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use servease_core::ports::{PortError, RegionLookupPort};

/// Public Zippopotam endpoint.
pub const BASE_URL: &str = "https://api.zippopotam.us";

/// Response from /{country}/{postal_code}
#[derive(Debug, Deserialize)]
struct PostalCodeResponse {
    places: Vec<Place>,
    // "post code", "country" and "country abbreviation" exist but are unused
}

/// Single place inside `PostalCodeResponse.places`
#[derive(Debug, Deserialize)]
struct Place {
    #[serde(rename = "place name")]
    place_name: Option<String>,
    state: String,
}

/// Region lookup against a Zippopotam-compatible service.
pub struct ZippopotamLookupPort {
    client: Client,
    base_url: String,
}

impl ZippopotamLookupPort {
    /// Create a lookup port for the deployment at `base_url`, usually [`BASE_URL`].
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }
}

#[async_trait]
impl RegionLookupPort for ZippopotamLookupPort {
    fn name(&self) -> &str {
        "zippopotam"
    }

    async fn region_for(&self, country: &str, postal_code: &str) -> Result<String, PortError> {
        let country = country.trim();
        let postal_code = postal_code.trim();
        if country.is_empty() || postal_code.is_empty() {
            return Err(PortError::Malformed(
                "country and postal code are required".to_owned(),
            ));
        }

        let req = self
            .client
            .get(format!("{}/{country}/{postal_code}", self.base_url));

        let resp = fetch_json::<PostalCodeResponse>(req).await?;

        let place = resp
            .places
            .into_iter()
            .next()
            .ok_or_else(|| PortError::NoPlaces(postal_code.to_owned()))?;

        debug!(
            postal_code,
            place = place.place_name.as_deref().unwrap_or_default(),
            state = %place.state,
            "Zippopotam place found"
        );

        Ok(place.state)
    }
}

/// Build an HTTP client for the lookup with a request deadline.
///
/// # Errors
///
/// Returns a [`PortError`] when the TLS backend cannot be initialised.
pub fn client(timeout: Duration) -> Result<Client, PortError> {
    Client::builder()
        .user_agent("servease/0.1")
        .timeout(timeout)
        .build()
        .map_err(PortError::from)
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let body = req
        .send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .bytes()
        .await
        .map_err(PortError::from)?;

    serde_json::from_slice(&body).map_err(|err| PortError::Malformed(err.to_string()))
}
