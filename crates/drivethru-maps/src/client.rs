//! HTTP client for the directions and places nearby-search APIs.
//!
//! Both endpoints report failures inside a 200 response via the `"status"`
//! field of the JSON envelope; anything other than `"OK"` (including
//! `ZERO_RESULTS`) is surfaced as [`MapsError::Status`] with the raw body.

use std::time::Duration;

use drivethru_core::LatLng;
use reqwest::{Client, Url};

use crate::error::MapsError;
use crate::types::{DirectionsResponse, NearbySearchResponse, Place, RouteStep};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_USER_AGENT: &str = "drivethru/0.1 (route-franchise-finder)";

const DIRECTIONS_PATH: &str = "directions/json";
const NEARBY_SEARCH_PATH: &str = "place/nearbysearch/json";

/// Client for the maps provider.
///
/// Use [`MapsClient::new`] for production or [`MapsClient::with_base_url`] to
/// point at a mock server in tests. The client is cheap to share behind an
/// `Arc`; it holds no per-request state.
pub struct MapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl MapsClient {
    /// Creates a client pointed at the production maps API.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, MapsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom base URL and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MapsError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative endpoint paths are appended
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| MapsError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches a driving route and returns the steps of its first leg.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Status`] if the provider status is not `"OK"`.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<RouteStep>, MapsError> {
        let url = self.build_url(
            DIRECTIONS_PATH,
            &[("origin", origin), ("destination", destination)],
        )?;
        let body = self.request_json(&url, "directions").await?;
        Self::check_status("directions", &body)?;

        let parsed: DirectionsResponse =
            serde_json::from_value(body).map_err(|e| MapsError::Deserialize {
                context: "directions".to_string(),
                source: e,
            })?;

        let steps = parsed.into_first_leg_steps();
        tracing::debug!(step_count = steps.len(), "directions fetched");
        Ok(steps)
    }

    /// Searches for places matching `keyword` within `radius_meters` of `location`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Status`] if the provider status is not `"OK"`.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        location: LatLng,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<Place>, MapsError> {
        let location = location.to_string();
        let radius = radius_meters.to_string();
        let url = self.build_url(
            NEARBY_SEARCH_PATH,
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;
        let body = self.request_json(&url, "nearbysearch").await?;
        Self::check_status("nearbysearch", &body)?;

        let parsed: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| MapsError::Deserialize {
                context: format!("nearbysearch(location={location})"),
                source: e,
            })?;

        Ok(parsed.results)
    }

    /// Builds the endpoint URL with percent-encoded query parameters, `key` last.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, MapsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| MapsError::InvalidBaseUrl(format!("{path}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    ///
    /// `context` names the endpoint in errors; the URL itself carries the API
    /// key and is never included.
    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, MapsError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| MapsError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    fn check_status(endpoint: &'static str, body: &serde_json::Value) -> Result<(), MapsError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("MISSING_STATUS");
        if status == "OK" {
            return Ok(());
        }
        Err(MapsError::Status {
            endpoint,
            status: status.to_string(),
            body: body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> MapsClient {
        MapsClient::with_base_url("test-key", 30, base_url, DEFAULT_USER_AGENT)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_and_key_last() {
        let client = test_client("https://maps.example.com/maps/api");
        let url = client
            .build_url(DIRECTIONS_PATH, &[("origin", "A"), ("destination", "B")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.example.com/maps/api/directions/json?origin=A&destination=B&key=test-key"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let client = test_client("https://maps.example.com/maps/api/");
        let url = client
            .build_url(NEARBY_SEARCH_PATH, &[("location", "1,2")])
            .unwrap();
        assert!(url
            .as_str()
            .starts_with("https://maps.example.com/maps/api/place/nearbysearch/json?"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://maps.example.com");
        let url = client
            .build_url(NEARBY_SEARCH_PATH, &[("keyword", "McDonald's & Co")])
            .unwrap();
        assert!(
            url.as_str().contains("McDonald%27s+%26+Co"),
            "keyword should be percent-encoded: {url}"
        );
    }

    #[test]
    fn check_status_rejects_zero_results() {
        let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });
        let err = MapsClient::check_status("nearbysearch", &body).unwrap_err();
        assert!(matches!(err, MapsError::Status { ref status, .. } if status == "ZERO_RESULTS"));
    }

    #[test]
    fn check_status_treats_missing_status_as_failure() {
        let body = serde_json::json!({ "routes": [] });
        assert!(MapsClient::check_status("directions", &body).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = test_client("https://maps.example.com");
        assert!(!format!("{client:?}").contains("test-key"));
    }
}
