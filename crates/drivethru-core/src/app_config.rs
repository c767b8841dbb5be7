use std::net::SocketAddr;

use crate::types::FranchiseCandidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Tracing filter used when `DRIVETHRU_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Field used to decide that two candidates are the same real-world location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupKey {
    /// The provider's short address (`vicinity`).
    #[default]
    Address,
    /// The provider's stable place identifier.
    PlaceId,
}

impl DedupKey {
    /// Returns the identity key of `candidate` under this policy.
    #[must_use]
    pub fn key_of<'a>(&self, candidate: &'a FranchiseCandidate) -> &'a str {
        match self {
            DedupKey::Address => &candidate.address,
            DedupKey::PlaceId => &candidate.place_id,
        }
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupKey::Address => write!(f, "address"),
            DedupKey::PlaceId => write!(f, "place_id"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub maps_api_key: String,
    pub maps_publishable_key: String,
    pub maps_map_id: Option<String>,
    pub maps_base_url: String,
    pub maps_timeout_secs: u64,
    pub user_agent: String,
    pub default_franchise: String,
    pub search_radius_meters: u32,
    pub dedup_key: DedupKey,
    /// `None` leaves the result list uncapped.
    pub result_cap: Option<usize>,
    pub places_concurrency: usize,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("maps_api_key", &"[redacted]")
            .field("maps_publishable_key", &self.maps_publishable_key)
            .field("maps_map_id", &self.maps_map_id)
            .field("maps_base_url", &self.maps_base_url)
            .field("maps_timeout_secs", &self.maps_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_franchise", &self.default_franchise)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("dedup_key", &self.dedup_key)
            .field("result_cap", &self.result_cap)
            .field("places_concurrency", &self.places_concurrency)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
