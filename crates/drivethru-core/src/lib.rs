pub mod app_config;
pub mod config;
pub mod game;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, DedupKey, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use game::{GamePhase, GameSession, Voucher};
pub use types::{FranchiseCandidate, FranchiseMarker, LatLng, RouteRequest};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
