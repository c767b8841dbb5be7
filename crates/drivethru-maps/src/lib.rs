pub mod client;
pub mod error;
pub mod types;

pub use client::MapsClient;
pub use error::MapsError;
pub use types::{DirectionsResponse, NearbySearchResponse, Place, RouteStep};
