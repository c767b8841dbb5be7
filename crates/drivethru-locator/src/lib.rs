//! Route-sampling and franchise-deduplication pipeline.
//!
//! Fetches a route, samples one waypoint per route step, searches for the
//! franchise around each waypoint and merges the results with last-write-wins
//! deduplication.

pub mod dedup;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod sample;

pub use dedup::{apply_cap, dedup_last_write_wins};
pub use error::PipelineError;
pub use locate::{locate_franchises, LocatorConfig};
pub use pipeline::{fetch_route, RoutePipeline};
pub use sample::sample_waypoints;
