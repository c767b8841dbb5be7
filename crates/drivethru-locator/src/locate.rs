use drivethru_core::{AppConfig, DedupKey, FranchiseCandidate, LatLng};
use drivethru_maps::{MapsClient, MapsError};
use futures::stream::{self, StreamExt};

use crate::dedup::{apply_cap, dedup_last_write_wins};
use crate::error::PipelineError;

pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Tunables for the locate stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    pub radius_meters: u32,
    pub dedup_key: DedupKey,
    pub result_cap: Option<usize>,
    /// Places queries in flight at once. `1` issues them strictly one after another.
    pub concurrency: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            dedup_key: DedupKey::Address,
            result_cap: None,
            concurrency: 1,
        }
    }
}

impl LocatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            radius_meters: config.search_radius_meters,
            dedup_key: config.dedup_key,
            result_cap: config.result_cap,
            concurrency: config.places_concurrency.max(1),
        }
    }
}

/// Searches around every waypoint and returns the deduplicated franchises.
///
/// A waypoint whose query comes back with a non-OK provider status is skipped
/// with a warning. Responses are merged in waypoint order regardless of
/// `concurrency`, so the result is the same as a sequential run.
///
/// # Errors
///
/// Returns [`PipelineError::Unexpected`] if any places query fails in
/// transport or returns a body that cannot be decoded.
pub async fn locate_franchises(
    client: &MapsClient,
    waypoints: &[LatLng],
    keyword: &str,
    config: &LocatorConfig,
) -> Result<Vec<FranchiseCandidate>, PipelineError> {
    let responses: Vec<(usize, Result<_, MapsError>)> =
        stream::iter(waypoints.iter().copied().enumerate())
            .map(|(index, waypoint)| async move {
                let result = client
                    .nearby_search(waypoint, config.radius_meters, keyword)
                    .await;
                (index, result)
            })
            .buffered(config.concurrency.max(1))
            .collect()
            .await;

    let mut candidates = Vec::new();
    let mut skipped = 0usize;
    for (index, result) in responses {
        match result {
            Ok(places) => candidates.extend(places.into_iter().map(FranchiseCandidate::from)),
            Err(MapsError::Status { status, .. }) => {
                skipped += 1;
                tracing::warn!(
                    waypoint = index,
                    status = %status,
                    "places query returned non-OK status; skipping waypoint"
                );
            }
            Err(err) => {
                tracing::error!(waypoint = index, error = %err, "places query failed");
                return Err(PipelineError::Unexpected(err));
            }
        }
    }

    let raw_count = candidates.len();
    let unique = apply_cap(
        dedup_last_write_wins(candidates, config.dedup_key),
        config.result_cap,
    );

    tracing::info!(
        waypoints = waypoints.len(),
        skipped,
        raw_count,
        unique_count = unique.len(),
        dedup_key = %config.dedup_key,
        "franchise search complete"
    );

    Ok(unique)
}
