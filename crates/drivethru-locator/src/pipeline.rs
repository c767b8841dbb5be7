use drivethru_core::{FranchiseCandidate, RouteRequest};
use drivethru_maps::{MapsClient, RouteStep};

use crate::error::PipelineError;
use crate::locate::{locate_franchises, LocatorConfig};
use crate::sample::sample_waypoints;

/// Fetches the first leg of the driving route between two addresses.
///
/// # Errors
///
/// - [`PipelineError::Directions`] if the provider status is not `"OK"`.
/// - [`PipelineError::Unexpected`] on transport failure or a malformed body.
pub async fn fetch_route(
    client: &MapsClient,
    origin: &str,
    destination: &str,
) -> Result<Vec<RouteStep>, PipelineError> {
    client
        .directions(origin, destination)
        .await
        .map_err(PipelineError::from)
}

/// Fetcher → sampler → locator, run once per request.
///
/// Holds no per-request state; share one instance across requests.
#[derive(Debug)]
pub struct RoutePipeline {
    client: MapsClient,
    config: LocatorConfig,
}

impl RoutePipeline {
    #[must_use]
    pub fn new(client: MapsClient, config: LocatorConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Finds franchise locations along the route described by `request`.
    ///
    /// The places stage is only entered once the route has been fetched.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the route cannot be fetched or a places
    /// query fails in transport or decoding. Non-OK places statuses are
    /// absorbed per waypoint.
    pub async fn run(
        &self,
        request: &RouteRequest,
    ) -> Result<Vec<FranchiseCandidate>, PipelineError> {
        let steps = fetch_route(&self.client, &request.origin, &request.destination).await?;
        let waypoints = sample_waypoints(&steps);

        tracing::debug!(
            steps = steps.len(),
            waypoints = waypoints.len(),
            keyword = %request.franchise_keyword,
            "route sampled"
        );

        locate_franchises(
            &self.client,
            &waypoints,
            &request.franchise_keyword,
            &self.config,
        )
        .await
    }
}
