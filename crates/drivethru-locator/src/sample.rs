use drivethru_core::LatLng;
use drivethru_maps::RouteStep;

/// One waypoint per route step, at the step's end location, in travel order.
///
/// No thinning is applied, so long routes produce many waypoints and as many
/// places queries.
#[must_use]
pub fn sample_waypoints(steps: &[RouteStep]) -> Vec<LatLng> {
    steps.iter().map(|step| step.end_location).collect()
}
