//! Wire types for the directions and places nearby-search endpoints.
//!
//! Both endpoints wrap their payload in a `{"status": "OK", ...}` envelope;
//! the status is checked by the client before these types are decoded.

use drivethru_core::{FranchiseCandidate, LatLng};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// directions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    /// Steps of the first leg of the first route; alternatives are ignored.
    #[must_use]
    pub fn into_first_leg_steps(self) -> Vec<RouteStep> {
        self.routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .map(|leg| leg.steps)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RouteStep {
    pub end_location: LatLng,
}

// ---------------------------------------------------------------------------
// place/nearbysearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    /// Short address relative to the search area.
    #[serde(default)]
    pub vicinity: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

impl From<Place> for FranchiseCandidate {
    fn from(place: Place) -> Self {
        Self {
            name: place.name,
            address: place.vicinity,
            place_id: place.place_id,
            location: place.geometry.location,
        }
    }
}
