//! Domain types shared by the maps client, the locator pipeline and the server.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    /// Renders as `lat,lng`, the form the places provider expects.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A validated request to search for a franchise along a driving route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub franchise_keyword: String,
}

impl RouteRequest {
    /// Builds a request from optional, untrusted inputs.
    ///
    /// A missing or blank `franchise` falls back to `default_franchise`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `origin` or `destination` is
    /// missing or blank.
    pub fn new(
        origin: Option<&str>,
        destination: Option<&str>,
        franchise: Option<&str>,
        default_franchise: &str,
    ) -> Result<Self, CoreError> {
        fn non_blank(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        let (Some(origin), Some(destination)) = (non_blank(origin), non_blank(destination)) else {
            return Err(CoreError::Validation(
                "origin and destination are required".to_string(),
            ));
        };

        let franchise_keyword = non_blank(franchise)
            .unwrap_or(default_franchise)
            .to_string();

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            franchise_keyword,
        })
    }
}

/// One franchise location found near a waypoint.
///
/// Candidates from neighbouring waypoints frequently describe the same place;
/// see [`crate::DedupKey`] for how identity is decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseCandidate {
    pub name: String,
    /// The provider's short address (`vicinity`).
    pub address: String,
    pub place_id: String,
    pub location: LatLng,
}

/// A clickable map marker as consumed by the game client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseMarker {
    pub id: String,
    pub position: LatLng,
    pub name: String,
    pub clicked: bool,
}

impl From<&FranchiseCandidate> for FranchiseMarker {
    fn from(candidate: &FranchiseCandidate) -> Self {
        Self {
            id: candidate.place_id.clone(),
            position: candidate.location,
            name: candidate.name.clone(),
            clicked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_request_trims_and_defaults_franchise() {
        let req = RouteRequest::new(Some(" Austin, TX "), Some("Dallas, TX"), None, "McDonald's")
            .expect("valid request");
        assert_eq!(req.origin, "Austin, TX");
        assert_eq!(req.destination, "Dallas, TX");
        assert_eq!(req.franchise_keyword, "McDonald's");
    }

    #[test]
    fn route_request_blank_franchise_uses_default() {
        let req = RouteRequest::new(Some("A"), Some("B"), Some("  "), "Wendy's").unwrap();
        assert_eq!(req.franchise_keyword, "Wendy's");
    }

    #[test]
    fn route_request_keeps_explicit_franchise() {
        let req = RouteRequest::new(Some("A"), Some("B"), Some("Taco Bell"), "McDonald's").unwrap();
        assert_eq!(req.franchise_keyword, "Taco Bell");
    }

    #[test]
    fn route_request_rejects_missing_origin() {
        let err = RouteRequest::new(None, Some("B"), None, "McDonald's").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn route_request_rejects_blank_destination() {
        let err = RouteRequest::new(Some("A"), Some(""), None, "McDonald's").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn route_request_rejects_whitespace_only_origin() {
        let err = RouteRequest::new(Some(" \t "), Some("B"), Some("Taco Bell"), "McDonald's")
            .unwrap_err();
        assert_eq!(err.to_string(), "origin and destination are required");
    }

    #[test]
    fn latlng_display_is_comma_separated() {
        assert_eq!(LatLng::new(40.7128, -74.006).to_string(), "40.7128,-74.006");
    }

    #[test]
    fn marker_uses_place_id_and_starts_unclicked() {
        let candidate = FranchiseCandidate {
            name: "McDonald's".to_string(),
            address: "1 Main St".to_string(),
            place_id: "abc".to_string(),
            location: LatLng::new(1.0, 2.0),
        };
        let marker = FranchiseMarker::from(&candidate);
        assert_eq!(marker.id, "abc");
        assert_eq!(marker.position, LatLng::new(1.0, 2.0));
        assert!(!marker.clicked);

        let json = serde_json::to_value(&marker).expect("serialize marker");
        assert_eq!(json["position"]["lat"], 1.0);
        assert_eq!(json["clicked"], false);
    }
}
