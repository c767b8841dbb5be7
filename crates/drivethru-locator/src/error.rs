use drivethru_maps::MapsError;
use thiserror::Error;

/// Failures that abort a whole pipeline run.
///
/// A non-OK places status never appears here; that waypoint is skipped inside
/// [`crate::locate_franchises`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The directions provider answered with a non-OK status.
    #[error("directions provider returned status {status}")]
    Directions {
        status: String,
        /// Raw provider body, surfaced to the caller for diagnostics.
        details: serde_json::Value,
    },

    /// Transport failure, malformed provider JSON, or any other fault.
    #[error("unexpected pipeline failure: {0}")]
    Unexpected(#[source] MapsError),
}

impl From<MapsError> for PipelineError {
    fn from(err: MapsError) -> Self {
        match err {
            MapsError::Status { status, body, .. } => PipelineError::Directions {
                status,
                details: body,
            },
            other => PipelineError::Unexpected(other),
        }
    }
}
