use chrono::{DateTime, Utc};

use crate::propagate::PropagationError;

/// Satellite state at one instant, as produced by a propagation oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatState {
    /// Inertial position, kilometers. Passed through to the ground path
    /// untouched; the sampler attaches no meaning to the frame realization.
    pub position_eci_km: [f64; 3],
    /// Earth-fixed position, kilometers.
    pub position_ecef_km: [f64; 3],
    /// Subpoint latitude, degrees, in [-90, 90].
    pub latitude_deg: f64,
    /// Subpoint longitude, degrees, normalized to [-180, 180).
    pub longitude_deg: f64,
    /// Height above the WGS-84 ellipsoid, kilometers.
    pub elevation_km: f64,
}

/// The propagation oracle: everything the sampler knows about orbital
/// mechanics. Implementations must be deterministic per timestamp.
pub trait Propagator {
    fn state_at(&self, timestamp: DateTime<Utc>) -> Result<SatState, PropagationError>;
}
