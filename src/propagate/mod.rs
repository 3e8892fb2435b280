mod error;
mod geodesy;
mod oracle;
mod sgp4_oracle;
mod tle;

pub use error::PropagationError;
pub use geodesy::{
    ecef_to_geodetic, normalize_longitude, teme_to_ecef, WGS84_E2, WGS84_EQUATORIAL_RADIUS_KM,
    WGS84_POLAR_RADIUS_KM,
};
pub use oracle::{Propagator, SatState};
pub use sgp4_oracle::Sgp4Propagator;
pub use tle::{parse_tle_lines, TleEntry, TleStore};
