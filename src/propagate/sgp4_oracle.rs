use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::propagate::geodesy::{ecef_to_geodetic, teme_to_ecef};
use crate::propagate::{parse_tle_lines, PropagationError, Propagator, SatState};

/// SGP4-backed propagation oracle for one satellite.
pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    pub fn from_tle(tle: &str) -> Result<Self, PropagationError> {
        let (name, line1, line2) = parse_tle_lines(tle)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        Self::from_elements(elements)
    }

    pub fn from_elements(elements: Elements) -> Result<Self, PropagationError> {
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn object_name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }
}

impl Propagator for Sgp4Propagator {
    fn state_at(&self, timestamp: DateTime<Utc>) -> Result<SatState, PropagationError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| PropagationError::AtTime {
                timestamp,
                message: e.to_string(),
            })?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagationError::AtTime {
                timestamp,
                message: e.to_string(),
            })?;

        let gmst = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
            &timestamp.naive_utc(),
        ));

        let ecef = teme_to_ecef(prediction.position, gmst);
        let (latitude_deg, longitude_deg, elevation_km) = ecef_to_geodetic(ecef);

        Ok(SatState {
            position_eci_km: prediction.position,
            position_ecef_km: ecef,
            latitude_deg,
            longitude_deg,
            elevation_km,
        })
    }
}
