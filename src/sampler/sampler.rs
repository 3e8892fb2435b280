use chrono::{DateTime, TimeDelta, Utc};

use crate::propagate::Propagator;
use crate::sampler::{time_grid, GroundPath, PositionSample, SampleError};

/// Sample a satellite's ground track over the half-open window `[from, to)`.
///
/// Invokes the propagator once per grid timestamp, plus once at `from - step`
/// to seed the previous-latitude comparison, so the first sample's `ascending`
/// flag is computed from a real prior point rather than a placeholder.
///
/// `ascending` is true when the subpoint latitude did not decrease since the
/// previous sample. `orbit` starts at 0 and increments on every descending to
/// ascending transition (the pass through the track's southernmost point).
///
/// Any propagation failure aborts the whole call; a truncated ground track is
/// never returned.
pub fn sample_ground_path(
    propagator: &dyn Propagator,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: TimeDelta,
) -> Result<GroundPath, SampleError> {
    let grid = time_grid(from, to, step)?;

    let mut prev_lat = propagator.state_at(from - step)?.latitude_deg;
    let mut prev_ascending: Option<bool> = None;
    let mut orbit: u32 = 0;
    let mut samples = Vec::with_capacity(grid.len());

    for timestamp in grid {
        let state = propagator.state_at(timestamp)?;

        let ascending = state.latitude_deg >= prev_lat;
        if prev_ascending == Some(false) && ascending {
            orbit += 1;
        }

        samples.push(PositionSample {
            datetime: timestamp,
            x_km: state.position_eci_km[0],
            y_km: state.position_eci_km[1],
            z_km: state.position_eci_km[2],
            lat_deg: state.latitude_deg,
            lon_deg: state.longitude_deg,
            elevation_km: state.elevation_km,
            ascending,
            orbit,
        });

        prev_lat = state.latitude_deg;
        prev_ascending = Some(ascending);
    }

    Ok(GroundPath { samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::{PropagationError, SatState};
    use std::f64::consts::TAU;

    /// Deterministic oracle: latitude swings sinusoidally with a 90 minute
    /// period, as a circular polar-ish orbit would.
    struct SineOrbit {
        epoch: DateTime<Utc>,
    }

    impl SineOrbit {
        fn new(epoch: DateTime<Utc>) -> Self {
            Self { epoch }
        }

        fn lat_at(&self, t: DateTime<Utc>) -> f64 {
            let minutes = (t - self.epoch).num_seconds() as f64 / 60.0;
            80.0 * (TAU * minutes / 90.0).sin()
        }
    }

    impl Propagator for SineOrbit {
        fn state_at(&self, t: DateTime<Utc>) -> Result<SatState, PropagationError> {
            let minutes = (t - self.epoch).num_seconds() as f64 / 60.0;
            Ok(SatState {
                position_eci_km: [7000.0, minutes, -minutes],
                position_ecef_km: [7000.0, 0.0, 0.0],
                latitude_deg: self.lat_at(t),
                longitude_deg: (-0.25 * minutes).rem_euclid(360.0) - 180.0,
                elevation_km: 622.0,
            })
        }
    }

    /// Oracle that fails once a configured timestamp is reached.
    struct FailingOrbit {
        fail_at: DateTime<Utc>,
    }

    impl Propagator for FailingOrbit {
        fn state_at(&self, t: DateTime<Utc>) -> Result<SatState, PropagationError> {
            if t >= self.fail_at {
                return Err(PropagationError::AtTime {
                    timestamp: t,
                    message: "decayed".into(),
                });
            }
            Ok(SatState {
                position_eci_km: [7000.0, 0.0, 0.0],
                position_ecef_km: [7000.0, 0.0, 0.0],
                latitude_deg: 0.0,
                longitude_deg: 0.0,
                elevation_km: 622.0,
            })
        }
    }

    /// Oracle that must never be reached.
    struct Unreachable;

    impl Propagator for Unreachable {
        fn state_at(&self, _t: DateTime<Utc>) -> Result<SatState, PropagationError> {
            panic!("propagator invoked despite invalid arguments");
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn produces_one_sample_per_grid_point() {
        let epoch = utc("2018-08-01T00:00:00Z");
        let orbit = SineOrbit::new(epoch);
        let path = sample_ground_path(
            &orbit,
            epoch,
            utc("2018-08-02T00:00:00Z"),
            TimeDelta::seconds(30),
        )
        .unwrap();
        assert_eq!(path.len(), 2880);

        for pair in path.samples.windows(2) {
            assert_eq!(pair[1].datetime - pair[0].datetime, TimeDelta::seconds(30));
        }
    }

    #[test]
    fn ascending_flag_matches_latitude_differences() {
        let epoch = utc("2018-08-01T00:00:00Z");
        let orbit = SineOrbit::new(epoch);
        let path = sample_ground_path(
            &orbit,
            epoch,
            epoch + TimeDelta::hours(3),
            TimeDelta::minutes(1),
        )
        .unwrap();

        for pair in path.samples.windows(2) {
            assert_eq!(pair[1].ascending, pair[1].lat_deg >= pair[0].lat_deg);
        }
        // Seeded from one step before the window: the sine is rising at t=0.
        assert!(path.samples[0].ascending);
    }

    #[test]
    fn orbit_counter_increments_only_on_descending_to_ascending() {
        let epoch = utc("2018-08-01T00:00:00Z");
        let orbit = SineOrbit::new(epoch);
        let path = sample_ground_path(
            &orbit,
            epoch,
            epoch + TimeDelta::hours(6),
            TimeDelta::minutes(1),
        )
        .unwrap();

        assert_eq!(path.samples[0].orbit, 0);
        for pair in path.samples.windows(2) {
            let expected_bump = (!pair[0].ascending && pair[1].ascending) as u32;
            assert_eq!(pair[1].orbit, pair[0].orbit + expected_bump);
        }
        // 6 hours of a 90 minute period: the track bottoms out 4 times.
        assert_eq!(path.orbit_count(), 4);
    }

    #[test]
    fn output_is_deterministic() {
        let epoch = utc("2018-08-01T00:00:00Z");
        let orbit = SineOrbit::new(epoch);
        let a = sample_ground_path(&orbit, epoch, epoch + TimeDelta::hours(2), TimeDelta::seconds(30))
            .unwrap();
        let b = sample_ground_path(&orbit, epoch, epoch + TimeDelta::hours(2), TimeDelta::seconds(30))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_window_is_rejected_before_any_propagation() {
        let from = utc("2018-08-01T00:00:00Z");
        assert!(matches!(
            sample_ground_path(&Unreachable, from, from, TimeDelta::seconds(30)),
            Err(SampleError::EmptyWindow { .. })
        ));
        assert!(matches!(
            sample_ground_path(
                &Unreachable,
                from,
                from + TimeDelta::hours(1),
                TimeDelta::zero()
            ),
            Err(SampleError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn propagation_failure_aborts_without_partial_output() {
        let from = utc("2018-08-01T00:00:00Z");
        let orbit = FailingOrbit {
            fail_at: from + TimeDelta::minutes(30),
        };
        let result = sample_ground_path(&orbit, from, from + TimeDelta::hours(1), TimeDelta::minutes(1));
        assert!(matches!(result, Err(SampleError::Propagation(_))));
    }
}
