use chrono::{DateTime, TimeDelta, Utc};

use crate::plan::geometry::{off_nadir_angle, target_elevation_angle};
use crate::plan::{local_solar_time, LocalTimeWindow, TargetSite};
use crate::propagate::Propagator;
use crate::sampler::{time_grid, SampleError};

/// Acceptance ranges for a capture opportunity. Angles in degrees; an empty
/// `local_time_windows` means any time of day is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConstraints {
    pub min_off_nadir_deg: f64,
    pub max_off_nadir_deg: f64,
    pub min_elevation_deg: f64,
    pub max_elevation_deg: f64,
    pub local_time_windows: Vec<LocalTimeWindow>,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            min_off_nadir_deg: 0.0,
            max_off_nadir_deg: 20.0,
            min_elevation_deg: 0.0,
            max_elevation_deg: 90.0,
            local_time_windows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOpportunity {
    pub datetime: DateTime<Utc>,
    pub off_nadir_deg: f64,
    pub elevation_deg: f64,
    pub local_time: TimeDelta,
}

/// Scan the half-open window `[from, to)` for timestamps at which the
/// satellite can image the target within the given constraints.
///
/// Timestamps where the target sits over the horizon (no near-side line of
/// sight) are skipped silently; propagation failures abort the whole scan,
/// same as ground-path sampling.
pub fn capture_plan(
    propagator: &dyn Propagator,
    site: &TargetSite,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: TimeDelta,
    constraints: &CaptureConstraints,
) -> Result<Vec<CaptureOpportunity>, SampleError> {
    let grid = time_grid(from, to, step)?;
    let target = site.position_ecef_km();
    let mut opportunities = Vec::new();

    for timestamp in grid {
        let state = propagator.state_at(timestamp)?;
        let sat = state.position_ecef_km;

        let Some(off_nadir) = off_nadir_angle(sat, target) else {
            continue;
        };
        let elevation = target_elevation_angle(sat, target);

        if off_nadir < constraints.min_off_nadir_deg
            || off_nadir > constraints.max_off_nadir_deg
            || elevation < constraints.min_elevation_deg
            || elevation > constraints.max_elevation_deg
        {
            continue;
        }

        let local_time = local_solar_time(timestamp, site.longitude_deg);
        let in_window = constraints.local_time_windows.is_empty()
            || constraints
                .local_time_windows
                .iter()
                .any(|w| w.contains(local_time));
        if !in_window {
            continue;
        }

        opportunities.push(CaptureOpportunity {
            datetime: timestamp,
            off_nadir_deg: off_nadir,
            elevation_deg: elevation,
            local_time,
        });
    }

    Ok(opportunities)
}
