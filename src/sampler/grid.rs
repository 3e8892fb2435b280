use chrono::{DateTime, TimeDelta, Utc};

use crate::sampler::SampleError;

/// Build the sampling grid for a half-open window `[from, to)`.
///
/// The first timestamp is `from`; every following timestamp is `step` later;
/// the last one strictly precedes `to`. A window of 24 hours sampled every
/// 30 seconds therefore yields exactly 2880 timestamps.
pub fn time_grid(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: TimeDelta,
) -> Result<Vec<DateTime<Utc>>, SampleError> {
    if step <= TimeDelta::zero() {
        return Err(SampleError::NonPositiveStep(step));
    }
    if to <= from {
        return Err(SampleError::EmptyWindow { from, to });
    }

    let mut points = Vec::new();
    let mut cursor = from;
    while cursor < to {
        points.push(cursor);
        cursor += step;
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn one_day_at_thirty_seconds_gives_2880_points() {
        let grid = time_grid(
            utc("2018-08-01T00:00:00Z"),
            utc("2018-08-02T00:00:00Z"),
            TimeDelta::seconds(30),
        )
        .unwrap();
        assert_eq!(grid.len(), 2880);
    }

    #[test]
    fn window_end_is_exclusive() {
        let from = utc("2018-08-01T00:00:00Z");
        let to = utc("2018-08-01T00:01:00Z");
        let grid = time_grid(from, to, TimeDelta::seconds(20)).unwrap();
        assert_eq!(grid, vec![
            from,
            from + TimeDelta::seconds(20),
            from + TimeDelta::seconds(40),
        ]);
        assert!(grid.iter().all(|t| *t < to));
    }

    #[test]
    fn spacing_is_constant_and_increasing() {
        let grid = time_grid(
            utc("2020-01-01T00:00:00Z"),
            utc("2020-01-01T01:00:00Z"),
            TimeDelta::seconds(45),
        )
        .unwrap();
        for pair in grid.windows(2) {
            assert_eq!(pair[1] - pair[0], TimeDelta::seconds(45));
        }
    }

    #[test]
    fn partial_trailing_step_is_kept() {
        // 100 s window at 30 s step: 0, 30, 60, 90
        let from = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let grid = time_grid(from, from + TimeDelta::seconds(100), TimeDelta::seconds(30)).unwrap();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn rejects_non_positive_step() {
        let from = utc("2020-01-01T00:00:00Z");
        let to = utc("2020-01-02T00:00:00Z");
        assert!(matches!(
            time_grid(from, to, TimeDelta::zero()),
            Err(SampleError::NonPositiveStep(_))
        ));
        assert!(matches!(
            time_grid(from, to, TimeDelta::seconds(-1)),
            Err(SampleError::NonPositiveStep(_))
        ));
    }

    #[test]
    fn rejects_empty_or_inverted_window() {
        let from = utc("2020-01-01T00:00:00Z");
        assert!(matches!(
            time_grid(from, from, TimeDelta::seconds(1)),
            Err(SampleError::EmptyWindow { .. })
        ));
        assert!(matches!(
            time_grid(from, from - TimeDelta::seconds(60), TimeDelta::seconds(1)),
            Err(SampleError::EmptyWindow { .. })
        ));
    }
}
