use std::io::{Read, Write};

use thiserror::Error;

use crate::sampler::{GroundPath, PositionSample};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a ground path as CSV with the header
/// `datetime,X,Y,Z,lat,lon,elevation,ascending,orbit`. Timestamps are
/// RFC 3339 UTC.
pub fn write_csv<W: Write>(path: &GroundPath, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in &path.samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse a CSV produced by [`write_csv`] back into a ground path.
pub fn read_csv<R: Read>(reader: R) -> Result<GroundPath, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let samples = rdr
        .deserialize()
        .collect::<Result<Vec<PositionSample>, _>>()?;
    Ok(GroundPath { samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, Utc};

    fn sample_path() -> GroundPath {
        let t0: DateTime<Utc> = "2018-08-01T00:00:00Z".parse().unwrap();
        let samples = (0..4)
            .map(|i| PositionSample {
                datetime: t0 + TimeDelta::seconds(30 * i),
                x_km: 6878.0 - i as f64,
                y_km: 0.5 * i as f64,
                z_km: -12.25 * i as f64,
                lat_deg: -0.1 + 0.2 * i as f64,
                lon_deg: 139.7 - 0.07 * i as f64,
                elevation_km: 500.125,
                ascending: i != 0,
                orbit: (i >= 2) as u32,
            })
            .collect();
        GroundPath { samples }
    }

    #[test]
    fn header_matches_the_output_surface() {
        let mut buf = Vec::new();
        write_csv(&sample_path(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "datetime,X,Y,Z,lat,lon,elevation,ascending,orbit");
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().starts_with("2018-08-01T00:00:00"));
    }

    #[test]
    fn round_trips_exactly() {
        let original = sample_path();
        let mut buf = Vec::new();
        write_csv(&original, &mut buf).unwrap();
        let parsed = read_csv(buf.as_slice()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn empty_path_writes_nothing_but_parses_back() {
        let mut buf = Vec::new();
        write_csv(&GroundPath::default(), &mut buf).unwrap();
        let parsed = read_csv(buf.as_slice()).unwrap();
        assert!(parsed.is_empty());
    }
}
