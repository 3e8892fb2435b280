use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a ground path. Serializes to the CSV column layout
/// `datetime,X,Y,Z,lat,lon,elevation,ascending,orbit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub datetime: DateTime<Utc>,
    #[serde(rename = "X")]
    pub x_km: f64,
    #[serde(rename = "Y")]
    pub y_km: f64,
    #[serde(rename = "Z")]
    pub z_km: f64,
    #[serde(rename = "lat")]
    pub lat_deg: f64,
    #[serde(rename = "lon")]
    pub lon_deg: f64,
    #[serde(rename = "elevation")]
    pub elevation_km: f64,
    pub ascending: bool,
    pub orbit: u32,
}

/// An ordered ground track for one satellite over one sampling window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroundPath {
    pub samples: Vec<PositionSample>,
}

impl GroundPath {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PositionSample> {
        self.samples.iter()
    }

    /// Number of complete revolutions observed in the window.
    pub fn orbit_count(&self) -> u32 {
        self.samples.last().map(|s| s.orbit).unwrap_or(0)
    }
}

impl IntoIterator for GroundPath {
    type Item = PositionSample;
    type IntoIter = std::vec::IntoIter<PositionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}
