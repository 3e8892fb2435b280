mod capture;
mod geometry;
mod local_time;
mod target;

pub use capture::{capture_plan, CaptureConstraints, CaptureOpportunity};
pub use geometry::{angle_between, los_to_earth, off_nadir_angle, target_elevation_angle};
pub use local_time::{local_solar_time, LocalTimeWindow};
pub use target::TargetSite;
