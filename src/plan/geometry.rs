//! Line-of-sight geometry between a satellite and a ground target, in the
//! Earth-fixed frame. All positions are kilometers.

use crate::propagate::{WGS84_EQUATORIAL_RADIUS_KM, WGS84_POLAR_RADIUS_KM};

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn neg(v: [f64; 3]) -> [f64; 3] {
    [-v[0], -v[1], -v[2]]
}

fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

fn unit(v: [f64; 3]) -> [f64; 3] {
    scale(v, 1.0 / norm(v))
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Angle between two vectors in degrees. The dot product is clamped so
/// antiparallel vectors don't fall out of `acos`'s domain.
pub fn angle_between(v1: [f64; 3], v2: [f64; 3]) -> f64 {
    let cos = dot(unit(v1), unit(v2)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Intersect a line of sight with the WGS-84 ellipsoid.
///
/// `los_unit` must be a unit vector pointing away from `sat_pos_km`. Returns
/// the near-side and far-side intersection points, or `None` when the ray
/// misses the Earth or points away from it.
pub fn los_to_earth(sat_pos_km: [f64; 3], los_unit: [f64; 3]) -> Option<([f64; 3], [f64; 3])> {
    let a = WGS84_EQUATORIAL_RADIUS_KM;
    let b = WGS84_EQUATORIAL_RADIUS_KM;
    let c = WGS84_POLAR_RADIUS_KM;
    let [x, y, z] = sat_pos_km;
    let [u, v, w] = los_unit;

    let value = -a * a * b * b * w * z - a * a * c * c * v * y - b * b * c * c * u * x;
    let radical = a * a * b * b * w * w + a * a * c * c * v * v - a * a * v * v * z * z
        + 2.0 * a * a * v * w * y * z
        - a * a * w * w * y * y
        + b * b * c * c * u * u
        - b * b * u * u * z * z
        + 2.0 * b * b * u * w * x * z
        - b * b * w * w * x * x
        - c * c * u * u * y * y
        + 2.0 * c * c * u * v * x * y
        - c * c * v * v * x * x;
    let magnitude = a * a * b * b * w * w + a * a * c * c * v * v + b * b * c * c * u * u;

    if radical < 0.0 {
        return None;
    }

    let d1 = (value - a * b * c * radical.sqrt()) / magnitude;
    let d2 = (value + a * b * c * radical.sqrt()) / magnitude;

    if d1 < 0.0 {
        // Both hits behind the satellite: the ray points away from the Earth.
        return None;
    }

    Some((
        add(sat_pos_km, scale(los_unit, d1)),
        add(sat_pos_km, scale(los_unit, d2)),
    ))
}

/// Off-nadir angle in degrees for pointing the satellite at `target_pos_km`.
///
/// `None` when the line of sight misses the Earth entirely or first passes
/// through it (the target is over the horizon, on the far side).
pub fn off_nadir_angle(sat_pos_km: [f64; 3], target_pos_km: [f64; 3]) -> Option<f64> {
    let los = sub(target_pos_km, sat_pos_km);
    let (near, far) = los_to_earth(sat_pos_km, unit(los))?;

    let near_side = norm(sub(near, target_pos_km)) <= norm(sub(far, target_pos_km));
    if !near_side {
        return None;
    }

    Some(angle_between(neg(sat_pos_km), los))
}

/// Elevation of the satellite above the target's local horizon, degrees.
pub fn target_elevation_angle(sat_pos_km: [f64; 3], target_pos_km: [f64; 3]) -> f64 {
    let los = sub(target_pos_km, sat_pos_km);
    90.0 - angle_between(los, neg(target_pos_km))
}
