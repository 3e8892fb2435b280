//! WGS-84 frame plumbing between the SGP4 output frame and geodetic
//! coordinates.

pub const WGS84_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const WGS84_POLAR_RADIUS_KM: f64 = 6356.752_314_245;
pub const WGS84_E2: f64 = 0.006_694_379_990_14;

/// Rotate a TEME position into the Earth-fixed frame by the Greenwich
/// sidereal angle (radians).
pub fn teme_to_ecef(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Convert an Earth-fixed position (km) to geodetic latitude (deg),
/// longitude (deg, [-180, 180)) and height above the ellipsoid (km).
///
/// Fixed-point iteration on the geodetic latitude; converges in a handful of
/// rounds for anything above the surface.
pub fn ecef_to_geodetic(pos_ecef_km: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = pos_ecef_km;
    let a = WGS84_EQUATORIAL_RADIUS_KM;
    let r = (x * x + y * y).sqrt();

    let lon_deg = normalize_longitude(y.atan2(x).to_degrees());

    // Directly over a pole the iteration below degenerates (r -> 0).
    if r < 1e-9 {
        let lat_deg = if z >= 0.0 { 90.0 } else { -90.0 };
        return (lat_deg, lon_deg, z.abs() - WGS84_POLAR_RADIUS_KM);
    }

    let mut lat = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..10 {
        let prev = lat;
        c = 1.0 / (1.0 - WGS84_E2 * prev.sin() * prev.sin()).sqrt();
        lat = (z + a * c * WGS84_E2 * prev.sin()).atan2(r);
        if (lat - prev).abs() < 1e-12 {
            break;
        }
    }

    let elevation_km = r / lat.cos() - a * c;
    (lat.to_degrees(), lon_deg, elevation_km)
}

/// Wrap a longitude in degrees into [-180, 180).
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}
