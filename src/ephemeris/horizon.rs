//! Topocentric horizon coordinates: parallax, altitude/azimuth and refraction.

use nalgebra::Vector3;

use crate::constants::{Kilometer, Radian, DPI, RADSEC};
use crate::observers::Observer;
use crate::ref_system::cartesian_to_radec;

use super::SkyDisk;

/// Atmospheric conditions entering the refraction model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Pressure in hPa.
    pub pressure: f64,
    /// Temperature in °C.
    pub temperature: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Atmosphere {
            pressure: 1010.0,
            temperature: 15.0,
        }
    }
}

/// True altitudes below this bound (degrees) are left unrefracted.
const REFRACTION_FLOOR_DEG: f64 = -1.0;

/// Atmospheric refraction for a body at true (airless) altitude `altitude`.
///
/// Saemundsson's formula, scaled to the given pressure and temperature:
///
/// ```text
/// R = 1.02' / tan(h + 10.3 / (h + 5.11))      (h in degrees)
/// ```
///
/// Return
/// ------
/// * the refraction in radians, to be **added** to the true altitude.
pub fn refraction(altitude: Radian, atmosphere: &Atmosphere) -> Radian {
    let h = altitude.to_degrees();
    if h < REFRACTION_FLOOR_DEG {
        return 0.0;
    }
    let arcmin = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
    let scale = (atmosphere.pressure / 1010.0) * (283.0 / (273.0 + atmosphere.temperature));
    (arcmin * scale * 60.0 * RADSEC).max(0.0)
}

/// Convert an hour angle and declination into horizon coordinates.
///
/// Return
/// ------
/// * `(altitude, azimuth)` in radians, azimuth measured from north through east in [0, 2π).
pub fn equatorial_to_horizontal(
    hour_angle: Radian,
    declination: Radian,
    latitude: Radian,
) -> (Radian, Radian) {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_dec, cos_dec) = declination.sin_cos();
    let (sin_h, cos_h) = hour_angle.sin_cos();

    let sin_alt = (sin_lat * sin_dec + cos_lat * cos_dec * cos_h).clamp(-1.0, 1.0);
    let azimuth = (-cos_dec * sin_h).atan2(sin_dec * cos_lat - cos_dec * cos_h * sin_lat);

    (sin_alt.asin(), azimuth.rem_euclid(DPI))
}

/// Sky disk of a body seen by `observer`.
///
/// Arguments
/// ---------
/// * `position`: geocentric position of the body in the true equatorial frame of date (km).
/// * `body_radius`: physical radius of the body (km).
/// * `observer`: the observing site.
/// * `gast`: Greenwich apparent sidereal time (radians).
/// * `atmosphere`: refraction conditions.
pub fn topocentric_disk(
    position: &Vector3<Kilometer>,
    body_radius: Kilometer,
    observer: &Observer,
    gast: Radian,
    atmosphere: &Atmosphere,
) -> SkyDisk {
    let topocentric = position - observer.geocentric_position(gast);
    let (ra, dec, distance) = cartesian_to_radec(topocentric);

    let hour_angle = observer.local_sidereal_time(gast) - ra;
    let (altitude, azimuth) = equatorial_to_horizontal(hour_angle, dec, observer.latitude_rad());

    SkyDisk {
        angular_radius: (body_radius / distance).asin() / RADSEC,
        altitude: altitude + refraction(altitude, atmosphere),
        azimuth,
    }
}

#[cfg(test)]
mod horizon_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_refraction_at_horizon() {
        // ~29' at zero true altitude under standard conditions
        let r = refraction(0.0, &Atmosphere::default()) / RADSEC / 60.0;
        assert_abs_diff_eq!(r, 29.0, epsilon = 1.5);
    }

    #[test]
    fn test_refraction_vanishes_at_zenith_and_below_floor() {
        let zenith = refraction(FRAC_PI_2, &Atmosphere::default());
        assert!(zenith.abs() < 1.0 * RADSEC);
        assert_eq!(refraction((-10.0f64).to_radians(), &Atmosphere::default()), 0.0);
    }

    #[test]
    fn test_equatorial_to_horizontal() {
        // on the meridian, at the observer's latitude: zenith
        let (alt, _) = equatorial_to_horizontal(0.0, 0.7, 0.7);
        assert_abs_diff_eq!(alt, FRAC_PI_2, epsilon = 1e-12);

        // equatorial star rising due east for an equatorial observer
        let (alt, az) = equatorial_to_horizontal(-FRAC_PI_2, 0.0, 0.0);
        assert_abs_diff_eq!(alt, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az, FRAC_PI_2, epsilon = 1e-12);

        // north celestial pole from latitude 45°: altitude 45°, azimuth 0
        let (alt, az) = equatorial_to_horizontal(1.0, FRAC_PI_2, std::f64::consts::FRAC_PI_4);
        assert_abs_diff_eq!(alt, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(az.min(DPI - az), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_topocentric_disk_parallax() {
        // Moon straight overhead of an equatorial observer at GAST = 0
        let observer = Observer::at_sea_level(0.0, 0.0);
        let moon = Vector3::new(384_400.0, 0.0, 0.0);
        let disk = topocentric_disk(&moon, 1737.4, &observer, 0.0, &Atmosphere::default());

        assert_abs_diff_eq!(disk.altitude, FRAC_PI_2, epsilon = 1e-9);
        // radius seen from 6378 km closer than the geocentre
        let expected = (1737.4f64 / (384_400.0 - 6378.137)).asin() / RADSEC;
        assert_abs_diff_eq!(disk.angular_radius, expected, epsilon = 1e-6);
    }
}
