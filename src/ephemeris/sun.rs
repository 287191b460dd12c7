//! Low-precision apparent geocentric Sun.
//!
//! Mean longitude, mean anomaly and the equation of the centre give the true longitude;
//! the apparent longitude adds nutation in longitude and annual aberration. Accuracy is
//! about 0.01°, well below the solar radius.

use crate::constants::{DAYS_PER_JULIAN_CENTURY, DPI, MJD, RADSEC, AU, T2000};
use crate::earth_orientation::nutn80;

use super::EclipticPosition;

/// Constant of annual aberration, in arcseconds (at 1 AU).
const ABERRATION: f64 = 20.4898;

/// Apparent ecliptic position of the Sun (true equinox of date).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Return
/// ------
/// * [`EclipticPosition`] with the apparent longitude, zero latitude and the
///   Earth–Sun distance in kilometers.
pub fn apparent_sun(tjm: MJD) -> EclipticPosition {
    let t = (tjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let l0 = 280.46646 + t * (36000.76983 + 0.0003032 * t);
    let m = (357.52911 + t * (35999.05029 - 0.0001537 * t)).to_radians();
    let e = 0.016708634 - t * (0.000042037 + 0.0000001267 * t);

    // equation of the centre, degrees
    let c = (1.914602 - t * (0.004817 + 0.000014 * t)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_longitude = (l0 + c).to_radians();
    let true_anomaly = m + c.to_radians();
    let radius_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let (dpsi, _deps) = nutn80(tjm);
    let longitude = true_longitude + (dpsi - ABERRATION / radius_au) * RADSEC;

    EclipticPosition {
        longitude: longitude.rem_euclid(DPI),
        latitude: 0.0,
        distance: radius_au * AU,
    }
}
