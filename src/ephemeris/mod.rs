//! # Sun & Moon ephemeris provider
//!
//! The eclipse core only needs, for one observer and one instant, the apparent
//! angular radius, altitude and azimuth of the Sun and of the Moon. This module defines
//! that contract as two traits and ships an analytic implementation.
//!
//! ## Contract
//!
//! - [`EphemerisProvider::sky_at`] computes an immutable [`SkySnapshot`] for one instant.
//!   Everything that does not depend on the observer (geocentric positions, sidereal time)
//!   is evaluated once there.
//! - [`SkySnapshot::observe`] turns the snapshot into a [`SunMoon`] pair for one
//!   [`Observer`](crate::observers::Observer), applying topocentric parallax and refraction.
//!
//! No query mutates shared state: observers and instants are passed explicitly and the
//! returned values are plain data.
//!
//! ## Analytic provider
//!
//! [`AnalyticEphemeris`] combines
//! - the low-precision solar theory of [`sun::apparent_sun`],
//! - the truncated lunar series of [`moon::apparent_moon`],
//! - the true obliquity ([`obleq`] + nutation) for the ecliptic → equator rotation,
//! - Greenwich apparent sidereal time ([`gmst`] + [`equequ`]), UTC standing in for UT1,
//! - the topocentric correction of [`horizon::topocentric_disk`].
//!
//! ## Units
//!
//! - Angular radii and separations: **arcseconds**.
//! - Altitudes and azimuths: **radians** (azimuth from north through east).

pub mod horizon;
pub mod moon;
pub mod sun;

use nalgebra::Vector3;

use crate::constants::{ArcSec, Kilometer, Radian, MOON_RADIUS_KM, RADSEC, SUN_RADIUS_KM};
use crate::earth_orientation::{equequ, nutn80, obleq};
use crate::eclipse_errors::EclipseError;
use crate::observers::Observer;
use crate::ref_system::ecliptic_to_equatorial;
use crate::time::{gmst, Instant};

use self::horizon::{topocentric_disk, Atmosphere};

/// Apparent ecliptic coordinates of a body (true equinox of date).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    /// Apparent ecliptic longitude in radians, in [0, 2π).
    pub longitude: Radian,
    /// Ecliptic latitude in radians.
    pub latitude: Radian,
    /// Geocentric distance in kilometers.
    pub distance: Kilometer,
}

/// Apparent disk of a body on the local sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyDisk {
    /// Apparent angular radius (semi-diameter) in arcseconds.
    pub angular_radius: ArcSec,
    /// Apparent (refracted) altitude in radians.
    pub altitude: Radian,
    /// Azimuth in radians, from north through east.
    pub azimuth: Radian,
}

/// The Sun and Moon disks seen by one observer at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunMoon {
    pub sun: SkyDisk,
    pub moon: SkyDisk,
}

impl SunMoon {
    /// Angular separation between the two disk centres, in arcseconds.
    pub fn separation(&self) -> ArcSec {
        angular_separation(
            (self.sun.azimuth, self.sun.altitude),
            (self.moon.azimuth, self.moon.altitude),
        ) / RADSEC
    }
}

/// Angular separation between two sky directions given as (longitude-like, latitude-like) pairs.
///
/// Works for (azimuth, altitude) as well as (right ascension, declination). Uses the
/// haversine form, which stays accurate for the arcsecond-scale separations of an eclipse.
///
/// Return
/// ------
/// * the separation in radians, in [0, π].
pub fn angular_separation(a: (Radian, Radian), b: (Radian, Radian)) -> Radian {
    let (lon1, lat1) = a;
    let (lon2, lat2) = b;

    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;
    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);

    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Observer-independent sky state at one instant.
pub trait SkySnapshot {
    /// Sun and Moon disks seen from `observer`.
    fn observe(&self, observer: &Observer) -> Result<SunMoon, EclipseError>;
}

/// Source of Sun/Moon sky geometry.
pub trait EphemerisProvider {
    type Sky: SkySnapshot;

    /// Evaluate the sky at `instant`.
    fn sky_at(&self, instant: &Instant) -> Result<Self::Sky, EclipseError>;
}

/// Analytic Sun/Moon ephemeris (see module documentation).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyticEphemeris {
    pub atmosphere: Atmosphere,
}

impl AnalyticEphemeris {
    pub fn new(atmosphere: Atmosphere) -> Self {
        AnalyticEphemeris { atmosphere }
    }
}

/// Sky snapshot produced by [`AnalyticEphemeris`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticSky {
    /// Geocentric Sun, true equator of date (km).
    pub sun: Vector3<Kilometer>,
    /// Geocentric Moon, true equator of date (km).
    pub moon: Vector3<Kilometer>,
    /// Greenwich apparent sidereal time (radians).
    pub gast: Radian,
    atmosphere: Atmosphere,
}

impl EphemerisProvider for AnalyticEphemeris {
    type Sky = AnalyticSky;

    fn sky_at(&self, instant: &Instant) -> Result<AnalyticSky, EclipseError> {
        let tjm_tt = instant.to_mjd_tt_days();
        let tjm_ut = instant.to_mjd_utc_days();

        if !tjm_tt.is_finite() || !tjm_ut.is_finite() {
            return Err(EclipseError::Ephemeris(format!(
                "non-finite date for instant {instant}"
            )));
        }

        let (_dpsi, deps) = nutn80(tjm_tt);
        let true_obliquity = obleq(tjm_tt) + deps * RADSEC;

        let sun = sun::apparent_sun(tjm_tt);
        let moon = moon::apparent_moon(tjm_tt);

        Ok(AnalyticSky {
            sun: ecliptic_to_equatorial(sun.longitude, sun.latitude, sun.distance, true_obliquity),
            moon: ecliptic_to_equatorial(
                moon.longitude,
                moon.latitude,
                moon.distance,
                true_obliquity,
            ),
            gast: gmst(tjm_ut) + equequ(tjm_tt),
            atmosphere: self.atmosphere,
        })
    }
}

impl SkySnapshot for AnalyticSky {
    fn observe(&self, observer: &Observer) -> Result<SunMoon, EclipseError> {
        Ok(SunMoon {
            sun: topocentric_disk(
                &self.sun,
                SUN_RADIUS_KM,
                observer,
                self.gast,
                &self.atmosphere,
            ),
            moon: topocentric_disk(
                &self.moon,
                MOON_RADIUS_KM,
                observer,
                self.gast,
                &self.atmosphere,
            ),
        })
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::time::parse_instant;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angular_separation() {
        assert_abs_diff_eq!(angular_separation((0.0, 0.0), (0.0, 0.0)), 0.0);
        assert_abs_diff_eq!(
            angular_separation((0.0, 0.0), (std::f64::consts::PI, 0.0)),
            std::f64::consts::PI,
            epsilon = 1e-12
        );
        // along a meridian, separation is the latitude difference
        assert_abs_diff_eq!(
            angular_separation((1.0, 0.1), (1.0, 0.1 + 5.0 * RADSEC)),
            5.0 * RADSEC,
            epsilon = 1e-15
        );
        // azimuth differences shrink with cos(altitude)
        let sep = angular_separation((0.0, 1.0), (10.0 * RADSEC, 1.0));
        assert_abs_diff_eq!(sep / RADSEC, 10.0 * 1.0f64.cos(), epsilon = 1e-6);
    }

    #[test]
    fn test_disk_sizes_are_physical() {
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2024-04-08-18-00-00").unwrap();
        let sky = ephem.sky_at(&t).unwrap();
        let pair = sky.observe(&Observer::at_sea_level(-100.0, 25.0)).unwrap();

        // semi-diameters: Sun 944"–976", Moon 880"–1025" (topocentric)
        assert!(pair.sun.angular_radius > 940.0 && pair.sun.angular_radius < 980.0);
        assert!(pair.moon.angular_radius > 870.0 && pair.moon.angular_radius < 1030.0);
    }

    #[test]
    fn test_geocentric_conjunction_2017() {
        // total eclipse of 2017 August 21, greatest eclipse near 18:26 UTC
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2017-08-21-18-26-00").unwrap();
        let sky = ephem.sky_at(&t).unwrap();
        let geo = sky.observe(&Observer::earth_center()).unwrap();
        assert!(
            geo.separation() < 0.6 * 3600.0,
            "geocentric separation {}\"",
            geo.separation()
        );
    }

    #[test]
    fn test_totality_seen_from_the_central_line() {
        // greatest eclipse 2017-08-21 18:25:32 UTC at 36.97 N, 87.67 W, Moon radius > Sun radius
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2017-08-21-18-25-32").unwrap();
        let sky = ephem.sky_at(&t).unwrap();
        let pair = sky.observe(&Observer::at_sea_level(-87.67, 36.97)).unwrap();

        assert!(pair.moon.angular_radius > pair.sun.angular_radius);
        assert!(pair.sun.altitude > 60f64.to_radians());
        let sep = pair.separation();
        assert!(sep < 60.0, "topocentric separation {sep}\"");
    }
}
