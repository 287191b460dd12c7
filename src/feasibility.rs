//! Cheap global test ruling out any eclipse at an instant.
//!
//! Seen from the centre of the Earth, a solar eclipse somewhere on the surface requires the
//! Sun and Moon to lie within [`MAX_ECLIPSE_SEPARATION`] of each other (sum of the disk
//! radii plus the lunar parallax). One geocentric query replaces a full grid.

use tracing::trace;

use crate::constants::{Degree, ARCSEC_PER_DEGREE, MAX_ECLIPSE_SEPARATION};
use crate::eclipse_errors::EclipseError;
use crate::ephemeris::{EphemerisProvider, SkySnapshot};
use crate::observers::Observer;
use crate::time::Instant;

/// Geocentric Sun–Moon separation at `instant`, in degrees.
pub fn geocentric_separation<E: EphemerisProvider>(
    ephemeris: &E,
    instant: &Instant,
) -> Result<Degree, EclipseError> {
    let pair = ephemeris.sky_at(instant)?.observe(&Observer::earth_center())?;
    Ok(pair.separation() / ARCSEC_PER_DEGREE)
}

/// `true` when no observer on Earth can see the Moon overlap the Sun at `instant`.
///
/// The boundary itself (separation exactly [`MAX_ECLIPSE_SEPARATION`]) counts as possible.
pub fn eclipse_impossible<E: EphemerisProvider>(
    ephemeris: &E,
    instant: &Instant,
) -> Result<bool, EclipseError> {
    let separation = geocentric_separation(ephemeris, instant)?;
    let impossible = separation > MAX_ECLIPSE_SEPARATION;
    if impossible {
        trace!("No eclipse possible at {instant} (separation {separation:.3}°)");
    }
    Ok(impossible)
}

#[cfg(test)]
mod feasibility_test {
    use super::*;
    use crate::ephemeris::AnalyticEphemeris;
    use crate::time::parse_instant;

    #[test]
    fn test_total_eclipse_2017_is_possible() {
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2017-08-21-18-26-00").unwrap();
        assert!(!eclipse_impossible(&ephem, &t).unwrap());
    }

    #[test]
    fn test_quarter_moon_is_impossible() {
        // first quarter, 2018-02-23: Moon ~90° from the Sun
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2018-02-23-08-09-00").unwrap();
        assert!(eclipse_impossible(&ephem, &t).unwrap());
        assert!(geocentric_separation(&ephem, &t).unwrap() > 60.0);
    }

    #[test]
    fn test_new_moon_out_of_season_is_impossible() {
        // new moon of 2018-03-17 13:11 UTC, Moon ~4° from the ecliptic node line
        let ephem = AnalyticEphemeris::default();
        let t = parse_instant("2018-03-17-13-11-00").unwrap();
        assert!(eclipse_impossible(&ephem, &t).unwrap());
    }
}
