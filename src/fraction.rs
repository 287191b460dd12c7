//! # Local eclipse fraction
//!
//! Percentage of the solar disk hidden by the Moon for a single observer.
//!
//! The computation works entirely on the apparent disks returned by the ephemeris
//! provider (angular radii in arcseconds, altitude/azimuth in radians) and classifies the
//! configuration into one of the [`Occlusion`] regimes before applying
//! [`lune_areas`](crate::geometry::lune_areas):
//!
//! | Regime         | Condition                       | Result                       |
//! |----------------|---------------------------------|------------------------------|
//! | BelowHorizon   | Sun altitude < −r_sun           | 0                            |
//! | Disjoint       | sep ≥ r_sun + r_moon            | 0                            |
//! | Total          | r_moon − r_sun ≥ sep            | 100                          |
//! | Partial        | r_moon > r_sun, overlapping     | from the lune of the Sun     |
//! | Annular        | r_sun − r_moon ≥ sep            | see [`AnnulusPolicy`]        |
//! | AnnularPartial | r_sun ≥ r_moon, overlapping     | from the lune of the Sun     |
//!
//! A visible (unoccluded) solar area `A` converts to `(1 − A / πr_sun²) · 100`.

use std::f64::consts::PI;

use tracing::trace;

use crate::constants::{ArcSec, Degree, Percent, RADSEC};
use crate::eclipse_errors::EclipseError;
use crate::ephemeris::{EphemerisProvider, SkyDisk, SkySnapshot, SunMoon};
use crate::geometry::lune_areas;
use crate::observers::Observer;
use crate::options::AnnulusPolicy;
use crate::time::Instant;

/// Geometric regime of the Sun/Moon pair for one observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occlusion {
    BelowHorizon,
    Disjoint,
    Total,
    Partial,
    Annular,
    AnnularPartial,
}

impl Occlusion {
    /// Classify a Sun/Moon configuration.
    pub fn classify(sun: &SkyDisk, moon: &SkyDisk, separation: ArcSec) -> Occlusion {
        if sun.altitude < -sun.angular_radius * RADSEC {
            Occlusion::BelowHorizon
        } else {
            Occlusion::from_disks(sun.angular_radius, moon.angular_radius, separation)
        }
    }

    /// Classify two disks from their radii and separation alone, ignoring the horizon.
    pub fn from_disks(r_sun: ArcSec, r_moon: ArcSec, separation: ArcSec) -> Occlusion {
        if separation >= r_sun + r_moon {
            Occlusion::Disjoint
        } else if r_moon > r_sun {
            if r_moon - r_sun >= separation {
                Occlusion::Total
            } else {
                Occlusion::Partial
            }
        } else if r_sun - r_moon >= separation {
            Occlusion::Annular
        } else {
            Occlusion::AnnularPartial
        }
    }
}

/// Share of the solar disk hidden by the Moon, from the disk radii and their separation.
///
/// Arguments
/// ---------
/// * `r_sun`, `r_moon`: apparent angular radii (arcseconds).
/// * `separation`: centre-to-centre distance (arcseconds).
/// * `annulus`: what to return when the Moon lies entirely inside the Sun.
///
/// Return
/// ------
/// * a percentage in [0, 100], except under [`AnnulusPolicy::RingArea`] in the annular
///   regime where the raw ring area (arcsec²) is returned.
///
/// The horizon test is not applied here, see [`eclipse_fraction`].
pub fn disk_occlusion(
    r_sun: ArcSec,
    r_moon: ArcSec,
    separation: ArcSec,
    annulus: AnnulusPolicy,
) -> Percent {
    let regime = Occlusion::from_disks(r_sun, r_moon, separation);
    occlusion_for(regime, r_sun, r_moon, separation, annulus)
}

fn occlusion_for(
    regime: Occlusion,
    r_sun: ArcSec,
    r_moon: ArcSec,
    separation: ArcSec,
    annulus: AnnulusPolicy,
) -> Percent {
    let sun_area = PI * r_sun * r_sun;
    let to_percent = |visible: f64| ((1.0 - visible / sun_area) * 100.0).clamp(0.0, 100.0);

    match regime {
        Occlusion::BelowHorizon | Occlusion::Disjoint => 0.0,
        Occlusion::Total => 100.0,
        Occlusion::Partial => to_percent(lune_areas(r_sun, r_moon, separation).lune_a),
        Occlusion::AnnularPartial => to_percent(lune_areas(r_moon, r_sun, separation).lune_b),
        Occlusion::Annular => match annulus {
            AnnulusPolicy::Percentage => ((r_moon * r_moon) / (r_sun * r_sun) * 100.0).min(100.0),
            AnnulusPolicy::RingArea => PI * (r_sun * r_sun - r_moon * r_moon),
        },
    }
}

/// Eclipse fraction for an already observed Sun/Moon pair.
///
/// Returns 0 when the Sun is below the horizon by more than its own radius.
pub fn fraction_of(pair: &SunMoon, annulus: AnnulusPolicy) -> Percent {
    let separation = pair.separation();
    let regime = Occlusion::classify(&pair.sun, &pair.moon, separation);
    trace!(
        "{regime:?}: r_sun={:.1}\" r_moon={:.1}\" sep={separation:.1}\"",
        pair.sun.angular_radius,
        pair.moon.angular_radius
    );
    occlusion_for(
        regime,
        pair.sun.angular_radius,
        pair.moon.angular_radius,
        separation,
        annulus,
    )
}

/// Eclipse fraction seen from `observer` on a precomputed sky snapshot.
pub fn fraction_on_sky<S: SkySnapshot>(
    sky: &S,
    observer: &Observer,
    annulus: AnnulusPolicy,
) -> Result<Percent, EclipseError> {
    Ok(fraction_of(&sky.observe(observer)?, annulus))
}

/// Percentage of the solar disk occluded by the Moon for a sea-level observer.
///
/// Arguments
/// ---------
/// * `ephemeris`: Sun/Moon sky geometry source.
/// * `instant`: observation time.
/// * `latitude`, `longitude`: observer position in degrees.
/// * `annulus`: annular-regime policy.
///
/// Return
/// ------
/// * the occluded percentage, 0 when the Sun is set or the disks do not touch.
pub fn eclipse_fraction<E: EphemerisProvider>(
    ephemeris: &E,
    instant: &Instant,
    latitude: Degree,
    longitude: Degree,
    annulus: AnnulusPolicy,
) -> Result<Percent, EclipseError> {
    let sky = ephemeris.sky_at(instant)?;
    fraction_on_sky(&sky, &Observer::at_sea_level(longitude, latitude), annulus)
}
