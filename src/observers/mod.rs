//! # Observer & Site Geometry
//!
//! This module gathers **observer/site handling** for the local sky computations:
//!
//! - An [`Observer`](crate::observers::Observer) type storing the geodetic site
//!   (latitude, longitude, elevation) together with its **geocentric parallax coordinates**
//!   (ρ·cosφ, ρ·sinφ), precomputed once at construction.
//! - Helpers converting geodetic latitude/elevation to normalized parallax coordinates
//!   ([`geodetic_to_parallax`](crate::observers::geodetic_to_parallax),
//!   [`lat_alt_to_parallax`](crate::observers::lat_alt_to_parallax)).
//! - The synthetic **Earth-centre observer**
//!   ([`Observer::earth_center`](crate::observers::Observer::earth_center)) used by the
//!   global feasibility check, obtained by sinking a site at (0, 0) by one Earth radius.
//!
//! ## Frames & conventions
//!
//! ```text
//! Body-fixed  --(rotation by local apparent sidereal time)-->  true equator of date
//! ```
//!
//! ## Units
//!
//! - Latitude, longitude: **degrees** (north and east positive).
//! - Elevation: **meters** above the reference ellipsoid.
//! - Geocentric parallax (ρ·cosφ, ρ·sinφ): **Earth radii**.
//! - Geocentric position vectors: **kilometers**.

use nalgebra::Vector3;

use crate::constants::{
    Degree, Kilometer, Meter, Radian, EARTH_CENTER_DEPTH, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS,
};
use crate::ref_system::rotmt;

/// Observer site with precomputed geocentric parallax coordinates.
///
/// Units
/// -----
/// * `longitude`, `latitude`: degrees (geodetic, east and north positive).
/// * `elevation`: meters above the WGS84 ellipsoid.
/// * `rho_cos_phi`, `rho_sin_phi`: Earth radii.
///
/// An observer is an immutable value: every ephemeris query receives it explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: Degree,

    /// Geodetic latitude in **degrees**.
    pub latitude: Degree,

    /// Height above the reference ellipsoid in **meters**.
    pub elevation: Meter,

    /// ρ·cosφ (geocentric latitude φ), in **Earth radii**.
    pub rho_cos_phi: f64,

    /// ρ·sinφ (geocentric latitude φ), in **Earth radii**.
    pub rho_sin_phi: f64,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in **degrees** (east positive).
    /// * `latitude`: Geodetic latitude in **degrees**.
    /// * `elevation`: Height above the reference ellipsoid in **meters**.
    pub fn new(longitude: Degree, latitude: Degree, elevation: Meter) -> Observer {
        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);
        Observer {
            longitude,
            latitude,
            elevation,
            rho_cos_phi,
            rho_sin_phi,
        }
    }

    /// Observer on the ellipsoid surface (zero elevation).
    pub fn at_sea_level(longitude: Degree, latitude: Degree) -> Observer {
        Observer::new(longitude, latitude, 0.0)
    }

    /// Synthetic observer at the centre of the Earth.
    ///
    /// The site (lon = lat = 0) is sunk by one mean Earth radius so that an ephemeris
    /// provider computing topocentric positions yields geocentric ones.
    pub fn earth_center() -> Observer {
        Observer::new(0.0, 0.0, -EARTH_CENTER_DEPTH)
    }

    /// Geodetic latitude in radians.
    pub fn latitude_rad(&self) -> Radian {
        self.latitude.to_radians()
    }

    /// Local apparent sidereal time for a given Greenwich apparent sidereal time.
    pub fn local_sidereal_time(&self, gast: Radian) -> Radian {
        gast + self.longitude.to_radians()
    }

    /// Geocentric position of the observer in the true equatorial frame of date.
    ///
    /// Arguments
    /// ---------
    /// * `gast`: Greenwich apparent sidereal time (radians).
    ///
    /// Return
    /// ------
    /// * position vector in **kilometers**.
    pub fn geocentric_position(&self, gast: Radian) -> Vector3<Kilometer> {
        let earth_radius_km = EARTH_MAJOR_AXIS / 1000.0;
        let body_fixed = Vector3::new(
            earth_radius_km * self.rho_cos_phi,
            0.0,
            earth_radius_km * self.rho_sin_phi,
        );
        rotmt(self.local_sidereal_time(gast), 2) * body_fixed
    }
}

/// Convert geodetic latitude and height into normalized geocentric parallax coordinates.
///
/// Arguments
/// ---------
/// * `lat` - Geodetic latitude of the observer in **radians**.
/// * `height` - Observer's altitude above the reference ellipsoid in **meters**.
///
/// Returns
/// -------
/// A tuple `(rho_cos_phi, rho_sin_phi)` in Earth radii.
///
/// Details
/// -------
/// The formula comes from standard geodetic to geocentric conversion:
///
/// ```text
/// u = atan( (sin φ * (b/a)) / cos φ )
/// ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
/// ρ_cosφ = cos u + (h/a) * cos φ
/// ```
///
/// where `a` and `b` are the Earth's semi-major and semi-minor axes,
/// and `h` is the height above the ellipsoid.
pub fn lat_alt_to_parallax(lat: f64, height: f64) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Convert geodetic latitude (in degrees) and height (in meters)
/// into normalized parallax coordinates.
///
/// Convenience wrapper around [`lat_alt_to_parallax`].
pub fn geodetic_to_parallax(lat: f64, height: f64) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
