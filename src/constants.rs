//! # Constants and type definitions for eclipse_map
//!
//! This module centralizes the **physical constants**, **conversion factors**, **angle type
//! aliases** and **search defaults** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (Earth ellipsoid, body radii, AU)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - Default sampling parameters of the temporal search and the grid rasterizer

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Arcseconds in one degree
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius used to sink an observer to the geocentre, in meters.
pub const EARTH_CENTER_DEPTH: f64 = 6_378_100.0;

/// Sun nominal radius in km
pub const SUN_RADIUS_KM: f64 = 696_000.0;

/// Moon mean radius in km
pub const MOON_RADIUS_KM: f64 = 1_737.4;

// -------------------------------------------------------------------------------------------------
// Search and raster defaults
// -------------------------------------------------------------------------------------------------

/// Geocentric Sun–Moon separation (degrees) beyond which no point on Earth sees an overlap.
pub const MAX_ECLIPSE_SEPARATION: Degree = 1.7;

/// Default coarse step of the feasibility search, in seconds.
pub const DEFAULT_SEARCH_STEP: i64 = 100;

/// Default sampling interval inside an eclipse window, in seconds.
pub const DEFAULT_TIME_STEP: i64 = 100;

/// Default grid resolution, in cells per degree.
pub const DEFAULT_RESOLUTION: u32 = 1;

/// Scale factor from an occlusion percentage to an 8-bit intensity.
pub const PERCENT_TO_INTENSITY: f64 = 2.55;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Occlusion of the solar disk, in percent
pub type Percent = f64;

/// Modified Julian Date (days)
pub type MJD = f64;
