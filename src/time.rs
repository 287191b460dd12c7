use hifitime::{Duration, Epoch};

use crate::constants::{DPI, SECONDS_PER_DAY, T2000};
use crate::eclipse_errors::EclipseError;

/// A timezone-naive calendar timestamp (UTC scale, second resolution).
pub type Instant = Epoch;

/// Number of fields in a `Y-M-D-H-M-S` timestamp.
const DATE_FIELDS: usize = 6;

fn parse_field<T: std::str::FromStr>(
    field: &str,
    name: &str,
    input: &str,
) -> Result<T, EclipseError> {
    field.trim().parse::<T>().map_err(|_| {
        EclipseError::InvalidDateFormat(format!("{input} (invalid {name} '{field}')"))
    })
}

/// Parse a timestamp in the `Y-M-D-H-M-S` format used on the command line.
///
/// Arguments
/// ---------
/// * `input`: a string such as `"2017-08-21-18-25-00"`.
///
/// Return
/// ------
/// * the corresponding [`Instant`] in the UTC time scale.
///
/// Errors
/// ------
/// * [`EclipseError::InvalidDateFormat`] if the string does not have six numeric fields.
/// * [`EclipseError::InvalidDateComponent`] if a field is out of its calendar range.
pub fn parse_instant(input: &str) -> Result<Instant, EclipseError> {
    let fields: Vec<&str> = input.trim().split('-').collect();
    if fields.len() != DATE_FIELDS {
        return Err(EclipseError::InvalidDateFormat(input.to_string()));
    }

    let year: i32 = parse_field(fields[0], "year", input)?;
    let month: u8 = parse_field(fields[1], "month", input)?;
    let day: u8 = parse_field(fields[2], "day", input)?;
    let hour: u8 = parse_field(fields[3], "hour", input)?;
    let minute: u8 = parse_field(fields[4], "minute", input)?;
    let second: u8 = parse_field(fields[5], "second", input)?;

    // hifitime accepts hour 24 as the end of the day
    if hour > 23 {
        return Err(EclipseError::InvalidDateComponent(format!("hour {hour}")));
    }
    if minute > 59 {
        return Err(EclipseError::InvalidDateComponent(format!("minute {minute}")));
    }
    if second > 59 {
        return Err(EclipseError::InvalidDateComponent(format!("second {second}")));
    }

    Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0).map_err(|e| {
        EclipseError::InvalidDateComponent(format!("{year}-{month:02}-{day:02}: {e}"))
    })
}

/// Advance an instant by a whole number of seconds.
pub fn advance(instant: &Instant, seconds: i64) -> Instant {
    *instant + Duration::from_seconds(seconds as f64)
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// The GMST is computed in two steps:
/// 1. Use a cubic polynomial (coefficients C0–C3) to get GMST at 0h UT1
///    in seconds for the given date.
/// 2. Add the contribution of Earth's rotation during the fractional day
///    using the factor `RAP`, which converts solar days to sidereal days.
pub fn gmst(tjm: f64) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, seconds converted to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / SECONDS_PER_DAY;

    // Fraction of the day, scaled to sidereal rate
    let h = tjm.fract() * DPI;
    let gmst = gmst0 + h * RAP;

    gmst.rem_euclid(DPI)
}
