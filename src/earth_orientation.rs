use crate::constants::{ArcSec, Radian, DAYS_PER_JULIAN_CENTURY, DPI, RADSEC, T2000};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// The obliquity ε is computed as a cubic polynomial in Julian centuries since J2000,
/// evaluated with Horner's method:
///
/// ```text
/// ε = ((ob3 * t + ob2) * t + ob1) * t + ob0;
/// ```
pub fn obleq(tjm: f64) -> Radian {
    // Obliquity coefficients
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// One periodic term of the IAU 1980 nutation series.
///
/// `args` holds the integer multipliers of (l, l', F, D, Ω); the coefficients are
/// in units of 0.0001 arcsecond, with their secular rates per Julian century.
struct NutationTerm {
    args: [i8; 5],
    psi: (f64, f64),
    eps: (f64, f64),
}

/// Dominant terms of the IAU 1980 series, largest first.
///
/// The truncation error stays below one arcsecond, far smaller than a solar radius.
#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 18] = [
    NutationTerm { args: [0, 0, 0, 0, 1], psi: (-171996.0, -174.2), eps: (92025.0, 8.9) },
    NutationTerm { args: [0, 0, 2, -2, 2], psi: (-13187.0, -1.6), eps: (5736.0, -3.1) },
    NutationTerm { args: [0, 0, 2, 0, 2], psi: (-2274.0, -0.2), eps: (977.0, -0.5) },
    NutationTerm { args: [0, 0, 0, 0, 2], psi: (2062.0, 0.2), eps: (-895.0, 0.5) },
    NutationTerm { args: [0, 1, 0, 0, 0], psi: (1426.0, -3.4), eps: (54.0, -0.1) },
    NutationTerm { args: [1, 0, 0, 0, 0], psi: (712.0, 0.1), eps: (-7.0, 0.0) },
    NutationTerm { args: [0, 1, 2, -2, 2], psi: (-517.0, 1.2), eps: (224.0, -0.6) },
    NutationTerm { args: [0, 0, 2, 0, 1], psi: (-386.0, -0.4), eps: (200.0, 0.0) },
    NutationTerm { args: [1, 0, 2, 0, 2], psi: (-301.0, 0.0), eps: (129.0, -0.1) },
    NutationTerm { args: [0, -1, 2, -2, 2], psi: (217.0, -0.5), eps: (-95.0, 0.3) },
    NutationTerm { args: [1, 0, 0, -2, 0], psi: (-158.0, 0.0), eps: (0.0, 0.0) },
    NutationTerm { args: [0, 0, 2, -2, 1], psi: (129.0, 0.1), eps: (-70.0, 0.0) },
    NutationTerm { args: [-1, 0, 2, 0, 2], psi: (123.0, 0.0), eps: (-53.0, 0.0) },
    NutationTerm { args: [1, 0, 0, 0, 1], psi: (63.0, 0.1), eps: (-33.0, 0.0) },
    NutationTerm { args: [0, 0, 0, 2, 0], psi: (63.0, 0.0), eps: (0.0, 0.0) },
    NutationTerm { args: [-1, 0, 2, 2, 2], psi: (-59.0, 0.0), eps: (26.0, 0.0) },
    NutationTerm { args: [-1, 0, 0, 0, 1], psi: (-58.0, -0.1), eps: (32.0, 0.0) },
    NutationTerm { args: [1, 0, 2, 0, 1], psi: (-51.0, 0.0), eps: (27.0, 0.0) },
];

/// Compute the nutation angles in longitude and obliquity (truncated IAU 1980 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (in TT time scale).
///
/// Returns
/// --------
/// * A tuple `(Δψ, Δε)`:
///     - `Δψ`: nutation in longitude \[arcseconds\]
///     - `Δε`: nutation in obliquity \[arcseconds\]
///
/// Description
/// -----------
/// The five fundamental arguments are the IAU 1980 polynomials:
/// - Mean anomaly of the Moon (l)
/// - Mean anomaly of the Sun (l')
/// - Argument of latitude of the Moon (F)
/// - Mean elongation of the Moon from the Sun (D)
/// - Longitude of the Moon's ascending node (Ω)
///
/// Only the dominant periodic terms are summed, see [`NUTATION_TERMS`].
pub fn nutn80(tjm: f64) -> (ArcSec, ArcSec) {
    let t = (tjm - T2000) / DAYS_PER_JULIAN_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let dl = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let dp = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let df = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let dd = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let dn = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    let fundamental = [dl % DPI, dp % DPI, df % DPI, dd % DPI, dn % DPI];

    let (dpsi, deps) = NUTATION_TERMS
        .iter()
        .fold((0.0, 0.0), |(dpsi, deps), term| {
            let arg: f64 = term
                .args
                .iter()
                .zip(fundamental.iter())
                .map(|(&k, &a)| f64::from(k) * a)
                .sum();
            (
                dpsi + (term.psi.0 + term.psi.1 * t) * arg.sin(),
                deps + (term.eps.0 + term.eps.1 * t) * arg.cos(),
            )
        });

    // 0.0001 arcsecond units to arcseconds
    (dpsi * 1e-4, deps * 1e-4)
}

/// Compute the equation of the equinoxes (nutation correction) in radians.
///
/// This term accounts for the small difference between apparent sidereal time
/// and mean sidereal time due to the nutation of Earth's rotation axis:
///
/// ```text
/// Eq_eq = Δψ * cos(ε)
/// ```
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, TT scale)
///
/// # Returns
/// * Equation of the equinoxes in **radians**.
pub fn equequ(tjm: f64) -> f64 {
    let oblm = obleq(tjm);
    let (dpsi, _deps) = nutn80(tjm);

    RADSEC * dpsi * oblm.cos()
}
