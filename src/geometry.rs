//! # Disk-occlusion geometry
//!
//! Closed-form areas of two overlapping circular disks: the **lens** they share and the
//! two **lunes** (the part of each disk outside the other).
//!
//! For radii `a`, `b` and centre distance `c`, the triangle with sides `(a, b, c)` has area
//! `δ` (Heron's formula). The lune of disk `a` is
//!
//! ```text
//! A₁ = 2δ + a²·acos((b² − a² − c²) / 2ac) − b²·acos((b² + c² − a²) / 2bc)
//! ```
//!
//! and the lens and the second lune follow from the disk areas:
//! `lens = πa² − A₁`, `A₂ = πb² − lens`.
//!
//! The formula is only defined for properly overlapping disks, `|a − b| < c < a + b`.
//! Callers must handle containment (`c ≤ |a − b|`) and disjoint disks (`c ≥ a + b`)
//! themselves, see [`crate::fraction`].

use std::f64::consts::PI;

/// Areas of two overlapping disks, in the squared unit of the radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcclusionAreas {
    /// Part of the first disk outside the second.
    pub lune_a: f64,
    /// Overlap of the two disks.
    pub lens: f64,
    /// Part of the second disk outside the first.
    pub lune_b: f64,
}

impl From<OcclusionAreas> for (f64, f64, f64) {
    fn from(areas: OcclusionAreas) -> Self {
        (areas.lune_a, areas.lens, areas.lune_b)
    }
}

/// `true` when `(a, b, c)` lies in the domain of [`lune_areas`].
pub fn in_lune_domain(a: f64, b: f64, c: f64) -> bool {
    a > 0.0 && b > 0.0 && (a - b).abs() < c && c < a + b
}

/// Compute the lunes and lens of two overlapping disks.
///
/// Arguments
/// ---------
/// * `a`: radius of the first disk.
/// * `b`: radius of the second disk.
/// * `c`: distance between the disk centres, same unit as the radii.
///
/// Return
/// ------
/// * [`OcclusionAreas`] `(lune_a, lens, lune_b)` in squared units.
///
/// Outside `|a − b| < c < a + b` the result is meaningless; this is checked in debug
/// builds only.
pub fn lune_areas(a: f64, b: f64, c: f64) -> OcclusionAreas {
    debug_assert!(
        in_lune_domain(a, b, c),
        "lune_areas called outside its domain: a={a}, b={b}, c={c}"
    );

    // rounding near tangency can push these just outside their range
    let heron = (a + b + c) * (b + c - a) * (c + a - b) * (a + b - c);
    let delta = 0.25 * heron.max(0.0).sqrt();
    let cos_a = ((b * b - a * a - c * c) / (2.0 * a * c)).clamp(-1.0, 1.0);
    let cos_b = ((b * b + c * c - a * a) / (2.0 * b * c)).clamp(-1.0, 1.0);

    let lune_a = 2.0 * delta + a * a * cos_a.acos() - b * b * cos_b.acos();
    let lens = PI * a * a - lune_a;
    let lune_b = PI * b * b - lens;

    OcclusionAreas {
        lune_a,
        lens,
        lune_b,
    }
}

#[cfg(test)]
mod geometry_test {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_area_identities(a: f64, b: f64, c: f64) {
        let areas = lune_areas(a, b, c);
        let tol = 1e-9 * PI * a.max(b).powi(2);

        assert!(areas.lune_a >= -tol, "negative lune_a {areas:?}");
        assert!(areas.lens >= -tol, "negative lens {areas:?}");
        assert!(areas.lune_b >= -tol, "negative lune_b {areas:?}");
        assert!(areas.lens <= PI * a.min(b).powi(2) + tol);

        assert_relative_eq!(areas.lune_a + areas.lens, PI * a * a, max_relative = 1e-12);
        assert_relative_eq!(areas.lune_b + areas.lens, PI * b * b, max_relative = 1e-12);
    }

    #[test]
    fn test_arcminute_disks() {
        // 16' and 15' disks, 2' apart
        assert_area_identities(16.0, 15.0, 2.0);
        assert_area_identities(15.0, 16.0, 2.0);

        let areas = lune_areas(16.0, 15.0, 2.0);
        // mostly overlapping: the lens holds most of the smaller disk
        assert!(areas.lens > 0.8 * PI * 15.0 * 15.0);
        assert!(areas.lune_a > areas.lune_b);
    }

    #[test]
    fn test_identities_across_the_domain() {
        for (a, b) in [(16.0, 15.0), (959.0, 1005.0), (1.0, 1.0), (3.0, 0.5)] {
            let lo = f64::abs(a - b);
            let hi = a + b;
            for k in 1..100 {
                let c = lo + (hi - lo) * k as f64 / 100.0;
                assert_area_identities(a, b, c);
            }
        }
    }

    #[test]
    fn test_swapping_disks_swaps_lunes() {
        let ab = lune_areas(959.0, 1005.0, 300.0);
        let ba = lune_areas(1005.0, 959.0, 300.0);
        assert_relative_eq!(ab.lune_a, ba.lune_b, max_relative = 1e-9);
        assert_relative_eq!(ab.lune_b, ba.lune_a, max_relative = 1e-9);
        assert_relative_eq!(ab.lens, ba.lens, max_relative = 1e-9);
    }

    #[test]
    fn test_equal_unit_disks_half_apart() {
        // two unit disks at distance 1: lens = 2π/3 − √3/2
        let areas = lune_areas(1.0, 1.0, 1.0);
        assert_relative_eq!(
            areas.lens,
            2.0 * PI / 3.0 - 3f64.sqrt() / 2.0,
            max_relative = 1e-12
        );
        let (l1, lens, l2) = areas.into();
        assert_relative_eq!(l1, l2, max_relative = 1e-12);
        assert_relative_eq!(l1 + lens, PI, max_relative = 1e-12);
    }

    #[test]
    fn test_domain() {
        assert!(in_lune_domain(16.0, 15.0, 2.0));
        assert!(!in_lune_domain(16.0, 15.0, 1.0));
        assert!(!in_lune_domain(16.0, 15.0, 31.0));
        assert!(!in_lune_domain(0.0, 15.0, 10.0));
    }
}
