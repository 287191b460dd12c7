//! # Equirectangular eclipse grid
//!
//! Samples the local eclipse fraction over the whole globe at one instant.
//!
//! The grid has `180·r` rows and `360·r` columns for a resolution of `r` cells per degree.
//! Cell `(i, j)` holds the fraction seen by a sea-level observer at
//!
//! ```text
//! latitude  = i / r − 90      (row 0 is the south pole)
//! longitude = j / r − 180     (column 0 is the antimeridian)
//! ```
//!
//! The sky is evaluated once per instant ([`EphemerisProvider::sky_at`]); each cell only
//! pays for the topocentric correction of its observer.

use itertools::iproduct;
use tracing::debug;

use crate::constants::{Degree, Percent};
use crate::eclipse_errors::EclipseError;
use crate::ephemeris::EphemerisProvider;
use crate::fraction::fraction_on_sky;
use crate::observers::Observer;
use crate::options::RunOptions;
use crate::time::Instant;

/// Geographic position of a grid cell, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCell {
    pub latitude: Degree,
    pub longitude: Degree,
}

impl GeoCell {
    /// Position of cell `(row, col)` on a grid of `resolution` cells per degree.
    pub fn at(row: usize, col: usize, resolution: u32) -> GeoCell {
        let r = resolution as f64;
        GeoCell {
            latitude: row as f64 / r - 90.0,
            longitude: col as f64 / r - 180.0,
        }
    }

    /// Sea-level observer standing on this cell.
    pub fn observer(&self) -> Observer {
        Observer::at_sea_level(self.longitude, self.latitude)
    }
}

/// Row-major grid of eclipse percentages, `rows × cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageGrid {
    resolution: u32,
    rows: usize,
    cols: usize,
    values: Vec<Percent>,
}

impl PercentageGrid {
    /// Wrap row-major `values` into a grid.
    ///
    /// Errors
    /// ------
    /// * [`EclipseError::EmptyGrid`] when a dimension is zero or `values` does not hold
    ///   exactly `rows · cols` entries.
    pub fn from_values(
        resolution: u32,
        rows: usize,
        cols: usize,
        values: Vec<Percent>,
    ) -> Result<PercentageGrid, EclipseError> {
        if rows == 0 || cols == 0 || values.len() != rows * cols {
            return Err(EclipseError::EmptyGrid);
        }
        Ok(PercentageGrid {
            resolution,
            rows,
            cols,
            values,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value of cell `(row, col)`, if inside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Percent> {
        (row < self.rows && col < self.cols).then(|| self.values[row * self.cols + col])
    }

    /// One grid row, south to north.
    pub fn row(&self, row: usize) -> Option<&[Percent]> {
        (row < self.rows).then(|| &self.values[row * self.cols..(row + 1) * self.cols])
    }

    /// All values, row-major.
    pub fn values(&self) -> &[Percent] {
        &self.values
    }

    /// Largest cell value.
    pub fn max(&self) -> Percent {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// `true` when no cell sees any occlusion.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

/// Rasterize the eclipse fraction over the globe at `instant`.
///
/// Arguments
/// ---------
/// * `ephemeris`: Sun/Moon sky geometry source.
/// * `instant`: sampling time.
/// * `options`: grid resolution and annulus policy.
///
/// Return
/// ------
/// * `Ok(Some(grid))` when at least one cell is non-zero, `Ok(None)` otherwise.
///
/// Errors
/// ------
/// * [`EclipseError::InvalidResolution`] for a zero resolution.
/// * any provider error.
pub fn rasterize<E: EphemerisProvider>(
    ephemeris: &E,
    instant: &Instant,
    options: &RunOptions,
) -> Result<Option<PercentageGrid>, EclipseError> {
    options.validate()?;
    let rows = options.grid_rows();
    let cols = options.grid_cols();
    let sky = ephemeris.sky_at(instant)?;

    let values = iproduct!(0..rows, 0..cols)
        .map(|(row, col)| {
            let cell = GeoCell::at(row, col, options.resolution);
            fraction_on_sky(&sky, &cell.observer(), options.annulus)
        })
        .collect::<Result<Vec<Percent>, EclipseError>>()?;

    let grid = PercentageGrid::from_values(options.resolution, rows, cols, values)?;
    if grid.is_blank() {
        debug!("No eclipse visible at {instant}");
        return Ok(None);
    }
    debug!("Eclipse visible at {instant}, peak {:.2}%", grid.max());
    Ok(Some(grid))
}

#[cfg(test)]
mod raster_test {
    use super::*;
    use crate::ephemeris::{SkyDisk, SkySnapshot, SunMoon};
    use crate::options::AnnulusPolicy;
    use hifitime::Epoch;

    /// Moon centred on the Sun for observers south of `latitude`, far away elsewhere.
    struct Hemisphere {
        latitude: Degree,
    }

    impl SkySnapshot for Hemisphere {
        fn observe(&self, observer: &Observer) -> Result<SunMoon, EclipseError> {
            let sun = SkyDisk {
                angular_radius: 960.0,
                altitude: 0.5,
                azimuth: 1.0,
            };
            let offset = if observer.latitude < self.latitude { 0.0 } else { 0.1 };
            Ok(SunMoon {
                sun,
                moon: SkyDisk {
                    angular_radius: 1000.0,
                    altitude: 0.5 + offset,
                    azimuth: 1.0,
                },
            })
        }
    }

    impl EphemerisProvider for Hemisphere {
        type Sky = Hemisphere;

        fn sky_at(&self, _instant: &Instant) -> Result<Hemisphere, EclipseError> {
            Ok(Hemisphere {
                latitude: self.latitude,
            })
        }
    }

    fn instant() -> Instant {
        Epoch::from_gregorian_utc_hms(2017, 8, 21, 18, 0, 0)
    }

    #[test]
    fn test_cell_coordinates() {
        assert_eq!(
            GeoCell::at(0, 0, 1),
            GeoCell {
                latitude: -90.0,
                longitude: -180.0
            }
        );
        assert_eq!(
            GeoCell::at(90, 180, 1),
            GeoCell {
                latitude: 0.0,
                longitude: 0.0
            }
        );
        let cell = GeoCell::at(359, 719, 2);
        assert_eq!(cell.latitude, 89.5);
        assert_eq!(cell.longitude, 179.5);
    }

    #[test]
    fn test_grid_dimensions_and_orientation() {
        let provider = Hemisphere { latitude: 0.0 };
        for resolution in [1, 2] {
            let options = RunOptions {
                resolution,
                ..Default::default()
            };
            let grid = rasterize(&provider, &instant(), &options).unwrap().unwrap();
            assert_eq!(grid.rows(), 180 * resolution as usize);
            assert_eq!(grid.cols(), 360 * resolution as usize);
            assert_eq!(grid.resolution(), resolution);

            // row 0 is the south pole, inside the shadow
            assert_eq!(grid.get(0, 0), Some(100.0));
            assert_eq!(grid.get(grid.rows() - 1, 0), Some(0.0));
            assert_eq!(grid.get(grid.rows(), 0), None);
            assert!(grid.row(0).unwrap().iter().all(|v| *v == 100.0));
        }
    }

    #[test]
    fn test_values_within_bounds() {
        let provider = Hemisphere { latitude: 10.0 };
        let grid = rasterize(&provider, &instant(), &RunOptions::default())
            .unwrap()
            .unwrap();
        assert!(grid.values().iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(grid.max(), 100.0);
    }

    #[test]
    fn test_absent_when_every_cell_is_zero() {
        // Moon everywhere 0.1 rad away from the Sun
        let provider = Hemisphere { latitude: -91.0 };
        let grid = rasterize(&provider, &instant(), &RunOptions::default()).unwrap();
        assert!(grid.is_none());
    }

    #[test]
    fn test_invalid_resolution() {
        let provider = Hemisphere { latitude: 0.0 };
        let options = RunOptions {
            resolution: 0,
            annulus: AnnulusPolicy::Percentage,
            ..Default::default()
        };
        assert_eq!(
            rasterize(&provider, &instant(), &options),
            Err(EclipseError::InvalidResolution(0))
        );
    }

    #[test]
    fn test_grid_from_values() {
        assert_eq!(
            PercentageGrid::from_values(1, 2, 2, vec![0.0; 3]),
            Err(EclipseError::EmptyGrid)
        );
        let grid = PercentageGrid::from_values(1, 2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.row(1), Some(&[2.0, 3.0][..]));
        assert!(!grid.is_blank());
    }
}
