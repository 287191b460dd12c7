//! Run configuration shared by the rasterizer, the search driver and the PNG writer.

use camino::Utf8PathBuf;

use crate::constants::{DEFAULT_RESOLUTION, DEFAULT_SEARCH_STEP, DEFAULT_TIME_STEP};
use crate::eclipse_errors::EclipseError;

/// What to report for an observer who sees the whole Moon inside the solar disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AnnulusPolicy {
    /// Occluded share of the solar disk, `(r_moon / r_sun)² · 100`.
    #[default]
    Percentage,
    /// Raw visible ring area `π(r_sun² − r_moon²)` in square arcseconds.
    ///
    /// Not a percentage: values far exceed 100 and saturate the raster.
    RingArea,
}

/// Parameters of one program run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Grid cells per degree of latitude and longitude.
    pub resolution: u32,
    /// Sampling interval inside an eclipse window, in seconds.
    pub time_step: i64,
    /// Coarse step of the feasibility search, in seconds.
    pub search_step: i64,
    /// File-name prefix of the emitted rasters.
    pub prefix: Option<String>,
    /// Directory receiving the rasters; `None` writes next to the prefix.
    pub output_dir: Option<Utf8PathBuf>,
    pub annulus: AnnulusPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            resolution: DEFAULT_RESOLUTION,
            time_step: DEFAULT_TIME_STEP,
            search_step: DEFAULT_SEARCH_STEP,
            prefix: None,
            output_dir: None,
            annulus: AnnulusPolicy::default(),
        }
    }
}

impl RunOptions {
    /// Check the numeric parameters.
    ///
    /// Return
    /// ------
    /// * `Ok(())`, or the first offending value as
    ///   [`EclipseError::InvalidResolution`] / [`EclipseError::InvalidStep`].
    pub fn validate(&self) -> Result<(), EclipseError> {
        if self.resolution == 0 {
            return Err(EclipseError::InvalidResolution(self.resolution));
        }
        if self.time_step <= 0 {
            return Err(EclipseError::InvalidStep(self.time_step));
        }
        if self.search_step <= 0 {
            return Err(EclipseError::InvalidStep(self.search_step));
        }
        Ok(())
    }

    /// Number of grid rows, `180 · resolution`.
    pub fn grid_rows(&self) -> usize {
        180 * self.resolution as usize
    }

    /// Number of grid columns, `360 · resolution`.
    pub fn grid_cols(&self) -> usize {
        360 * self.resolution as usize
    }
}
