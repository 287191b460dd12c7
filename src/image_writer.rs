//! # Grayscale PNG output
//!
//! Each populated grid becomes an 8-bit grayscale PNG, one pixel per cell:
//! width = columns (longitude), height = rows (latitude), pixel row `i` = grid row `i`.
//! A cell value `v` maps to `round(v · 2.55)`, so 100 % is white and 0 % is black.
//!
//! Files are named `<prefix>-<index>.png`, or `<index>.png` without a prefix, inside the
//! optional output directory. Missing parent directories are created.

use camino::{Utf8Path, Utf8PathBuf};
use image::{GrayImage, ImageFormat};
use tracing::debug;

use crate::constants::{Percent, PERCENT_TO_INTENSITY};
use crate::eclipse_errors::EclipseError;
use crate::options::RunOptions;
use crate::raster::PercentageGrid;
use crate::search::GridSink;
use crate::time::Instant;

/// Map a percentage to an 8-bit intensity, saturating outside [0, 100].
pub fn intensity(value: Percent) -> u8 {
    (value * PERCENT_TO_INTENSITY).round().clamp(0.0, 255.0) as u8
}

/// Convert a grid into a grayscale image of the same dimensions.
pub fn grid_to_image(grid: &PercentageGrid) -> Result<GrayImage, EclipseError> {
    let pixels: Vec<u8> = grid.values().iter().copied().map(intensity).collect();
    let width = u32::try_from(grid.cols()).map_err(|_| EclipseError::EmptyGrid)?;
    let height = u32::try_from(grid.rows()).map_err(|_| EclipseError::EmptyGrid)?;
    GrayImage::from_raw(width, height, pixels).ok_or(EclipseError::EmptyGrid)
}

/// Writes grids as numbered PNG files.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PngWriter {
    output_dir: Option<Utf8PathBuf>,
    prefix: Option<String>,
    written: Vec<Utf8PathBuf>,
}

impl PngWriter {
    pub fn new(output_dir: Option<Utf8PathBuf>, prefix: Option<String>) -> Self {
        PngWriter {
            output_dir,
            prefix,
            written: Vec::new(),
        }
    }

    /// Writer configured from the run options.
    pub fn from_options(options: &RunOptions) -> Self {
        PngWriter::new(options.output_dir.clone(), options.prefix.clone())
    }

    /// File name for grid `index`, without the output directory.
    pub fn file_name(&self, index: u32) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}-{index}.png"),
            _ => format!("{index}.png"),
        }
    }

    /// Full path for grid `index`.
    pub fn file_path(&self, index: u32) -> Utf8PathBuf {
        let name = self.file_name(index);
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => Utf8PathBuf::from(name),
        }
    }

    /// Paths written so far, in emission order.
    pub fn written(&self) -> &[Utf8PathBuf] {
        &self.written
    }

    /// Encode `grid` as the PNG for `index`.
    ///
    /// Errors
    /// ------
    /// * [`EclipseError::EmptyGrid`] if the grid cannot form an image.
    /// * [`EclipseError::IoError`] if the parent directory cannot be created.
    /// * [`EclipseError::ImageError`] if encoding or writing fails.
    pub fn write(
        &mut self,
        grid: &PercentageGrid,
        index: u32,
    ) -> Result<Utf8PathBuf, EclipseError> {
        let path = self.file_path(index);
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        debug!("Writing file {path}");
        grid_to_image(grid)?.save_with_format(&path, ImageFormat::Png)?;
        self.written.push(path.clone());
        Ok(path)
    }
}

impl GridSink for PngWriter {
    fn emit(
        &mut self,
        grid: &PercentageGrid,
        index: u32,
        _instant: &Instant,
    ) -> Result<(), EclipseError> {
        self.write(grid, index).map(|_| ())
    }
}

/// Decode a PNG back into rows of intensities.
pub fn read_intensities(path: &Utf8Path) -> Result<Vec<Vec<u8>>, EclipseError> {
    let image = image::open(path)?.to_luma8();
    let width = image.width() as usize;
    if width == 0 {
        return Err(EclipseError::EmptyGrid);
    }
    Ok(image
        .as_raw()
        .chunks(width)
        .map(|row| row.to_vec())
        .collect())
}

#[cfg(test)]
mod image_writer_test {
    use super::*;

    fn grid() -> PercentageGrid {
        PercentageGrid::from_values(1, 2, 3, vec![0.0, 50.0, 100.0, 0.2, 99.9, 12.5]).unwrap()
    }

    #[test]
    fn test_intensity_mapping() {
        assert_eq!(intensity(0.0), 0);
        assert_eq!(intensity(100.0), 255);
        assert_eq!(intensity(50.0), 128);
        assert_eq!(intensity(0.2), 1);
        assert_eq!(intensity(12.5), 32);
        // legacy ring areas saturate
        assert_eq!(intensity(400_000.0), 255);
        assert_eq!(intensity(-3.0), 0);
    }

    #[test]
    fn test_file_names() {
        let writer = PngWriter::new(None, Some("eclipse".into()));
        assert_eq!(writer.file_name(1), "eclipse-1.png");
        assert_eq!(writer.file_path(12), Utf8PathBuf::from("eclipse-12.png"));

        let writer = PngWriter::new(Some(Utf8PathBuf::from("out")), None);
        assert_eq!(writer.file_name(3), "3.png");
        assert_eq!(writer.file_path(3), Utf8PathBuf::from("out/3.png"));

        let writer = PngWriter::new(None, Some(String::new()));
        assert_eq!(writer.file_name(7), "7.png");
    }

    #[test]
    fn test_image_layout() {
        let image = grid_to_image(&grid()).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 0).0, [255]);
        assert_eq!(image.get_pixel(0, 1).0, [1]);
    }

    #[test]
    fn test_write_and_read_back() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(tmp.path().join("nested/maps")).unwrap();
        let mut writer = PngWriter::new(Some(dir.clone()), Some("run".into()));

        let path = writer.write(&grid(), 4).unwrap();
        assert_eq!(path, dir.join("run-4.png"));
        assert_eq!(writer.written(), &[path.clone()]);

        let rows = read_intensities(&path).unwrap();
        assert_eq!(rows, vec![vec![0, 128, 255], vec![1, 255, 32]]);
    }

    #[test]
    fn test_write_under_a_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = Utf8PathBuf::from_path_buf(tmp.path().join("blocker")).unwrap();
        std::fs::write(&blocker, b"not a directory").unwrap();
        let mut writer = PngWriter::new(Some(blocker.join("maps")), None);

        let result = writer.write(&grid(), 1);

        assert!(matches!(result, Err(EclipseError::IoError(_))), "got {result:?}");
        assert!(writer.written().is_empty());
    }
}
