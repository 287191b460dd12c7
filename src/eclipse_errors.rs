use thiserror::Error;

#[derive(Error, Debug)]
pub enum EclipseError {
    #[error("Invalid date format (expected Y-M-D-H-M-S): {0}")]
    InvalidDateFormat(String),

    #[error("Invalid date component: {0}")]
    InvalidDateComponent(String),

    #[error("Invalid grid resolution: {0} (must be at least 1 cell per degree)")]
    InvalidResolution(u32),

    #[error("Invalid time step: {0} s (must be strictly positive)")]
    InvalidStep(i64),

    #[error("Invalid time range: end {end} is not after start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Cannot write an empty percentage grid")]
    EmptyGrid,

    #[error("Ephemeris provider failure: {0}")]
    Ephemeris(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Raster encoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl PartialEq for EclipseError {
    fn eq(&self, other: &Self) -> bool {
        use EclipseError::*;
        match (self, other) {
            (InvalidDateFormat(a), InvalidDateFormat(b)) => a == b,
            (InvalidDateComponent(a), InvalidDateComponent(b)) => a == b,
            (InvalidResolution(a), InvalidResolution(b)) => a == b,
            (InvalidStep(a), InvalidStep(b)) => a == b,
            (
                InvalidRange {
                    start: s1,
                    end: e1,
                },
                InvalidRange {
                    start: s2,
                    end: e2,
                },
            ) => s1 == s2 && e1 == e2,
            (Ephemeris(a), Ephemeris(b)) => a == b,

            // not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (ImageError(_), ImageError(_)) => true,

            (EmptyGrid, EmptyGrid) => true,

            _ => false,
        }
    }
}
