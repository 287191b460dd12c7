pub mod constants;
pub mod earth_orientation;
pub mod eclipse_errors;
pub mod ephemeris;
pub mod feasibility;
pub mod fraction;
pub mod geometry;
pub mod image_writer;
pub mod observers;
pub mod options;
pub mod raster;
mod ref_system;
pub mod search;
pub mod time;
