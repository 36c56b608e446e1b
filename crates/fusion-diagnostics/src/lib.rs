//! Synthetic and optical diagnostics.
//!
//! Optical centroid estimate from the two tomography cameras: weighted
//! detector positions, lines of sight through the pinholes, and their
//! intersection.

pub mod geometry;
pub mod line_of_sight;
pub mod sensors;
pub mod tomography;

pub use geometry::DetectorGeometry;
pub use line_of_sight::LineOfSight;
pub use tomography::{tomo_centroid, TomoCentroid};
