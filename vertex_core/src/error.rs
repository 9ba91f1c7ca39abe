//! Error types for vertex_core operations.
//!
//! Provides a simple error enum with no external dependencies.

use core::fmt;

/// Errors that can occur during lattice generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A geometric or lattice parameter was not strictly positive (or not finite).
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
    },
    /// Disk rasterization kept zero points: the spacing is too coarse
    /// relative to the radius.
    EmptyResult {
        /// Disk radius.
        radius: f64,
        /// Lattice spacing in x.
        dx: f64,
        /// Lattice spacing in y.
        dy: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidParameter { name, value } => {
                write!(f, "{} must be > 0 and finite, got {}", name, value)
            }
            GeometryError::EmptyResult { radius, dx, dy } => {
                write!(
                    f,
                    "no points generated for radius {} at spacing ({}, {}); try smaller dx/dy or a larger radius",
                    radius, dx, dy
                )
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type alias for vertex_core operations.
pub type Result<T> = core::result::Result<T, GeometryError>;
