//! # vertex_core
//!
//! Pure 2D lattice geometry for immersed-boundary vertex generation.
//!
//! This crate rasterizes compact obstacle descriptions (disks, rectangles)
//! into explicit point clouds on a regular lattice, the form consumed by
//! immersed-boundary fluid solvers. It has no knowledge of file formats or
//! configuration sources; callers supply already-validated spacings and
//! obstacle descriptors.
//!
//! ## Modules
//!
//! - [`types`]: Core value types (Point2, LatticeSpacing, Disk, Rect)
//! - [`cloud`]: Ordered point-cloud container
//! - [`disk`]: Disk rasterization with optional centroid recentering
//! - [`rect`]: Dense rectangle fill with epsilon-tolerant grid counts
//! - [`error`]: Error types
//!
//! ## Determinism
//!
//! All generators emit points in a fixed nested-iteration order. Output for
//! a given obstacle and spacing is byte-for-byte reproducible; downstream
//! writers rely on this.
//!
//! ## Usage
//!
//! ```
//! use vertex_core::{disk_points, Disk, LatticeSpacing};
//!
//! let disk = Disk::new(0.0, 0.0, 1.0).unwrap();
//! let spacing = LatticeSpacing::isotropic(0.1).unwrap();
//! let cloud = disk_points(&disk, spacing, true).unwrap();
//! assert!(!cloud.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cloud;
pub mod disk;
pub mod error;
pub mod rect;
pub mod types;

pub use cloud::PointCloud;
pub use disk::disk_points;
pub use error::{GeometryError, Result};
pub use rect::{rect_grid_counts, rect_points, rect_points_iter, total_rect_points, GRID_COUNT_EPSILON};
pub use types::{Disk, LatticeSpacing, Point2, Rect};
