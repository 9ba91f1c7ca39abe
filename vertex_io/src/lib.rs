//! # vertex_io
//!
//! Array container loading, obstacle tables, and `.vertex` I/O for
//! immersed-boundary geometry preparation.
//!
//! This crate provides the data sources and sinks around [`vertex_core`]:
//!
//! - [`npy`]: minimal loader for the self-describing `.npy` binary array
//!   container (numeric dtypes only, C-order only)
//! - [`obstacles`]: reshaping of centers/sizes arrays into obstacle
//!   descriptors, plus disk lists from arguments, JSON, or CSV
//! - [`vertex`]: the `.vertex` point file format (count line, then
//!   tab-separated coordinates)
//! - [`expr`]: a restricted arithmetic expression evaluator with a closed
//!   grammar, used to resolve numeric expressions in configuration values
//! - [`input2d`]: finest-level lattice spacing extraction from IBAMR-style
//!   `input2d` configuration files
//! - [`error`]: error types
//!
//! All operations fail fast: malformed containers, mismatched table shapes,
//! and unsupported features surface as typed errors with enough context to
//! diagnose, never as silently coerced data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod expr;
pub mod input2d;
pub mod npy;
pub mod obstacles;
pub mod vertex;

pub use error::{Result, VertexIoError};
pub use expr::eval_expr;
pub use input2d::spacing_from_input2d;
pub use npy::{load_npy, read_npy, NumericArray};
pub use obstacles::{
    centers_from_array, disks_from_csv, disks_from_file, disks_from_json, parse_disk_arg,
    rects_from_arrays, sizes_from_array,
};
pub use vertex::{read_vertex, read_vertex_file, write_vertex, write_vertex_file, VertexRecord};
