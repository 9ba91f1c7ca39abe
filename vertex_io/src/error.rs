//! Error types for vertex_io.

use thiserror::Error;

/// Errors that can occur while loading arrays, reshaping obstacle tables,
/// or reading configuration.
#[derive(Error, Debug)]
pub enum VertexIoError {
    /// The file does not start with the container magic bytes.
    #[error("not a .npy file: missing \\x93NUMPY magic")]
    NotNpy,

    /// The container version is not one this loader supports.
    #[error("unsupported .npy version: ({major}, {minor})")]
    UnsupportedVersion {
        /// Major version byte.
        major: u8,
        /// Minor version byte.
        minor: u8,
    },

    /// The header text could not be parsed, or a required key is missing
    /// or ill-typed.
    #[error("bad .npy header: {message}")]
    Header {
        /// Description of the header problem.
        message: String,
    },

    /// The array is stored column-major, which is not supported.
    #[error("Fortran-ordered .npy not supported")]
    FortranOrder,

    /// The dtype descriptor names an unsupported kind, size, or byte order.
    #[error("unsupported dtype descr: {descr:?}")]
    UnsupportedDtype {
        /// The offending descriptor string.
        descr: String,
    },

    /// Fewer payload bytes than the shape and dtype require.
    #[error("truncated .npy data: expected {expected} bytes, got {got}")]
    Truncated {
        /// Bytes required by shape × item size.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// An array index had the wrong arity or was out of range.
    #[error("index error: {message}")]
    Index {
        /// Description of the indexing problem.
        message: String,
    },

    /// Centers array has an unusable shape.
    #[error("centers must have shape (N, 2) (or more columns); got {shape:?}")]
    CentersShape {
        /// The offending shape.
        shape: Vec<usize>,
    },

    /// Sizes array has an unusable shape.
    #[error("unsupported sizes shape {shape:?}; expected (N,), (N,1), or (N,2)")]
    SizesShape {
        /// The offending shape.
        shape: Vec<usize>,
    },

    /// Sizes array length disagrees with the number of centers.
    #[error("sizes length mismatch: centers={centers}, sizes={sizes}")]
    SizesLength {
        /// Number of center rows.
        centers: usize,
        /// Number of size rows.
        sizes: usize,
    },

    /// The restricted expression evaluator rejected an input.
    #[error("expression error at byte {pos}: {message}")]
    Expr {
        /// Description of the problem.
        message: String,
        /// Byte offset into the expression source.
        pos: usize,
    },

    /// A required configuration key was not found.
    #[error("could not find '{name} = ...' in configuration")]
    ConfigKey {
        /// The missing key.
        name: String,
    },

    /// A configuration value was present but unusable.
    #[error("bad configuration value: {message}")]
    ConfigValue {
        /// Description of the problem.
        message: String,
    },

    /// A .vertex file or obstacle list violated its format.
    #[error("bad input: {message}")]
    Format {
        /// Description of the problem.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geometry error from vertex_core.
    #[error("geometry error: {0}")]
    Geometry(#[from] vertex_core::GeometryError),

    /// JSON obstacle list could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for vertex_io operations.
pub type Result<T> = std::result::Result<T, VertexIoError>;
