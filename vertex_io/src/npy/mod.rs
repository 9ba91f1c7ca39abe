//! Minimal `.npy` array container loader.
//!
//! Reads the self-describing binary array format into [`NumericArray`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ MAGIC "\x93NUMPY" (6 bytes)                                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ VERSION (major, minor) (2 bytes)                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │ HEADER_LEN: u16 LE (v1.0) or u32 LE (v2.0 / v3.0)            │
//! ├──────────────────────────────────────────────────────────────┤
//! │ HEADER: dict literal text, Latin-1, HEADER_LEN bytes         │
//! │   {'descr': '<f8', 'fortran_order': False, 'shape': (3, 2)}  │
//! ├──────────────────────────────────────────────────────────────┤
//! │ DATA: product(shape) fixed-width elements, row-major         │
//! │   (trailing padding bytes are tolerated)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Supported dtypes: f4/f8, i1/i2/i4/i8, u1/u2/u4/u8, little- or
//! big-endian. Fortran-ordered (column-major) arrays and object dtypes are
//! rejected. All elements widen to `f64`; 64-bit integers beyond the 53-bit
//! mantissa lose precision, an accepted limitation.

pub mod dtype;
pub mod header;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, VertexIoError};

pub use dtype::{ByteOrder, Dtype, DtypeKind};
pub use header::{read_header, HeaderFields, NPY_MAGIC};

/// An immutable dense, row-major n-dimensional numeric array.
///
/// Elements are stored flat in the same linear order as the file
/// (C-order, last dimension varies fastest).
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl NumericArray {
    /// Create an array from a shape and flat element data.
    ///
    /// # Errors
    /// Returns a `Format` error if `data.len()` does not equal the product
    /// of `shape`.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        // checked: a hostile shape must not wrap around to a small product.
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if expected != Some(data.len()) {
            return Err(VertexIoError::Format {
                message: format!(
                    "element count {} does not match shape {:?}",
                    data.len(),
                    shape,
                ),
            });
        }
        Ok(Self { shape, data })
    }

    /// The array shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat element data, in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Look up an element by an n-tuple of indices, one per dimension.
    ///
    /// Uses standard row-major strides (last dimension fastest).
    ///
    /// # Errors
    /// Returns an `Index` error for wrong arity or an out-of-range index.
    pub fn get(&self, idx: &[usize]) -> Result<f64> {
        if idx.len() != self.shape.len() {
            return Err(VertexIoError::Index {
                message: format!(
                    "index dimensionality mismatch: array has {} dims, got {} indices",
                    self.shape.len(),
                    idx.len()
                ),
            });
        }

        let mut flat = 0usize;
        let mut stride = 1usize;
        for (&size, &i) in self.shape.iter().rev().zip(idx.iter().rev()) {
            if i >= size {
                return Err(VertexIoError::Index {
                    message: format!("index {} out of bounds for dimension of size {}", i, size),
                });
            }
            flat += i * stride;
            stride *= size;
        }
        Ok(self.data[flat])
    }
}

/// Read a `.npy` array from a reader.
///
/// Validates the format at every stage and never silently reinterprets
/// bytes: an unsupported dtype or layout is a typed error, not a guess.
/// Bytes past the required payload length are ignored (trailing padding).
pub fn read_npy<R: Read>(reader: &mut R) -> Result<NumericArray> {
    let fields = read_header(reader)?;

    if fields.fortran_order {
        return Err(VertexIoError::FortranOrder);
    }

    let dtype = Dtype::parse(&fields.descr)?;

    // An empty shape means exactly one scalar element; it surfaces with
    // shape [1] so product(shape) == len stays trivially true.
    let shape = if fields.shape.is_empty() {
        vec![1]
    } else {
        fields.shape
    };
    let count = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| VertexIoError::Header {
            message: format!("shape {:?}: element count overflows usize", shape),
        })?;
    let needed = count
        .checked_mul(dtype.size)
        .ok_or_else(|| VertexIoError::Header {
            message: format!("shape {:?}: payload byte count overflows usize", shape),
        })?;

    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    if raw.len() < needed {
        return Err(VertexIoError::Truncated {
            expected: needed,
            got: raw.len(),
        });
    }

    let data = dtype.decode(&raw[..needed]);
    NumericArray::new(shape, data)
}

/// Load a `.npy` array from a file path.
///
/// The file handle is released on every exit path, including parse failure.
pub fn load_npy<P: AsRef<Path>>(path: P) -> Result<NumericArray> {
    let mut file = File::open(path)?;
    read_npy(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Build a v1.0 .npy byte image from a header string and raw payload.
    fn npy_bytes(header: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&NPY_MAGIC);
        out.push(1);
        out.push(0);
        out.extend_from_slice(&(header.len() as u16).to_le_bytes());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn f8_payload(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_load_f8_2d() {
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (2, 3), }",
            &f8_payload(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        );
        let arr = read_npy(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(arr.get(&[1, 2]).unwrap(), 6.0);
        // Row-major: element (1, 0) follows the full first row.
        assert_eq!(arr.get(&[1, 0]).unwrap(), 4.0);
    }

    #[test]
    fn test_scalar_surfaces_as_shape_1() {
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (), }",
            &f8_payload(&[42.5]),
        );
        let arr = read_npy(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(arr.shape(), &[1]);
        assert_eq!(arr.get(&[0]).unwrap(), 42.5);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut payload = f8_payload(&[7.0]);
        payload.extend_from_slice(&[0xAA; 16]);
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (1,), }",
            &payload,
        );
        let arr = read_npy(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(arr.data(), &[7.0]);
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (3,), }",
            &f8_payload(&[1.0, 2.0]),
        );
        let result = read_npy(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(VertexIoError::Truncated {
                expected: 24,
                got: 16
            })
        ));
    }

    #[test]
    fn test_fortran_order_rejected() {
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': True, 'shape': (2, 2), }",
            &f8_payload(&[1.0, 2.0, 3.0, 4.0]),
        );
        assert!(matches!(
            read_npy(&mut Cursor::new(bytes)),
            Err(VertexIoError::FortranOrder)
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (1,), }",
            &f8_payload(&[0.0]),
        );
        bytes[0] = b'X';
        assert!(matches!(
            read_npy(&mut Cursor::new(bytes)),
            Err(VertexIoError::NotNpy)
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (1,), }",
            &f8_payload(&[0.0]),
        );
        bytes[6] = 9;
        assert!(matches!(
            read_npy(&mut Cursor::new(bytes)),
            Err(VertexIoError::UnsupportedVersion { major: 9, minor: 0 })
        ));
    }

    #[test]
    fn test_index_errors() {
        let arr = NumericArray::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(matches!(
            arr.get(&[0]),
            Err(VertexIoError::Index { .. })
        ));
        assert!(matches!(
            arr.get(&[0, 5]),
            Err(VertexIoError::Index { .. })
        ));
    }

    #[test]
    fn test_new_rejects_mismatched_length() {
        assert!(NumericArray::new(vec![2, 2], vec![1.0]).is_err());
    }

    #[test]
    fn test_zero_size_dimension() {
        let bytes = npy_bytes(
            "{'descr': '<f8', 'fortran_order': False, 'shape': (0, 3), }",
            &[],
        );
        let arr = read_npy(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(arr.shape(), &[0, 3]);
        assert!(arr.is_empty());
    }
}
