//! Dtype descriptor parsing and element decoding.
//!
//! Dispatch is an exhaustive match over the closed enumeration of supported
//! `(kind, item size)` pairs per byte order. Anything outside that set is a
//! typed error: silently accepting an unknown dtype would corrupt geometry
//! downstream instead of failing here.

use crate::error::{Result, VertexIoError};

/// Stored byte order of the elements.
///
/// The `|` ("not significant") and `=` ("native") markers both map to
/// little-endian for this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// Numeric type kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeKind {
    /// IEEE 754 floating point (`f`).
    Float,
    /// Signed integer (`i`).
    Int,
    /// Unsigned integer (`u`).
    Uint,
}

/// A validated dtype: byte order, kind, and item size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtype {
    /// Stored byte order.
    pub order: ByteOrder,
    /// Type kind.
    pub kind: DtypeKind,
    /// Item size in bytes.
    pub size: usize,
}

impl Dtype {
    /// Parse a descriptor like `<f8`, `>i4`, or `|u1`.
    ///
    /// Allowed sizes: float 4 or 8; signed/unsigned 1, 2, 4, or 8.
    ///
    /// # Errors
    /// Returns `UnsupportedDtype` for any other marker, kind, or size.
    pub fn parse(descr: &str) -> Result<Self> {
        let unsupported = || VertexIoError::UnsupportedDtype {
            descr: descr.to_string(),
        };

        let mut chars = descr.chars();
        let order = match chars.next() {
            Some('<') | Some('|') | Some('=') => ByteOrder::Little,
            Some('>') => ByteOrder::Big,
            _ => return Err(unsupported()),
        };
        let kind = match chars.next() {
            Some('f') => DtypeKind::Float,
            Some('i') => DtypeKind::Int,
            Some('u') => DtypeKind::Uint,
            _ => return Err(unsupported()),
        };
        let size: usize = chars.as_str().parse().map_err(|_| unsupported())?;

        match (kind, size) {
            (DtypeKind::Float, 4 | 8) => {}
            (DtypeKind::Int | DtypeKind::Uint, 1 | 2 | 4 | 8) => {}
            _ => return Err(unsupported()),
        }

        Ok(Self { order, kind, size })
    }

    /// Decode fixed-width elements to `f64`.
    ///
    /// `raw.len()` must be a multiple of the item size; the loader slices
    /// the payload to the exact required length before calling this.
    /// Integers up to 32 bits convert exactly; 64-bit values beyond the
    /// 53-bit mantissa lose precision.
    pub fn decode(&self, raw: &[u8]) -> Vec<f64> {
        debug_assert_eq!(raw.len() % self.size, 0);

        let le = self.order == ByteOrder::Little;
        raw.chunks_exact(self.size)
            .map(|chunk| match (self.kind, self.size) {
                (DtypeKind::Float, 4) => {
                    let b: [u8; 4] = chunk.try_into().unwrap();
                    f64::from(if le {
                        f32::from_le_bytes(b)
                    } else {
                        f32::from_be_bytes(b)
                    })
                }
                (DtypeKind::Float, 8) => {
                    let b: [u8; 8] = chunk.try_into().unwrap();
                    if le {
                        f64::from_le_bytes(b)
                    } else {
                        f64::from_be_bytes(b)
                    }
                }
                (DtypeKind::Int, 1) => chunk[0] as i8 as f64,
                (DtypeKind::Int, 2) => {
                    let b: [u8; 2] = chunk.try_into().unwrap();
                    f64::from(if le {
                        i16::from_le_bytes(b)
                    } else {
                        i16::from_be_bytes(b)
                    })
                }
                (DtypeKind::Int, 4) => {
                    let b: [u8; 4] = chunk.try_into().unwrap();
                    f64::from(if le {
                        i32::from_le_bytes(b)
                    } else {
                        i32::from_be_bytes(b)
                    })
                }
                (DtypeKind::Int, 8) => {
                    let b: [u8; 8] = chunk.try_into().unwrap();
                    (if le {
                        i64::from_le_bytes(b)
                    } else {
                        i64::from_be_bytes(b)
                    }) as f64
                }
                (DtypeKind::Uint, 1) => f64::from(chunk[0]),
                (DtypeKind::Uint, 2) => {
                    let b: [u8; 2] = chunk.try_into().unwrap();
                    f64::from(if le {
                        u16::from_le_bytes(b)
                    } else {
                        u16::from_be_bytes(b)
                    })
                }
                (DtypeKind::Uint, 4) => {
                    let b: [u8; 4] = chunk.try_into().unwrap();
                    f64::from(if le {
                        u32::from_le_bytes(b)
                    } else {
                        u32::from_be_bytes(b)
                    })
                }
                (DtypeKind::Uint, 8) => {
                    let b: [u8; 8] = chunk.try_into().unwrap();
                    (if le {
                        u64::from_le_bytes(b)
                    } else {
                        u64::from_be_bytes(b)
                    }) as f64
                }
                // Dtype::parse admits no other combination.
                _ => unreachable!("unsupported (kind, size) slipped past parse"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_descrs() {
        for descr in ["<f4", "<f8", ">f4", ">f8", "|u1", "=i4", "<i8", ">u2"] {
            assert!(Dtype::parse(descr).is_ok(), "{} should parse", descr);
        }

        let d = Dtype::parse(">i4").unwrap();
        assert_eq!(d.order, ByteOrder::Big);
        assert_eq!(d.kind, DtypeKind::Int);
        assert_eq!(d.size, 4);

        // '|' and '=' both mean little here.
        assert_eq!(Dtype::parse("|u1").unwrap().order, ByteOrder::Little);
        assert_eq!(Dtype::parse("=f8").unwrap().order, ByteOrder::Little);
    }

    #[test]
    fn test_parse_rejections() {
        for descr in ["", "<", "<f", "<f2", "<f16", "<i3", "<u16", "<c8", "<S8", "!f8", "<fx"] {
            assert!(
                matches!(
                    Dtype::parse(descr),
                    Err(VertexIoError::UnsupportedDtype { .. })
                ),
                "{} should be rejected",
                descr
            );
        }
    }

    #[test]
    fn test_decode_f4_both_orders() {
        let le = Dtype::parse("<f4").unwrap();
        let be = Dtype::parse(">f4").unwrap();

        let v = 1.5f32;
        assert_eq!(le.decode(&v.to_le_bytes()), vec![1.5]);
        assert_eq!(be.decode(&v.to_be_bytes()), vec![1.5]);
    }

    #[test]
    fn test_decode_signed_negative() {
        let d = Dtype::parse("<i2").unwrap();
        let raw: Vec<u8> = (-300i16).to_le_bytes().to_vec();
        assert_eq!(d.decode(&raw), vec![-300.0]);

        let d = Dtype::parse("|i1").unwrap();
        assert_eq!(d.decode(&[0xFF]), vec![-1.0]);
    }

    #[test]
    fn test_decode_unsigned_full_range() {
        let d = Dtype::parse("|u1").unwrap();
        assert_eq!(d.decode(&[0, 255]), vec![0.0, 255.0]);

        let d = Dtype::parse(">u4").unwrap();
        assert_eq!(d.decode(&u32::MAX.to_be_bytes()), vec![u32::MAX as f64]);
    }

    #[test]
    fn test_decode_i8_exact_within_mantissa() {
        let d = Dtype::parse("<i8").unwrap();
        let v = (1i64 << 53) - 1;
        assert_eq!(d.decode(&v.to_le_bytes()), vec![v as f64]);
    }
}
