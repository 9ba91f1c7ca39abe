//! Obstacle descriptors from arrays, arguments, and list files.
//!
//! Two table-shaped sources: a centers array `(N, ≥2)` and a sizes array
//! `(N,)`, `(N,1)`, or `(N, ≥2)` reshape into rectangle descriptors. Disk
//! lists come from repeated `x,y,r` argument strings or from `.json`/`.csv`
//! files. Shape problems are surfaced immediately; nothing is truncated,
//! padded, or coerced.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use vertex_core::{Disk, Point2, Rect};

use crate::error::{Result, VertexIoError};
use crate::npy::NumericArray;

/// Extract `(x, y)` center pairs from a centers array.
///
/// The array rank must be exactly 2 with at least 2 columns; extra columns
/// are ignored.
pub fn centers_from_array(arr: &NumericArray) -> Result<Vec<Point2>> {
    let shape = arr.shape();
    if shape.len() != 2 || shape[1] < 2 {
        return Err(VertexIoError::CentersShape {
            shape: shape.to_vec(),
        });
    }

    let n = shape[0];
    let mut centers = Vec::with_capacity(n);
    for i in 0..n {
        centers.push(Point2::new(arr.get(&[i, 0])?, arr.get(&[i, 1])?));
    }
    Ok(centers)
}

/// Extract `(w, h)` size pairs from a sizes array, given the number of
/// centers `n`.
///
/// Rank 1 of length `n`, or rank 2 with one column, yields isotropic
/// `(v, v)` sizes; rank 2 with ≥2 columns yields `(row[0], row[1])`.
pub fn sizes_from_array(arr: &NumericArray, n: usize) -> Result<Vec<(f64, f64)>> {
    let shape = arr.shape();
    match shape.len() {
        1 => {
            if shape[0] != n {
                return Err(VertexIoError::SizesLength {
                    centers: n,
                    sizes: shape[0],
                });
            }
            (0..n)
                .map(|i| {
                    let v = arr.get(&[i])?;
                    Ok((v, v))
                })
                .collect()
        }
        2 => {
            if shape[0] != n {
                return Err(VertexIoError::SizesLength {
                    centers: n,
                    sizes: shape[0],
                });
            }
            match shape[1] {
                0 => Err(VertexIoError::SizesShape {
                    shape: shape.to_vec(),
                }),
                1 => (0..n)
                    .map(|i| {
                        let v = arr.get(&[i, 0])?;
                        Ok((v, v))
                    })
                    .collect(),
                _ => (0..n)
                    .map(|i| Ok((arr.get(&[i, 0])?, arr.get(&[i, 1])?)))
                    .collect(),
            }
        }
        _ => Err(VertexIoError::SizesShape {
            shape: shape.to_vec(),
        }),
    }
}

/// Reshape a centers array and a sizes array into rectangle descriptors.
///
/// Row order is preserved; size validation (strictly positive width and
/// height) happens per row via `Rect::new`.
pub fn rects_from_arrays(centers: &NumericArray, sizes: &NumericArray) -> Result<Vec<Rect>> {
    let centers = centers_from_array(centers)?;
    let sizes = sizes_from_array(sizes, centers.len())?;

    centers
        .iter()
        .zip(sizes)
        .map(|(c, (w, h))| Rect::new(c.x, c.y, w, h).map_err(Into::into))
        .collect()
}

/// Parse a disk from an `x,y,r` argument string.
pub fn parse_disk_arg(s: &str) -> Result<Disk> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(VertexIoError::Format {
            message: format!("expected 'x,y,r' but got: {:?}", s),
        });
    }

    let parse = |tok: &str| -> Result<f64> {
        tok.parse().map_err(|_| VertexIoError::Format {
            message: format!("bad number {:?} in disk spec {:?}", tok, s),
        })
    };
    Ok(Disk::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?)?)
}

#[derive(Debug, Deserialize)]
struct DiskRecord {
    x: f64,
    y: f64,
    r: f64,
}

/// Load a disk list from a JSON file: a list of `{"x":…, "y":…, "r":…}`
/// objects.
pub fn disks_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Disk>> {
    let text = fs::read_to_string(path)?;
    let records: Vec<DiskRecord> = serde_json::from_str(&text)?;
    records
        .into_iter()
        .map(|rec| Disk::new(rec.x, rec.y, rec.r).map_err(Into::into))
        .collect()
}

/// Load a disk list from a CSV file with a header row naming columns
/// `x`, `y`, `r` (in any order).
pub fn disks_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Disk>> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or_else(|| VertexIoError::Format {
        message: "empty CSV file".to_string(),
    })?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let col = |name: &str| -> Result<usize> {
        columns
            .iter()
            .position(|&c| c == name)
            .ok_or_else(|| VertexIoError::Format {
                message: format!("CSV header missing column {:?}", name),
            })
    };
    let (ix, iy, ir) = (col("x")?, col("y")?, col("r")?);

    let mut disks = Vec::new();
    for (row_idx, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |i: usize| -> Result<f64> {
            fields
                .get(i)
                .and_then(|tok| tok.parse().ok())
                .ok_or_else(|| VertexIoError::Format {
                    message: format!("bad CSV row {}: expected columns x,y,r", row_idx),
                })
        };
        disks.push(Disk::new(field(ix)?, field(iy)?, field(ir)?)?);
    }
    Ok(disks)
}

/// Load a disk list from a `.json` or `.csv` file, dispatching on the
/// extension.
pub fn disks_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Disk>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => disks_from_json(path),
        Some("csv") => disks_from_csv(path),
        _ => Err(VertexIoError::Format {
            message: format!(
                "unsupported disk file type {:?}; use .json or .csv",
                path.display()
            ),
        }),
    }
}
