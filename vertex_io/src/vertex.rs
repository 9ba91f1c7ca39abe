//! The `.vertex` point file format.
//!
//! ```text
//! N
//! x0<TAB>y0
//! x1<TAB>y1
//! ...
//! ```
//!
//! The first line is the decimal point count; each following line is one
//! point with 9 fractional digits, in generation order. The reader also
//! accepts three-column (x y z) rows, keeping the third coordinate, so the
//! plotting tool can project 3D files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use vertex_core::Point2;

use crate::error::{Result, VertexIoError};

/// One row of a `.vertex` file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate, present only in 3D files.
    pub z: Option<f64>,
}

/// Write a `.vertex` stream: count line, then one point per line.
///
/// `count` must equal the number of points the iterator yields; it is
/// written first so consumers can pre-size, which is what allows callers
/// to stream points without buffering them all.
pub fn write_vertex<W: Write, I>(writer: &mut W, count: usize, points: I) -> Result<()>
where
    I: IntoIterator<Item = Point2>,
{
    writeln!(writer, "{}", count)?;
    let mut written = 0usize;
    for p in points {
        writeln!(writer, "{:.9}\t{:.9}", p.x, p.y)?;
        written += 1;
    }
    if written != count {
        return Err(VertexIoError::Format {
            message: format!(
                "point count mismatch: header says {}, wrote {}",
                count, written
            ),
        });
    }
    Ok(())
}

/// Write a `.vertex` file from an in-memory point slice.
pub fn write_vertex_file<P: AsRef<Path>>(path: P, points: &[Point2]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vertex(&mut writer, points.len(), points.iter().copied())?;
    writer.flush()?;
    Ok(())
}

/// Read a `.vertex` stream.
///
/// Blank lines between points are skipped. Fewer rows than the count line
/// promises, or a row with fewer than two columns, is an error.
pub fn read_vertex<R: BufRead>(reader: R) -> Result<Vec<VertexRecord>> {
    let mut lines = reader.lines();

    let first = lines
        .next()
        .transpose()?
        .ok_or_else(|| VertexIoError::Format {
            message: "empty .vertex file".to_string(),
        })?;
    let count: usize = first
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| VertexIoError::Format {
            message: "first line must be an integer point count".to_string(),
        })?;

    let mut records = Vec::with_capacity(count);
    while records.len() < count {
        let line = lines
            .next()
            .transpose()?
            .ok_or_else(|| VertexIoError::Format {
                message: format!(
                    "unexpected EOF while reading points: expected {}, got {}",
                    count,
                    records.len()
                ),
            })?;
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let x = parts.next();
        let y = parts.next();
        let z = parts.next();
        let (Some(x), Some(y)) = (x, y) else {
            return Err(VertexIoError::Format {
                message: format!("bad point line: {:?}", line),
            });
        };

        let parse = |tok: &str| -> Result<f64> {
            tok.parse().map_err(|_| VertexIoError::Format {
                message: format!("bad point line: {:?}", line),
            })
        };
        records.push(VertexRecord {
            x: parse(x)?,
            y: parse(y)?,
            z: z.map(parse).transpose()?,
        });
    }

    Ok(records)
}

/// Read a `.vertex` file from a path.
pub fn read_vertex_file<P: AsRef<Path>>(path: P) -> Result<Vec<VertexRecord>> {
    let file = File::open(path)?;
    read_vertex(BufReader::new(file))
}
