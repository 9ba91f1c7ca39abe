//! Finest-level lattice spacing from IBAMR-style `input2d` files.
//!
//! The configuration is a plain-text `key = value` format with `//`
//! comments. Spacing derivation:
//!
//! - `x_lo` / `x_up` give the domain size,
//! - `domain_boxes` upper indices give the coarse cell counts (falling back
//!   to `(N, N)` when the box pattern is absent),
//! - `MAX_LEVELS` and `REF_RATIO` give the finest-level refinement factor.
//!
//! Values may be simple arithmetic expressions (resolved by
//! [`crate::expr::eval_expr`]); vector components may reference `N`.
//! Matching is a small hand-rolled line scanner, deliberately conservative:
//! a key is recognized only at the start of a line, immediately followed by
//! `=`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use vertex_core::LatticeSpacing;

use crate::error::{Result, VertexIoError};
use crate::expr::eval_expr;

fn strip_comment(s: &str) -> &str {
    match s.find("//") {
        Some(i) => &s[..i],
        None => s,
    }
}

/// The raw right-hand side of the first `name = ...` line, comments and
/// surrounding whitespace removed.
fn find_assignment<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    for line in text.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix(name) else {
            continue;
        };
        // The '=' requirement enforces the name boundary: "Nx = ..." does
        // not match name "N".
        let rest = rest.trim_start();
        if let Some(value) = rest.strip_prefix('=') {
            return Some(value);
        }
    }
    None
}

fn find_scalar(text: &str, name: &str, names: &HashMap<String, f64>) -> Result<f64> {
    let value = find_assignment(text, name).ok_or_else(|| VertexIoError::ConfigKey {
        name: name.to_string(),
    })?;
    eval_expr(strip_comment(value).trim(), names)
}

fn find_vec2(text: &str, name: &str, names: &HashMap<String, f64>) -> Result<(f64, f64)> {
    let value = find_assignment(text, name).ok_or_else(|| VertexIoError::ConfigKey {
        name: name.to_string(),
    })?;

    let mut parts = value.split(',');
    let a = parts.next().unwrap_or("");
    let b = parts.next().ok_or_else(|| VertexIoError::ConfigValue {
        message: format!("'{}' must be a 2-vector 'a, b'", name),
    })?;

    Ok((
        eval_expr(strip_comment(a).trim(), names)?,
        eval_expr(strip_comment(b).trim(), names)?,
    ))
}

/// Extract the coarse upper indices from
/// `domain_boxes = [ (0,0) , (A , B) ]`, evaluating `A` and `B` against
/// `names`. Returns `None` when the pattern is absent or malformed, which
/// callers treat as "fall back to (N, N)".
fn domain_boxes_upper(text: &str, names: &HashMap<String, f64>) -> Option<(i64, i64)> {
    let start = text.find("domain_boxes")?;
    let mut rest = text[start + "domain_boxes".len()..].trim_start();

    rest = rest.strip_prefix('=')?.trim_start();
    rest = rest.strip_prefix('[')?.trim_start();
    rest = rest.strip_prefix('(')?.trim_start();
    rest = rest.strip_prefix('0')?.trim_start();
    rest = rest.strip_prefix(',')?.trim_start();
    rest = rest.strip_prefix('0')?.trim_start();
    rest = rest.strip_prefix(')')?.trim_start();
    rest = rest.strip_prefix(',')?.trim_start();
    rest = rest.strip_prefix('(')?;

    let comma = rest.find(',')?;
    let close = rest.find(')')?;
    if close < comma {
        return None;
    }
    let a_src = strip_comment(&rest[..comma]).trim();
    let b_src = strip_comment(&rest[comma + 1..close]).trim();

    let after = rest[close + 1..].trim_start();
    after.strip_prefix(']')?;

    let a = eval_expr(a_src, names).ok()?;
    let b = eval_expr(b_src, names).ok()?;
    Some((a as i64, b as i64))
}

/// Derive the finest-level lattice spacing from an `input2d` file.
///
/// # Errors
/// Returns `ConfigKey` when a required key (`N`, `MAX_LEVELS`, `REF_RATIO`,
/// `x_lo`, `x_up`) is absent, `Expr`/`ConfigValue` when a value cannot be
/// resolved, and `InvalidParameter` (via `GeometryError`) when the derived
/// spacing is not strictly positive.
pub fn spacing_from_input2d<P: AsRef<Path>>(path: P) -> Result<LatticeSpacing> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    spacing_from_text(&text)
}

fn spacing_from_text(text: &str) -> Result<LatticeSpacing> {
    let no_names = HashMap::new();

    let n = find_scalar(text, "N", &no_names)? as i64;
    let max_levels = find_scalar(text, "MAX_LEVELS", &no_names)? as i64;
    let ref_ratio = find_scalar(text, "REF_RATIO", &no_names)? as i64;

    let mut names = HashMap::new();
    names.insert("N".to_string(), n as f64);

    let (x_lo, y_lo) = find_vec2(text, "x_lo", &names)?;
    let (x_up, y_up) = find_vec2(text, "x_up", &names)?;
    let lx = x_up - x_lo;
    let ly = y_up - y_lo;

    let (nx0, ny0) = domain_boxes_upper(text, &names).unwrap_or((n, n));

    let finest_factor = ref_ratio.pow(max_levels.saturating_sub(1).max(0) as u32);
    let dx = lx / (nx0 * finest_factor) as f64;
    let dy = ly / (ny0 * finest_factor) as f64;

    LatticeSpacing::new(dx, dy).map_err(Into::into)
}
