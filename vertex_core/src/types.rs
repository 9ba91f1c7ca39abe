//! Core value types for lattice generation.
//!
//! Provides the 2D point type, the validated lattice spacing, and the
//! obstacle descriptors (disks and rectangles).

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{GeometryError, Result};

/// A 2D point with named fields for clarity.
///
/// Provides arithmetic operations and conversions to/from arrays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2 {
    /// Create a new Point2.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a Point2 with both components set to the same value.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Squared distance from the origin.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from(a: [f64; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }
}

impl Add for Point2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Div<f64> for Point2 {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        Self {
            x: self.x / s,
            y: self.y / s,
        }
    }
}

impl Neg for Point2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::InvalidParameter { name, value })
    }
}

/// Lattice spacing along each axis (immutable after construction).
///
/// Both components are guaranteed strictly positive and finite; the fields
/// are private so the invariant cannot be bypassed with a struct literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSpacing {
    dx: f64,
    dy: f64,
}

impl LatticeSpacing {
    /// Create a new lattice spacing.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if either component is not strictly
    /// positive and finite.
    pub fn new(dx: f64, dy: f64) -> Result<Self> {
        Ok(Self {
            dx: require_positive("dx", dx)?,
            dy: require_positive("dy", dy)?,
        })
    }

    /// Create a spacing with the same value along both axes.
    pub fn isotropic(d: f64) -> Result<Self> {
        Self::new(d, d)
    }

    /// Spacing between adjacent candidate points in x.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Spacing between adjacent candidate points in y.
    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }
}

/// A filled disk obstacle (cylinder cross-section).
///
/// The radius is validated at construction and kept private; the center
/// coordinates carry no invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    r: f64,
}

impl Disk {
    /// Create a new disk.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the radius is not strictly positive
    /// and finite.
    pub fn new(x: f64, y: f64, r: f64) -> Result<Self> {
        Ok(Self {
            x,
            y,
            r: require_positive("radius", r)?,
        })
    }

    /// Center of the disk.
    #[inline]
    pub const fn center(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Radius, strictly positive.
    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }
}

/// A filled axis-aligned rectangle obstacle.
///
/// Width and height are validated at construction and kept private; the
/// center coordinates carry no invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if width or height is not strictly
    /// positive and finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        Ok(Self {
            x,
            y,
            w: require_positive("width", w)?,
            h: require_positive("height", h)?,
        })
    }

    /// Center of the rectangle.
    #[inline]
    pub const fn center(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Full width, strictly positive.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Full height, strictly positive.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Half of the full width.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * self.w
    }

    /// Half of the full height.
    #[inline]
    pub fn half_height(&self) -> f64 {
        0.5 * self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2_arithmetic() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(3.0, -1.0);

        assert_eq!(a + b, Point2::new(4.0, 1.0));
        assert_eq!(a - b, Point2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point2::new(1.5, -0.5));
        assert_eq!(-a, Point2::new(-1.0, -2.0));
    }

    #[test]
    fn test_point2_length_squared() {
        let p = Point2::new(3.0, 4.0);
        assert!((p.length_squared() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_spacing_validation() {
        assert!(LatticeSpacing::new(0.1, 0.2).is_ok());
        assert!(matches!(
            LatticeSpacing::new(0.0, 0.1),
            Err(GeometryError::InvalidParameter { name: "dx", .. })
        ));
        assert!(matches!(
            LatticeSpacing::new(0.1, -0.5),
            Err(GeometryError::InvalidParameter { name: "dy", .. })
        ));
        assert!(LatticeSpacing::new(f64::NAN, 0.1).is_err());
        assert!(LatticeSpacing::isotropic(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validated_fields_only_via_accessors() {
        // The validated dimensions are reachable only through constructors
        // and read-only accessors, so every live value passed validation.
        let spacing = LatticeSpacing::new(0.1, 0.2).unwrap();
        assert_eq!(spacing.dx(), 0.1);
        assert_eq!(spacing.dy(), 0.2);

        let disk = Disk::new(1.0, 2.0, 0.5).unwrap();
        assert_eq!(disk.r(), 0.5);

        let rect = Rect::new(0.0, 0.0, 3.0, 4.0).unwrap();
        assert_eq!(rect.w(), 3.0);
        assert_eq!(rect.h(), 4.0);
    }

    #[test]
    fn test_disk_validation() {
        assert!(Disk::new(0.0, 0.0, 1.0).is_ok());
        assert!(matches!(
            Disk::new(0.0, 0.0, 0.0),
            Err(GeometryError::InvalidParameter { name: "radius", .. })
        ));
    }

    #[test]
    fn test_rect_validation() {
        let r = Rect::new(1.0, 2.0, 4.0, 6.0).unwrap();
        assert!((r.half_width() - 2.0).abs() < 1e-12);
        assert!((r.half_height() - 3.0).abs() < 1e-12);

        assert!(Rect::new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(Rect::new(0.0, 0.0, 1.0, 0.0).is_err());
    }
}
