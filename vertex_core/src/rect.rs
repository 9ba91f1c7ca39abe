//! Dense rectangle fill on a regular lattice.

use crate::cloud::PointCloud;
use crate::types::{LatticeSpacing, Point2, Rect};

/// Tolerance absorbing floating-point rounding when a side length is an
/// exact multiple of the spacing (e.g. width exactly 10·dx must include
/// both endpoints). A heuristic, not a law.
pub const GRID_COUNT_EPSILON: f64 = 1e-12;

/// Number of lattice points along each axis for a rectangle.
///
/// `nx = floor(2·half_w/dx + ε) + 1` (and likewise for y), floored to a
/// minimum of 1. The resulting grid spans `[-half_w, +half_w]` without ever
/// stepping past the far edge.
pub fn rect_grid_counts(half_w: f64, half_h: f64, spacing: LatticeSpacing) -> (usize, usize) {
    let nx = ((2.0 * half_w) / spacing.dx() + GRID_COUNT_EPSILON).floor() as i64 + 1;
    let ny = ((2.0 * half_h) / spacing.dy() + GRID_COUNT_EPSILON).floor() as i64 + 1;
    (nx.max(1) as usize, ny.max(1) as usize)
}

/// Iterate the dense lattice filling a rectangle.
///
/// Points run from the lower-left corner `(x − w/2, y − h/2)` in steps of
/// the spacing, x index outer, y index inner. The rectangle is filled
/// completely by construction; there is no inclusion test, no recentering,
/// and no empty case.
pub fn rect_points_iter(
    rect: &Rect,
    spacing: LatticeSpacing,
) -> impl Iterator<Item = Point2> {
    let (nx, ny) = rect_grid_counts(rect.half_width(), rect.half_height(), spacing);
    let x0 = rect.x - rect.half_width();
    let y0 = rect.y - rect.half_height();
    let (dx, dy) = (spacing.dx(), spacing.dy());

    (0..nx).flat_map(move |i| {
        let x = x0 + i as f64 * dx;
        (0..ny).map(move |j| Point2::new(x, y0 + j as f64 * dy))
    })
}

/// Rasterize a filled rectangle into a point cloud.
pub fn rect_points(rect: &Rect, spacing: LatticeSpacing) -> PointCloud {
    let (nx, ny) = rect_grid_counts(rect.half_width(), rect.half_height(), spacing);
    let mut cloud = PointCloud::with_capacity(nx * ny);
    for p in rect_points_iter(rect, spacing) {
        cloud.push(p);
    }
    cloud
}

/// Total point count across a sequence of rectangles.
///
/// First pass of the two-pass aggregation: lets a consumer pre-size its
/// output (or write a count header) and then stream the points without
/// buffering every rectangle at once.
pub fn total_rect_points(rects: &[Rect], spacing: LatticeSpacing) -> usize {
    rects
        .iter()
        .map(|r| {
            let (nx, ny) = rect_grid_counts(r.half_width(), r.half_height(), spacing);
            nx * ny
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division_includes_both_endpoints() {
        let spacing = LatticeSpacing::isotropic(0.25).unwrap();
        let (nx, ny) = rect_grid_counts(0.5, 0.5, spacing);
        assert_eq!((nx, ny), (5, 5));
    }

    #[test]
    fn test_unit_square_grid() {
        let rect = Rect::new(2.0, -1.0, 1.0, 1.0).unwrap();
        let spacing = LatticeSpacing::isotropic(0.25).unwrap();

        let cloud = rect_points(&rect, spacing);
        assert_eq!(cloud.len(), 25);

        let (min, max) = cloud.bounding_box().unwrap();
        assert!((min.x - 1.5).abs() < 1e-12);
        assert!((min.y + 1.5).abs() < 1e-12);
        assert!((max.x - 2.5).abs() < 1e-12);
        assert!((max.y + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_inexact_division_stays_inside() {
        // 1.0 / 0.3 = 3.33…, so 4 points per axis, ending at 0.9 < 1.0.
        let spacing = LatticeSpacing::isotropic(0.3).unwrap();
        let (nx, ny) = rect_grid_counts(0.5, 0.5, spacing);
        assert_eq!((nx, ny), (4, 4));

        let rect = Rect::new(0.0, 0.0, 1.0, 1.0).unwrap();
        for p in rect_points_iter(&rect, spacing) {
            assert!(p.x <= 0.5 + 1e-12);
            assert!(p.y <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn test_tiny_rect_yields_single_point() {
        let spacing = LatticeSpacing::isotropic(1.0).unwrap();
        let (nx, ny) = rect_grid_counts(0.01, 0.01, spacing);
        assert_eq!((nx, ny), (1, 1));

        let rect = Rect::new(5.0, 5.0, 0.02, 0.02).unwrap();
        let cloud = rect_points(&rect, spacing);
        assert_eq!(cloud.len(), 1);
        // The single point is the lower-left corner of the rectangle.
        assert!((cloud.points[0].x - 4.99).abs() < 1e-12);
    }

    #[test]
    fn test_order_x_outer_y_inner() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let spacing = LatticeSpacing::isotropic(0.5).unwrap();

        let pts: Vec<Point2> = rect_points_iter(&rect, spacing).collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Point2::new(-0.5, -0.5));
        assert_eq!(pts[1], Point2::new(-0.5, 0.0));
        assert_eq!(pts[2], Point2::new(-0.5, 0.5));
        assert_eq!(pts[3], Point2::new(0.0, -0.5));
        assert_eq!(pts[8], Point2::new(0.5, 0.5));
    }

    #[test]
    fn test_total_matches_streamed_count() {
        let spacing = LatticeSpacing::new(0.03, 0.05).unwrap();
        let rects = vec![
            Rect::new(0.0, 0.0, 1.0, 0.5).unwrap(),
            Rect::new(2.0, 2.0, 0.4, 0.4).unwrap(),
            Rect::new(-1.0, 3.0, 0.07, 2.0).unwrap(),
        ];

        let total = total_rect_points(&rects, spacing);
        let streamed: usize = rects
            .iter()
            .map(|r| rect_points_iter(r, spacing).count())
            .sum();
        assert_eq!(total, streamed);
    }
}
