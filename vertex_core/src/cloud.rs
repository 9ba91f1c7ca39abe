//! Ordered point-cloud container.

use crate::types::Point2;

/// An ordered sequence of 2D points.
///
/// Order is the generation order and is reproducible for a given input and
/// spacing. Points are never deduplicated: overlapping obstacles may produce
/// overlapping points, which is valid output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// The points, in generation order.
    pub points: Vec<Point2>,
}

impl PointCloud {
    /// Create an empty point cloud.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud from points.
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Create an empty cloud with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point.
    pub fn push(&mut self, p: Point2) {
        self.points.push(p);
    }

    /// Append all points from another cloud, preserving order.
    pub fn extend_from(&mut self, other: &PointCloud) {
        self.points.extend_from_slice(&other.points);
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> impl Iterator<Item = &Point2> {
        self.points.iter()
    }

    /// Compute the centroid (arithmetic mean of all points).
    pub fn centroid(&self) -> Option<Point2> {
        if self.points.is_empty() {
            return None;
        }

        let mut sum = Point2::new(0.0, 0.0);
        for p in &self.points {
            sum = sum + *p;
        }

        Some(sum / self.points.len() as f64)
    }

    /// Compute the bounding box as (min, max).
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = self.points[0];
        let mut max = self.points[0];

        for p in &self.points {
            min = min.min(*p);
            max = max.max(*p);
        }

        Some((min, max))
    }

    /// Translate every point by the given offset.
    pub fn translate(&mut self, offset: Point2) {
        for p in &mut self.points {
            *p = *p + offset;
        }
    }

    /// Translate the cloud so its centroid sits at the origin.
    ///
    /// No-op for an empty cloud.
    pub fn center(&mut self) {
        if let Some(centroid) = self.centroid() {
            self.translate(-centroid);
        }
    }
}

impl IntoIterator for PointCloud {
    type Item = Point2;
    type IntoIter = std::vec::IntoIter<Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
