use nalgebra::Point3;

/// An axis-aligned bounding region in Cartesian space.
///
/// Built by enclosing points one at a time, then optionally expanded by a
/// uniform margin on every axis. A region built from a single point is
/// degenerate (zero extent) until expanded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoundingRegion {
    /// Creates a degenerate region containing exactly `point`.
    pub fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the region to contain `point`.
    pub fn enclose(&mut self, point: Point3<f64>) {
        for axis in 0..3 {
            if point[axis] < self.min[axis] {
                self.min[axis] = point[axis];
            }
            if point[axis] > self.max[axis] {
                self.max[axis] = point[axis];
            }
        }
    }

    /// Returns the region expanded by `margin` on every side of every axis.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(
                self.min.x - margin,
                self.min.y - margin,
                self.min.z - margin,
            ),
            max: Point3::new(
                self.max.x + margin,
                self.max.y + margin,
                self.max.z + margin,
            ),
        }
    }

    /// The minimum corner.
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// The maximum corner.
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// The extent along `axis` (0 = x, 1 = y, 2 = z).
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// The geometric center of the region.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `point` lies inside the region (inclusive on all faces).
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}
