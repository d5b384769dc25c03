//! Axis-aligned bounding boxes.

use kast_math::{Point3, Vec3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Bounding box of a set of points. Returns `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Aabb {
            min: first,
            max: first,
        };
        for p in iter {
            bb.expand(p);
        }
        Some(bb)
    }

    /// Grow to include `p`.
    pub fn expand(&mut self, p: Point3) {
        for i in 0..3 {
            if p[i] < self.min[i] {
                self.min[i] = p[i];
            }
            if p[i] > self.max[i] {
                self.max[i] = p[i];
            }
        }
    }

    /// Smallest box containing both operands.
    pub fn union(self, other: Aabb) -> Aabb {
        let mut bb = self;
        bb.expand(other.min);
        bb.expand(other.max);
        bb
    }

    /// Side lengths along X, Y, Z.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Geometric center.
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}
