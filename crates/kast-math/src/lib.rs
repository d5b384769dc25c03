#![warn(missing_docs)]

//! Math types for the kast closet configurator.
//!
//! Thin wrappers around nalgebra for the geometry the configurator deals in:
//! points, vectors, unit directions, and placement transforms. All dimensions
//! are centimeters, all angles in the public API are degrees (matching the
//! parameter tables the assembly layer is written against).

use nalgebra::{Matrix4, Rotation3, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector.
pub type Dir3 = Unit<Vector3<f64>>;

/// Magnitude below which a vector is treated as degenerate.
pub const DEGENERATE_EPS: f64 = 1e-9;

/// True if `v` is too short to carry a direction.
pub fn is_degenerate(v: &Vec3) -> bool {
    v.norm() < DEGENERATE_EPS
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// Returns 0 for degenerate input rather than NaN; callers that must reject
/// degenerate vectors check [`is_degenerate`] first.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < DEGENERATE_EPS {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// A placement transform for a solid: where it sits and how it is turned.
///
/// Internally a 4x4 affine matrix. Placements are built from the small
/// vocabulary the closet layout needs — translation, rotation about a
/// principal axis or an arbitrary axis, and the YZ-plane mirror used for the
/// symmetric halves — and are applied to points, vectors, and face normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    matrix: Matrix4<f64>,
}

impl Location {
    /// The identity placement.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Pure translation to `(x, y, z)`.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vec3::new(x, y, z)),
        }
    }

    /// Pure translation to a point.
    pub fn at_point(p: Point3) -> Self {
        Self::at(p.x, p.y, p.z)
    }

    /// Rotation by `degrees` about `axis` through the origin, then
    /// translation to `position`.
    ///
    /// This is the placement form fastener rows are emitted in: the template
    /// is turned to match the interface normal, then dropped at its spot.
    pub fn axis_angle(position: Point3, axis: Dir3, degrees: f64) -> Self {
        let rot = Rotation3::from_axis_angle(&axis, degrees.to_radians());
        let mut m = rot.to_homogeneous();
        m[(0, 3)] = position.x;
        m[(1, 3)] = position.y;
        m[(2, 3)] = position.z;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `degrees`.
    pub fn rotation_x(degrees: f64) -> Self {
        Self::axis_angle(Point3::origin(), Vec3::x_axis(), degrees)
    }

    /// Rotation about the Y axis by `degrees`.
    pub fn rotation_y(degrees: f64) -> Self {
        Self::axis_angle(Point3::origin(), Vec3::y_axis(), degrees)
    }

    /// Rotation about the Z axis by `degrees`.
    pub fn rotation_z(degrees: f64) -> Self {
        Self::axis_angle(Point3::origin(), Vec3::z_axis(), degrees)
    }

    /// Reflection across the YZ plane (negate X).
    ///
    /// The one non-rigid placement: used to lay out the mirrored half of a
    /// symmetric assembly. Normals stay correct through [`Location::normal`].
    pub fn mirror_x() -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = -1.0;
        Self { matrix: m }
    }

    /// Compose: apply `inner` first, then `self`.
    pub fn then(&self, inner: &Location) -> Self {
        Self {
            matrix: self.matrix * inner.matrix,
        }
    }

    /// Transform a point.
    pub fn point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (rotation/mirror only, no translation).
    pub fn vector(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a surface normal (inverse-transpose of the linear part).
    ///
    /// Agrees with [`Location::vector`] for rigid placements and keeps
    /// outward normals outward under [`Location::mirror_x`].
    pub fn normal(&self, n: &Vec3) -> Vec3 {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0);
        match linear.try_inverse() {
            Some(inv) => inv.transpose() * n,
            None => *n,
        }
    }

    /// Inverse placement, if one exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::identity()
    }
}
