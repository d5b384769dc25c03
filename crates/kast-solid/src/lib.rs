#![warn(missing_docs)]

//! Placed solids and the assembly tree for the kast closet configurator.
//!
//! A [`Shape`] is a solid with a placement: a box panel, a cylinder, a fused
//! compound of primitives, or an imported profile. Shapes are immutable once
//! placed — repositioning produces an independent copy, so several instances
//! derived from one template never observe each other's placements.
//!
//! Assemblies are trees of [`Node`]s: groups of children or leaf shapes.

use kast_math::{Location, Point3, Vec3};

mod aabb;
mod face;
mod node;

pub use aabb::Aabb;
pub use face::{box_faces, Edge, Face};
pub use node::Node;

/// The geometry of a shape, before placement.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rectangular solid with extents `(dx, dy, dz)`, centered at the origin.
    Cuboid {
        /// Extent along local X.
        dx: f64,
        /// Extent along local Y.
        dy: f64,
        /// Extent along local Z.
        dz: f64,
    },
    /// Cylinder along the local Z axis, centered at the origin.
    Cylinder {
        /// Cylinder radius.
        radius: f64,
        /// Cylinder length.
        length: f64,
    },
    /// Union of already-placed child shapes (multi-primitive templates such
    /// as a hanging bar). Only the combined bounding box is observed here.
    Fused(Vec<Shape>),
    /// An imported hardware cross-section (e.g. a rail profile). Read-only
    /// input geometry: only its extents are known, never its internals.
    Profile {
        /// Name of the external asset the profile came from.
        source: String,
        /// Overall extents of the profile, centered at the origin.
        size: Vec3,
    },
}

/// A solid with a placement and an optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    location: Location,
    label: Option<String>,
}

impl Shape {
    /// A box panel with extents `(dx, dy, dz)` centered at the origin.
    pub fn cuboid(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            kind: ShapeKind::Cuboid { dx, dy, dz },
            location: Location::identity(),
            label: None,
        }
    }

    /// A cylinder along Z with the given radius and length, centered.
    pub fn cylinder(radius: f64, length: f64) -> Self {
        Self {
            kind: ShapeKind::Cylinder { radius, length },
            location: Location::identity(),
            label: None,
        }
    }

    /// A union of already-placed shapes.
    pub fn fused(children: Vec<Shape>) -> Self {
        Self {
            kind: ShapeKind::Fused(children),
            location: Location::identity(),
            label: None,
        }
    }

    /// An imported profile with known extents.
    pub fn profile(source: impl Into<String>, size: Vec3) -> Self {
        Self {
            kind: ShapeKind::Profile {
                source: source.into(),
                size,
            },
            location: Location::identity(),
            label: None,
        }
    }

    /// Attach a human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The geometry of this shape.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The placement of this shape.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// An independent copy placed at `location` (the previous placement is
    /// discarded, as when stamping instances from a template).
    pub fn locate(&self, location: Location) -> Self {
        Self {
            kind: self.kind.clone(),
            location,
            label: self.label.clone(),
        }
    }

    /// An independent copy with `outer` applied on top of the current
    /// placement (used to move or mirror an already-placed shape).
    pub fn transformed(&self, outer: &Location) -> Self {
        Self {
            kind: self.kind.clone(),
            location: outer.then(&self.location),
            label: self.label.clone(),
        }
    }

    /// World-space bounding box.
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box_under(&Location::identity())
    }

    fn bounding_box_under(&self, outer: &Location) -> Aabb {
        let world = outer.then(&self.location);
        let local_box = |ex: f64, ey: f64, ez: f64| {
            let (hx, hy, hz) = (ex / 2.0, ey / 2.0, ez / 2.0);
            let first = world.point(&Point3::new(-hx, -hy, -hz));
            let mut bb = Aabb {
                min: first,
                max: first,
            };
            for i in 1..8 {
                let sx = if i & 1 == 0 { -hx } else { hx };
                let sy = if i & 2 == 0 { -hy } else { hy };
                let sz = if i & 4 == 0 { -hz } else { hz };
                bb.expand(world.point(&Point3::new(sx, sy, sz)));
            }
            bb
        };

        match &self.kind {
            ShapeKind::Cuboid { dx, dy, dz } => local_box(*dx, *dy, *dz),
            ShapeKind::Cylinder { radius, length } => {
                local_box(2.0 * radius, 2.0 * radius, *length)
            }
            ShapeKind::Profile { size, .. } => local_box(size.x, size.y, size.z),
            ShapeKind::Fused(children) => children
                .iter()
                .map(|c| c.bounding_box_under(&world))
                .reduce(Aabb::union)
                .unwrap_or_else(|| {
                    let origin = world.point(&Point3::origin());
                    Aabb {
                        min: origin,
                        max: origin,
                    }
                }),
        }
    }

    /// Center of the world-space bounding box.
    pub fn center(&self) -> Point3 {
        self.bounding_box().center()
    }

    /// The planar faces of this shape in world space.
    ///
    /// Only box panels have faces; every other kind yields an empty set.
    pub fn faces(&self) -> Vec<Face> {
        match &self.kind {
            ShapeKind::Cuboid { dx, dy, dz } => box_faces(*dx, *dy, *dz, &self.location),
            _ => Vec::new(),
        }
    }
}
