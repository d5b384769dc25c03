//! Planar faces and straight edges of box solids, in world coordinates.

use kast_math::{is_degenerate, Location, Point3, Vec3};

/// A straight edge of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Edge {
    /// Edge length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Midpoint of the edge.
    pub fn midpoint(&self) -> Point3 {
        nalgebra::center(&self.start, &self.end)
    }

    /// End-minus-start vector (not normalized).
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }
}

/// A planar face of a solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Face centroid.
    pub center: Point3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// Boundary edges in loop order (four for a box face).
    pub edges: Vec<Edge>,
}

impl Face {
    /// Edges sorted by ascending length.
    pub fn edges_by_length(&self) -> Vec<Edge> {
        let mut sorted = self.edges.clone();
        sorted.sort_by(|a, b| a.length().total_cmp(&b.length()));
        sorted
    }
}

/// Enumerate the six faces of a box with extents `(dx, dy, dz)` centered at
/// the local origin, placed by `location`.
///
/// One face per axis and sign. Corners are transformed as points, normals
/// through the normal transform so a mirroring placement still reports
/// outward normals.
pub fn box_faces(dx: f64, dy: f64, dz: f64, location: &Location) -> Vec<Face> {
    let half = [dx / 2.0, dy / 2.0, dz / 2.0];
    let mut faces = Vec::with_capacity(6);

    for axis in 0..3 {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        for sign in [-1.0, 1.0] {
            let mut center = [0.0; 3];
            center[axis] = sign * half[axis];

            // Boundary loop: (+u,+v) -> (-u,+v) -> (-u,-v) -> (+u,-v).
            let mut corners = [[0.0; 3]; 4];
            for (i, (su, sv)) in [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)]
                .into_iter()
                .enumerate()
            {
                corners[i][axis] = sign * half[axis];
                corners[i][u] = su * half[u];
                corners[i][v] = sv * half[v];
            }

            let world = |c: [f64; 3]| location.point(&Point3::new(c[0], c[1], c[2]));
            let edges = (0..4)
                .map(|i| Edge {
                    start: world(corners[i]),
                    end: world(corners[(i + 1) % 4]),
                })
                .collect();

            let mut normal_local = Vec3::zeros();
            normal_local[axis] = sign;
            let normal = location.normal(&normal_local);
            let normal = if is_degenerate(&normal) {
                normal
            } else {
                normal.normalize()
            };

            faces.push(Face {
                center: world(center),
                normal,
                edges,
            });
        }
    }

    faces
}
