//! Evenly spaced fastener rows along the interface between two panels.

use crate::catalog::{dowel, screw, DowelPolicy, ScrewSpec};
use crate::HardwareError;
use kast_math::{angle_between, is_degenerate, Dir3, Location, Point3, Vec3};
use kast_solid::Shape;

/// Two vectors are treated as parallel when |cosine| is within this of 1.
const PARALLEL_EPS: f64 = 1e-10;

/// Screw rows are coarser than dowel rows.
const SCREW_SPACING: f64 = 40.0;
/// Screws start shifted along the row so they clear hinge hardware.
const SCREW_START_OFFSET: f64 = 10.0;

/// The planar interface between two panels, reduced to the data a fastener
/// row needs: a reference point, the row direction, the penetration normal,
/// and the usable length.
///
/// Direction lies in the face plane, the normal out of it; the two are
/// perpendicular by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    /// Reference point, centered between the face's two long edges.
    pub center: Point3,
    /// Unit vector along the face's longest edge.
    pub direction: Vec3,
    /// Unit outward normal of the face.
    pub normal: Vec3,
    /// Length of the longest edge.
    pub length: f64,
}

impl Interface {
    /// Derive the interface from `panel` toward `toward`.
    ///
    /// Selects the face of `panel` whose center is nearest to the center of
    /// `toward` (center-to-center, a deliberate thin-panel approximation, not
    /// a contact solver), then reads direction, normal, and length off that
    /// face's edges.
    pub fn between(panel: &Shape, toward: &Shape) -> Result<Self, HardwareError> {
        let faces = panel.faces();
        let target = toward.center();
        let face = faces
            .into_iter()
            .min_by(|a, b| {
                let da = (a.center - target).norm();
                let db = (b.center - target).norm();
                da.total_cmp(&db)
            })
            .ok_or(HardwareError::NoFaces)?;

        if face.edges.len() < 2 {
            return Err(HardwareError::TooFewEdges(face.edges.len()));
        }

        // Longest edge carries direction and length; the second-longest is
        // its parallel partner. Averaging the two midpoints centers the row
        // better than the face centroid when the loop is irregular.
        let sorted = face.edges_by_length();
        let longest = &sorted[sorted.len() - 1];
        let partner = &sorted[sorted.len() - 2];

        let raw_direction = longest.direction();
        if is_degenerate(&raw_direction) {
            return Err(HardwareError::ZeroLengthEdge);
        }
        if is_degenerate(&face.normal) {
            return Err(HardwareError::DegenerateDirection);
        }

        Ok(Interface {
            center: nalgebra::center(&longest.midpoint(), &partner.midpoint()),
            direction: raw_direction.normalize(),
            normal: face.normal.normalize(),
            length: longest.length(),
        })
    }

    /// Number of fastener positions for a given spacing:
    /// `max(1, floor(length / spacing) - 1)`.
    ///
    /// Under-packs by one relative to the naive count, leaving margin at
    /// both ends of the row.
    pub fn row_count(&self, spacing: f64) -> usize {
        ((self.length / spacing).floor() as i64 - 1).max(1) as usize
    }
}

/// Parameters of a fastener row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSpec {
    /// Distance between adjacent fasteners.
    pub spacing: f64,
    /// Thickness of the panel the fastener bites into.
    pub front_thickness: f64,
    /// Centered penetration (dowels) versus flush placement (screws).
    pub center_aligned: bool,
    /// Extra shift along the row direction, to dodge other hardware.
    pub start_offset: f64,
}

impl Default for RowSpec {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            front_thickness: 1.8,
            center_aligned: true,
            start_offset: 0.0,
        }
    }
}

/// The minimal single-axis rotation carrying world +Z onto `normal`,
/// as `(axis, degrees)` for axis-angle placement.
///
/// Parallel: identity. Antiparallel: 180° about +X. Otherwise the axis is
/// `Ẑ × n̂` and the angle the one between them. This is not a full
/// orientation basis — it is enough only because fastener templates are
/// rotationally symmetric about their own long axis; an asymmetric template
/// would additionally need an in-plane axis aligned.
pub fn rotation_to_interface(normal: &Vec3) -> Result<(Dir3, f64), HardwareError> {
    if is_degenerate(normal) {
        return Err(HardwareError::DegenerateDirection);
    }
    let n = normal.normalize();
    let z = Vec3::z();
    let dot = z.dot(&n);

    if (dot.abs() - 1.0).abs() < PARALLEL_EPS {
        if dot > 0.0 {
            return Ok((Vec3::x_axis(), 0.0));
        }
        return Ok((Vec3::x_axis(), 180.0));
    }

    let axis = Dir3::new_normalize(z.cross(&n));
    let degrees = angle_between(&z, &n).to_degrees();
    Ok((axis, degrees))
}

/// Place an evenly spaced row of fasteners along the interface between
/// `panel_a` and `panel_b`.
///
/// The row is centered on the interface (then shifted by `start_offset`),
/// each instance a fresh copy of `template` rotated so its long axis
/// penetrates perpendicular to the interface face. The inputs are not
/// modified.
pub fn place_fasteners_between(
    panel_a: &Shape,
    panel_b: &Shape,
    template: &Shape,
    fastener_length: f64,
    spec: &RowSpec,
) -> Result<Vec<Shape>, HardwareError> {
    if spec.spacing <= 0.0 {
        return Err(HardwareError::NonPositiveSpacing(spec.spacing));
    }
    if fastener_length <= 0.0 {
        return Err(HardwareError::NonPositiveLength(fastener_length));
    }

    let interface = Interface::between(panel_a, panel_b)?;
    let count = interface.row_count(spec.spacing);
    let total_span = spec.spacing * (count - 1) as f64;

    // Penetration depth: centered rows sink the fastener midpoint about
    // three quarters of the front panel past the interface; flush rows sit
    // at the front panel's far side instead.
    let reference = if spec.center_aligned {
        interface.center
            - interface.normal * (fastener_length / 2.0 - 0.75 * spec.front_thickness)
    } else {
        interface.center + interface.normal * spec.front_thickness
    };

    let (axis, degrees) = rotation_to_interface(&interface.normal)?;

    let start = reference - interface.direction * (total_span / 2.0)
        + interface.direction * spec.start_offset;

    let mut placed = Vec::with_capacity(count);
    for i in 0..count {
        let position = start + interface.direction * (i as f64 * spec.spacing);
        placed.push(template.locate(Location::axis_angle(position, axis, degrees)));
    }
    Ok(placed)
}

/// Dowel row between two panels, size chosen by `policy` from the front
/// panel's thickness.
pub fn place_dowels_between(
    panel_a: &Shape,
    panel_b: &Shape,
    spacing: f64,
    front_thickness: f64,
    policy: &DowelPolicy,
) -> Result<Vec<Shape>, HardwareError> {
    let size = policy.select(front_thickness);
    let spec = RowSpec {
        spacing,
        front_thickness,
        ..RowSpec::default()
    };
    place_fasteners_between(panel_a, panel_b, &dowel(size), size.length(), &spec)
}

/// Countersunk-screw row between two panels: coarse spacing, flush
/// placement, shifted along the row to clear hinge hardware.
pub fn place_screws_between(
    panel_a: &Shape,
    panel_b: &Shape,
    front_thickness: f64,
) -> Result<Vec<Shape>, HardwareError> {
    let spec = RowSpec {
        spacing: SCREW_SPACING,
        front_thickness,
        center_aligned: false,
        start_offset: SCREW_START_OFFSET,
    };
    place_fasteners_between(
        panel_a,
        panel_b,
        &screw(ScrewSpec::M4X35),
        ScrewSpec::M4X35.length,
        &spec,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DowelSize;

    /// The worked example from the design notebook: a side panel laid flat
    /// (rotated 90° about Y, so its +X face looks at the front panel) and a
    /// front panel standing next to it.
    fn side_and_front() -> (Shape, Shape) {
        let side = Shape::cuboid(1.8, 200.0, 20.0)
            .with_label("Side panel")
            .locate(Location::rotation_y(90.0));
        let front = Shape::cuboid(1.8, 200.0, 20.0)
            .with_label("Front panel")
            .locate(Location::at(11.0, 0.0, 9.0));
        (side, front)
    }

    fn position_of(shape: &Shape) -> Point3 {
        shape.location().point(&Point3::origin())
    }

    #[test]
    fn interface_picks_the_facing_side() {
        let (side, front) = side_and_front();
        let interface = Interface::between(&side, &front).unwrap();
        // The rotated side spans x -10..10; its +X face looks at the front.
        assert!((interface.normal - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((interface.length - 200.0).abs() < 1e-9);
        // Direction runs along the 200-long edge.
        assert!(interface.direction.y.abs() > 0.999);
        // Direction and normal are perpendicular and in/out of plane.
        assert!(interface.direction.dot(&interface.normal).abs() < 1e-9);
        // Midline reference point sits on the face center.
        assert!((interface.center - Point3::new(10.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn count_formula() {
        let interface = Interface {
            center: Point3::origin(),
            direction: Vec3::y(),
            normal: Vec3::x(),
            length: 200.0,
        };
        assert_eq!(interface.row_count(20.0), 9);
        let short = Interface {
            length: 15.0,
            ..interface
        };
        assert_eq!(short.row_count(20.0), 1);
    }

    #[test]
    fn row_is_symmetric_about_the_interface_midpoint() {
        let (side, front) = side_and_front();
        let spec = RowSpec {
            spacing: 20.0,
            ..RowSpec::default()
        };
        let dowels =
            place_fasteners_between(&side, &front, &dowel(DowelSize::Eight), 4.0, &spec).unwrap();
        assert_eq!(dowels.len(), 9);

        let positions: Vec<Point3> = dowels.iter().map(position_of).collect();
        let n = positions.len();
        for i in 0..n / 2 {
            let a = positions[i];
            let b = positions[n - 1 - i];
            // Mirror pairs average to the row center.
            let mid = nalgebra::center(&a, &b);
            let center = positions[n / 2];
            assert!((mid - center).norm() < 1e-9);
        }
        // Adjacent spacing is exactly the requested pitch.
        for pair in positions.windows(2) {
            assert!(((pair[1] - pair[0]).norm() - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn centered_penetration_depth() {
        let (side, front) = side_and_front();
        let spec = RowSpec {
            spacing: 20.0,
            front_thickness: 1.8,
            ..RowSpec::default()
        };
        let dowels =
            place_fasteners_between(&side, &front, &dowel(DowelSize::Eight), 4.0, &spec).unwrap();
        // Interface at x=10; dowel center pulled back by len/2 - 0.75*t.
        let expected_x = 10.0 - (4.0 / 2.0 - 0.75 * 1.8);
        for d in &dowels {
            assert!((position_of(d).x - expected_x).abs() < 1e-9);
        }
    }

    #[test]
    fn flush_offset_for_asymmetric_fasteners() {
        let (side, front) = side_and_front();
        let spec = RowSpec {
            spacing: 40.0,
            front_thickness: 1.8,
            center_aligned: false,
            start_offset: 10.0,
        };
        let screws = place_fasteners_between(&side, &front, &screw(ScrewSpec::M4X35), 3.5, &spec)
            .unwrap();
        assert_eq!(screws.len(), 4);
        // Flush: pushed past the interface by the front thickness.
        for s in &screws {
            assert!((position_of(s).x - 11.8).abs() < 1e-9);
        }
        // The whole row is shifted by the start offset along the direction.
        let mean_y: f64 =
            screws.iter().map(|s| position_of(s).y).sum::<f64>() / screws.len() as f64;
        assert!((mean_y.abs() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fasteners_point_through_the_interface() {
        let (side, front) = side_and_front();
        let dowels =
            place_dowels_between(&side, &front, 20.0, 1.8, &DowelPolicy::default()).unwrap();
        // The template's long axis is local +Z; placed, it must align with
        // the +X interface normal.
        for d in &dowels {
            let axis = d.location().vector(&Vec3::z());
            assert!((axis - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn rotation_cases() {
        // Parallel to +Z: identity.
        let (_, deg) = rotation_to_interface(&Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(deg, 0.0);
        // Antiparallel: 180° about +X.
        let (axis, deg) = rotation_to_interface(&Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(deg, 180.0);
        assert!((axis.into_inner() - Vec3::x()).norm() < 1e-12);
        // +X normal: axis Z×X = +Y, 90°.
        let (axis, deg) = rotation_to_interface(&Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((axis.into_inner() - Vec3::y()).norm() < 1e-12);
        assert!((deg - 90.0).abs() < 1e-9);
        // Degenerate input is rejected, not silently zeroed.
        assert!(matches!(
            rotation_to_interface(&Vec3::zeros()),
            Err(HardwareError::DegenerateDirection)
        ));
    }

    #[test]
    fn non_positive_config_is_rejected_before_geometry() {
        let (side, front) = side_and_front();
        let bad_spacing = RowSpec {
            spacing: 0.0,
            ..RowSpec::default()
        };
        assert!(matches!(
            place_fasteners_between(&side, &front, &dowel(DowelSize::Eight), 4.0, &bad_spacing),
            Err(HardwareError::NonPositiveSpacing(_))
        ));
        assert!(matches!(
            place_fasteners_between(
                &side,
                &front,
                &dowel(DowelSize::Eight),
                -1.0,
                &RowSpec::default()
            ),
            Err(HardwareError::NonPositiveLength(_))
        ));
    }

    #[test]
    fn faceless_panel_is_invalid_geometry() {
        let (_, front) = side_and_front();
        let rod = Shape::cylinder(1.0, 50.0);
        assert!(matches!(
            place_fasteners_between(&rod, &front, &dowel(DowelSize::Eight), 4.0, &RowSpec::default()),
            Err(HardwareError::NoFaces)
        ));
    }

    #[test]
    fn degenerate_panel_is_invalid_geometry() {
        let (_, front) = side_and_front();
        let flat = Shape::cuboid(0.0, 0.0, 0.0);
        assert!(matches!(
            place_fasteners_between(&flat, &front, &dowel(DowelSize::Eight), 4.0, &RowSpec::default()),
            Err(HardwareError::ZeroLengthEdge)
        ));
    }

    #[test]
    fn thin_back_panel_gets_the_small_dowel() {
        let (side, front) = side_and_front();
        let dowels = place_dowels_between(&side, &front, 20.0, 1.2, &DowelPolicy::default())
            .unwrap();
        // 6mm dowel template: 0.6 diameter.
        let ext = dowels[0].bounding_box().extents();
        assert!((ext.y - 0.6).abs() < 1e-9);
        assert!((ext.x - 3.0).abs() < 1e-9);
    }

    #[test]
    fn placement_leaves_inputs_untouched() {
        let (side, front) = side_and_front();
        let side_before = side.clone();
        let front_before = front.clone();
        let _ = place_dowels_between(&side, &front, 15.0, 1.8, &DowelPolicy::default()).unwrap();
        assert_eq!(side, side_before);
        assert_eq!(front, front_before);
    }

    #[test]
    fn same_inputs_same_row() {
        let (side, front) = side_and_front();
        let a = place_dowels_between(&side, &front, 15.0, 1.8, &DowelPolicy::default()).unwrap();
        let b = place_dowels_between(&side, &front, 15.0, 1.8, &DowelPolicy::default()).unwrap();
        assert_eq!(a, b);
    }
}
