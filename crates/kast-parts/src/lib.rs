#![warn(missing_docs)]

//! Cut-list extraction for the kast closet configurator.
//!
//! Walks an assembled scene, keeps the leaves whose bounding-box thickness
//! matches one of the configured sheet thicknesses, normalizes them to
//! orientation-independent panel dimensions, and groups equal panels into a
//! counted, sorted bill of materials.
//!
//! Design dimensions are centimeters; the report is printed in millimeters.

use kast_solid::{Node, Shape};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Conversion from design units (cm) to report units (mm).
const MM_PER_UNIT: f64 = 10.0;

/// Absolute tolerance, in mm, for thickness matching and panel grouping.
const DIMENSION_TOL_MM: f64 = 0.1;

/// The sheet thicknesses that count as wood stock, in design units (cm).
///
/// Leaves whose smallest extent matches none of these are hardware,
/// fasteners, or imported rail geometry and stay out of the cut list.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStock {
    thicknesses: Vec<f64>,
}

impl PanelStock {
    /// Build the allow-list from the configured sheet thicknesses.
    pub fn new(thicknesses: impl IntoIterator<Item = f64>) -> Self {
        Self {
            thicknesses: thicknesses.into_iter().collect(),
        }
    }

    /// Whether a candidate thickness (already in mm) matches any stock
    /// thickness. Both sides of the comparison live in mm, so the 0.1
    /// tolerance is applied in a single unit space.
    pub fn matches_mm(&self, candidate_mm: f64) -> bool {
        self.thicknesses
            .iter()
            .any(|t| (candidate_mm - t * MM_PER_UNIT).abs() < DIMENSION_TOL_MM)
    }
}

/// A flat wooden panel, normalized: `thickness` is the smallest bounding-box
/// extent, `width` the smaller and `height` the larger of the other two.
/// All in mm, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WoodPart {
    /// Panel width in mm.
    pub width: f64,
    /// Panel height in mm.
    pub height: f64,
    /// Sheet thickness in mm.
    pub thickness: f64,
}

/// Exact grouping key: dimensions quantized to tenths of a mm.
///
/// Quantizing to the same grid the 0.1 tolerance lives on makes grouping,
/// hashing, and ordering agree by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct PartKey {
    thickness: i64,
    width: i64,
    height: i64,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl WoodPart {
    /// Normalize a leaf's sorted extents `(smallest, mid, largest)` in mm.
    fn new(width: f64, height: f64, thickness: f64) -> Self {
        Self {
            width: round1(width.min(height)),
            height: round1(width.max(height)),
            thickness: round1(thickness),
        }
    }

    fn key(&self) -> PartKey {
        PartKey {
            thickness: (self.thickness * 10.0).round() as i64,
            width: (self.width * 10.0).round() as i64,
            height: (self.height * 10.0).round() as i64,
        }
    }
}

/// One line of the cut list: a unique panel, how many are needed, and the
/// labels that contributed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutListEntry {
    /// The normalized panel dimensions.
    pub part: WoodPart,
    /// Number of identical panels.
    pub count: usize,
    /// Distinct non-empty labels, in first-occurrence order.
    pub labels: Vec<String>,
}

/// The deduplicated, sorted bill of wooden parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutList {
    /// Entries, most-needed first.
    pub entries: Vec<CutListEntry>,
}

impl CutList {
    /// True when no leaf matched the stock.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of panels across all entries.
    pub fn panel_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Extract the cut list from an assembled scene.
///
/// Flattens the tree (a group concatenates its children, a leaf contributes
/// its bounding box), classifies each leaf by its smallest extent against
/// the stock allow-list, groups accepted panels by quantized dimensions, and
/// sorts by descending count, then ascending thickness, width, height.
///
/// Never fails on a well-formed tree: leaves that match nothing are simply
/// not wood stock, and an empty result is an empty report.
pub fn extract_wood_parts(root: &Node, stock: &PanelStock) -> CutList {
    let mut parts = Vec::new();
    flatten(root, stock, &mut parts);

    let mut groups: HashMap<PartKey, CutListEntry> = HashMap::new();
    for (part, label) in parts {
        let entry = groups.entry(part.key()).or_insert_with(|| CutListEntry {
            part,
            count: 0,
            labels: Vec::new(),
        });
        entry.count += 1;
        if let Some(label) = label {
            if !label.is_empty() && !entry.labels.iter().any(|l| l == &label) {
                entry.labels.push(label);
            }
        }
    }

    let mut entries: Vec<CutListEntry> = groups.into_values().collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.part.key().cmp(&b.part.key()))
    });

    CutList { entries }
}

fn flatten(node: &Node, stock: &PanelStock, out: &mut Vec<(WoodPart, Option<String>)>) {
    match node {
        Node::Group { children, .. } => {
            for child in children {
                flatten(child, stock, out);
            }
        }
        Node::Leaf(shape) => {
            if let Some(part) = classify(shape, stock) {
                out.push((part, shape.label().map(str::to_string)));
            }
        }
    }
}

/// Classify a leaf: its smallest bounding-box extent is the candidate
/// thickness; the leaf is wood stock only if that candidate matches the
/// allow-list.
fn classify(shape: &Shape, stock: &PanelStock) -> Option<WoodPart> {
    let ext = shape.bounding_box().extents();
    let mut dims = [
        ext.x * MM_PER_UNIT,
        ext.y * MM_PER_UNIT,
        ext.z * MM_PER_UNIT,
    ];
    dims.sort_by(f64::total_cmp);

    if !stock.matches_mm(dims[0]) {
        return None;
    }
    Some(WoodPart::new(dims[1], dims[2], dims[0]))
}

impl fmt::Display for CutList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wood parts list (dimensions in mm):")?;
        writeln!(f, "------------------------------------")?;

        // Pad every dimension column to the widest entry; an empty report
        // has no widest entry, hence the fallback.
        let dims_width = self
            .entries
            .iter()
            .map(|e| format!("{:.1}x{:.1}", e.part.width, e.part.height).len())
            .max()
            .unwrap_or(0);

        for entry in &self.entries {
            let dims = format!("{:.1}x{:.1}", entry.part.width, entry.part.height);
            writeln!(
                f,
                "{:>2} * {:<dims_width$} (thickness: {:.1}mm) - {}",
                entry.count,
                dims,
                entry.part.thickness,
                entry.labels.join(", "),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kast_math::Location;
    use kast_solid::Shape;

    fn leaf(label: &str, dx: f64, dy: f64, dz: f64) -> Node {
        Shape::cuboid(dx, dy, dz).with_label(label).into()
    }

    fn stock() -> PanelStock {
        // Primary sheet, back panel, sub-closet back (cm).
        PanelStock::new([1.8, 1.2, 1.2])
    }

    #[test]
    fn thickness_allow_list_filters_hardware() {
        let tree = Node::group(vec![
            leaf("Side panel", 1.8, 57.8, 262.7),
            // 4.7mm plywood scrap: matches no stock, excluded entirely.
            leaf("Scrap", 0.47, 20.0, 5.0),
            // A dowel-sized cylinder is not sheet stock either.
            Node::Leaf(Shape::cylinder(0.4, 4.0)),
        ]);
        let list = extract_wood_parts(&tree, &stock());
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].labels, ["Side panel"]);
    }

    #[test]
    fn width_is_smaller_height_is_larger() {
        let tree = Node::group(vec![leaf("Top panel", 174.5, 57.2, 1.8)]);
        let list = extract_wood_parts(&tree, &stock());
        let part = list.entries[0].part;
        assert_eq!(part.thickness, 18.0);
        assert_eq!(part.width, 572.0);
        assert_eq!(part.height, 1745.0);
    }

    #[test]
    fn equal_larger_extents_are_still_deterministic() {
        let tree = Node::group(vec![leaf("Square", 40.0, 40.0, 1.8)]);
        let list = extract_wood_parts(&tree, &stock());
        let part = list.entries[0].part;
        assert_eq!(part.width, 400.0);
        assert_eq!(part.height, 400.0);
    }

    #[test]
    fn orientation_does_not_split_groups() {
        // The same panel standing up and lying down is one part.
        let upright = Shape::cuboid(1.8, 30.0, 100.0).with_label("Shelf");
        let flat = Shape::cuboid(100.0, 30.0, 1.8)
            .with_label("Shelf")
            .locate(Location::at(50.0, 0.0, 0.0));
        let tree = Node::group(vec![upright.into(), flat.into()]);
        let list = extract_wood_parts(&tree, &stock());
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].count, 2);
        assert_eq!(list.entries[0].labels, ["Shelf"]);
    }

    #[test]
    fn tolerance_boundary_groups_and_separates() {
        // 1.79mm and 1.81mm against configured 1.8mm: one group.
        let tree = Node::group(vec![
            leaf("a", 0.179, 20.0, 30.0),
            leaf("b", 0.181, 20.0, 30.0),
        ]);
        let list = extract_wood_parts(&tree, &PanelStock::new([0.18]));
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].count, 2);

        // 1.8mm and 1.95mm stay apart even when both are stock.
        let tree = Node::group(vec![
            leaf("a", 0.18, 20.0, 30.0),
            leaf("b", 0.195, 20.0, 30.0),
        ]);
        let list = extract_wood_parts(&tree, &PanelStock::new([0.18, 0.195]));
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn sort_most_needed_first_then_thickness() {
        let tree = Node::group(vec![
            // Three thick shelves.
            leaf("thick", 1.8, 30.0, 40.0),
            leaf("thick", 1.8, 30.0, 40.0),
            leaf("thick", 1.8, 30.0, 40.0),
            // One thin back.
            leaf("thin-single", 1.2, 30.0, 40.0),
            // Three thin shelves of another size.
            leaf("thin", 1.2, 25.0, 40.0),
            leaf("thin", 1.2, 25.0, 40.0),
            leaf("thin", 1.2, 25.0, 40.0),
        ]);
        let list = extract_wood_parts(&tree, &stock());
        let counts: Vec<usize> = list.entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, [3, 3, 1]);
        // Among the two count-3 groups, thinner stock sorts first.
        assert_eq!(list.entries[0].part.thickness, 12.0);
        assert_eq!(list.entries[1].part.thickness, 18.0);
        assert_eq!(list.entries[2].labels, ["thin-single"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let tree = Node::group(vec![
            leaf("Side panel", 1.8, 57.8, 262.7),
            leaf("Side panel", 1.8, 57.8, 262.7),
            leaf("Back panel", 1.2, 174.5, 262.7),
        ]);
        let first = extract_wood_parts(&tree, &stock());
        let second = extract_wood_parts(&tree, &stock());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_assembly_yields_an_empty_report() {
        let tree = Node::group(vec![Node::group(vec![])]);
        let list = extract_wood_parts(&tree, &stock());
        assert!(list.is_empty());
        assert_eq!(list.panel_count(), 0);
        // Rendering must not choke on the empty column-width computation.
        let text = list.to_string();
        assert!(text.starts_with("Wood parts list"));
    }

    #[test]
    fn report_lines_are_column_aligned() {
        let tree = Node::group(vec![
            leaf("Side panel", 1.8, 57.8, 262.7),
            leaf("Sub closet plank", 1.8, 29.3, 29.1),
        ]);
        let text = extract_wood_parts(&tree, &stock()).to_string();
        let lines: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(lines.len(), 2);
        // The "(thickness:" column starts at the same offset on every line.
        let offsets: Vec<usize> = lines
            .iter()
            .map(|l| l.find("(thickness:").unwrap())
            .collect();
        assert_eq!(offsets[0], offsets[1]);
        assert!(lines.iter().any(|l| l.contains("578.0x2627.0")));
        assert!(lines.iter().any(|l| l.ends_with("- Side panel")));
    }

    #[test]
    fn labels_deduplicate_but_count_accumulates() {
        let tree = Node::group(vec![
            leaf("Full plank", 1.8, 30.0, 50.0),
            leaf("Full plank", 1.8, 30.0, 50.0),
            leaf("Shelf", 1.8, 30.0, 50.0),
            Node::Leaf(Shape::cuboid(1.8, 30.0, 50.0)),
        ]);
        let list = extract_wood_parts(&tree, &stock());
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].count, 4);
        assert_eq!(list.entries[0].labels, ["Full plank", "Shelf"]);
    }

    #[test]
    fn entries_serialize_for_machine_export() {
        let tree = Node::group(vec![leaf("Side panel", 1.8, 57.8, 262.7)]);
        let list = extract_wood_parts(&tree, &stock());
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("\"thickness\":18.0"));
        assert!(json.contains("Side panel"));
    }
}
