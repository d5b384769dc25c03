//! The fastener catalog: metric wooden dowels and a countersunk screw.
//!
//! Dimensions are centimeters, like the rest of the design.

use crate::HardwareError;
use kast_math::Location;
use kast_solid::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard metric dowel sizes for 12mm and 18mm sheet stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DowelSize {
    /// 6mm diameter, 30mm long.
    #[serde(rename = "6mm")]
    Six,
    /// 8mm diameter, 40mm long.
    #[serde(rename = "8mm")]
    Eight,
    /// 10mm diameter, 50mm long.
    #[serde(rename = "10mm")]
    Ten,
}

impl DowelSize {
    /// Dowel diameter in cm.
    pub fn diameter(self) -> f64 {
        match self {
            DowelSize::Six => 0.6,
            DowelSize::Eight => 0.8,
            DowelSize::Ten => 1.0,
        }
    }

    /// Dowel length in cm.
    pub fn length(self) -> f64 {
        match self {
            DowelSize::Six => 3.0,
            DowelSize::Eight => 4.0,
            DowelSize::Ten => 5.0,
        }
    }
}

impl FromStr for DowelSize {
    type Err = HardwareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6mm" => Ok(DowelSize::Six),
            "8mm" => Ok(DowelSize::Eight),
            "10mm" => Ok(DowelSize::Ten),
            other => Err(HardwareError::UnknownDowelSize(other.to_string())),
        }
    }
}

impl fmt::Display for DowelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            DowelSize::Six => "6mm",
            DowelSize::Eight => "8mm",
            DowelSize::Ten => "10mm",
        };
        f.write_str(key)
    }
}

/// Which dowel a joint gets, given the thickness of the panel it bites into.
///
/// Thin stock takes the small dowel so the joint does not blow out; anything
/// at or above the standard sheet thickness takes the configured default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DowelPolicy {
    /// Dowel used for standard-thickness stock.
    pub default_size: DowelSize,
    /// Dowel used below the standard thickness.
    pub thin_size: DowelSize,
    /// Threshold between the two, in cm.
    pub standard_thickness: f64,
}

impl DowelPolicy {
    /// Select the dowel for a panel of the given thickness.
    pub fn select(&self, front_thickness: f64) -> DowelSize {
        if front_thickness < self.standard_thickness {
            self.thin_size
        } else {
            self.default_size
        }
    }
}

impl Default for DowelPolicy {
    fn default() -> Self {
        Self {
            default_size: DowelSize::Eight,
            thin_size: DowelSize::Six,
            standard_thickness: 1.8,
        }
    }
}

/// Template for a wooden dowel of the given size: a plain cylinder along Z,
/// centered, ready for axis-angle placement.
pub fn dowel(size: DowelSize) -> Shape {
    Shape::cylinder(size.diameter() / 2.0, size.length())
        .with_label(format!("Dowel {size}"))
}

/// A countersunk screw stand-in: shank plus a wider, shallow head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrewSpec {
    /// Shank diameter in cm.
    pub shank_diameter: f64,
    /// Head diameter in cm.
    pub head_diameter: f64,
    /// Overall length in cm.
    pub length: f64,
}

impl ScrewSpec {
    /// M4 countersunk at the design's 1:10 scale, 35mm long.
    pub const M4X35: ScrewSpec = ScrewSpec {
        shank_diameter: 0.4,
        head_diameter: 0.75,
        length: 3.5,
    };
}

/// Template shape for a countersunk screw.
///
/// Rotationally symmetric about its own long axis, which is what the
/// placement rotation relies on.
pub fn screw(spec: ScrewSpec) -> Shape {
    let head_height = spec.head_diameter / 3.0;
    let shank = Shape::cylinder(spec.shank_diameter / 2.0, spec.length);
    let head = Shape::cylinder(spec.head_diameter / 2.0, head_height).locate(Location::at(
        0.0,
        0.0,
        (spec.length - head_height) / 2.0,
    ));
    Shape::fused(vec![shank, head]).with_label("Screw")
}
