//! The closet's parameter set and the dimensions derived from it.
//!
//! One immutable structure, built once (from defaults or a TOML file) and
//! passed explicitly to every builder. All lengths are centimeters.

use kast_hardware::DowelSize;
use kast_parts::PanelStock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a closet configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A dimension that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The depth budget cannot fit the door stack and back panel.
    #[error("depth_budget {depth_budget} leaves no interior depth behind door and back")]
    DepthBudgetTooSmall {
        /// Configured depth budget.
        depth_budget: f64,
    },
}

/// All parameters of the closet design.
///
/// Field defaults reproduce the reference design; any subset can be
/// overridden from TOML. The structure is never mutated after construction —
/// derived dimensions are methods, not cached fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClosetConfig {
    /// Primary sheet thickness.
    pub thickness: f64,
    /// Back panel thickness.
    pub back_thickness: f64,
    /// Overall width.
    pub width: f64,
    /// Overall height.
    pub height: f64,
    /// Total depth available, doors included.
    pub depth_budget: f64,
    /// Thickness of the mirror glued to each door.
    pub mirror_thickness: f64,
    /// Depth of each sliding sub-closet.
    pub sub_depth: f64,
    /// Clearance between sub-closets and the fixed interior.
    pub inner_margin: f64,
    /// Height of the sub-closet wheels.
    pub wheel_height: f64,
    /// Height of the rail the sub-closets hang from.
    pub rail_height: f64,
    /// Sub-closet back panel thickness.
    pub sub_back_thickness: f64,
    /// Height of the bottom compartment.
    pub bottom_height: f64,
    /// Width of the pants compartment.
    pub pants_width: f64,
    /// Height of the dress compartment.
    pub dress_height: f64,
    /// Hanging bar height (profile, not position).
    pub bar_height: f64,
    /// Hanging bar width.
    pub bar_width: f64,
    /// Gap between bar and the shelf above it.
    pub bar_spacing: f64,
    /// Pants compartment height, left column.
    pub pants_height_left: f64,
    /// Pants compartment height, right column.
    pub pants_height_right: f64,
    /// Gap around each door.
    pub door_margin: f64,
    /// Default dowel size for standard-thickness joints.
    pub dowel_size: DowelSize,
}

impl Default for ClosetConfig {
    fn default() -> Self {
        Self {
            thickness: 1.8,
            back_thickness: 1.2,
            width: 174.5,
            height: 264.5,
            depth_budget: 59.0,
            mirror_thickness: 0.4,
            sub_depth: 30.5,
            inner_margin: 0.6,
            wheel_height: 2.8,
            rail_height: 1.9,
            sub_back_thickness: 1.2,
            bottom_height: 12.0,
            pants_width: 34.5,
            dress_height: 102.5,
            bar_height: 3.0,
            bar_width: 1.5,
            bar_spacing: 4.5,
            pants_height_left: 73.0,
            pants_height_right: 63.0,
            door_margin: 0.2,
            dowel_size: DowelSize::Eight,
        }
    }
}

impl ClosetConfig {
    /// Parse a configuration from TOML and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ClosetConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject configurations no closet can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("thickness", self.thickness),
            ("back_thickness", self.back_thickness),
            ("width", self.width),
            ("height", self.height),
            ("depth_budget", self.depth_budget),
            ("sub_depth", self.sub_depth),
            ("wheel_height", self.wheel_height),
            ("rail_height", self.rail_height),
            ("sub_back_thickness", self.sub_back_thickness),
            ("bottom_height", self.bottom_height),
            ("pants_width", self.pants_width),
            ("dress_height", self.dress_height),
            ("bar_height", self.bar_height),
            ("bar_width", self.bar_width),
            ("pants_height_left", self.pants_height_left),
            ("pants_height_right", self.pants_height_right),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.inner_depth() <= 0.0 {
            return Err(ConfigError::DepthBudgetTooSmall {
                depth_budget: self.depth_budget,
            });
        }
        Ok(())
    }

    // Derived dimensions. Kept as methods so a config can never drift out of
    // sync with its derived values.

    /// Door leaf thickness: wood plus mirror.
    pub fn door_thickness(&self) -> f64 {
        self.thickness + self.mirror_thickness
    }

    /// Carcass depth: the budget minus the doors in front of it.
    pub fn depth(&self) -> f64 {
        self.depth_budget - self.door_thickness()
    }

    /// Interior depth: carcass depth minus the back panel.
    pub fn inner_depth(&self) -> f64 {
        self.depth() - self.back_thickness
    }

    /// Half the primary sheet thickness.
    pub fn offset(&self) -> f64 {
        self.thickness / 2.0
    }

    /// Half the back panel thickness.
    pub fn back_offset(&self) -> f64 {
        self.back_thickness / 2.0
    }

    /// Height of the side panels (overall height minus the top).
    pub fn side_height(&self) -> f64 {
        self.height - self.thickness
    }

    /// Usable shelf width of one column.
    pub fn plank_width(&self) -> f64 {
        self.width / 2.0 - self.sub_depth - 2.0 * self.thickness - self.inner_margin * 2.0
    }

    /// X position of a column's shelf centerline.
    pub fn plank_horizontal_location(&self) -> f64 {
        self.plank_width() / 2.0 + self.thickness
    }

    /// Height of a sub-closet body.
    pub fn sub_height(&self) -> f64 {
        self.side_height() - self.thickness * 2.0 - self.wheel_height - self.rail_height
    }

    /// Ground clearance of a sub-closet (wheels plus half sheet).
    pub fn sub_lift(&self) -> f64 {
        self.offset() + self.wheel_height
    }

    /// Half the sub-closet back thickness.
    pub fn sub_back_offset(&self) -> f64 {
        self.sub_back_thickness / 2.0
    }

    /// Depth of a sub-closet shelf.
    pub fn sub_plank_depth(&self) -> f64 {
        self.sub_depth - self.sub_back_thickness
    }

    /// Width of a sub-closet shelf.
    pub fn sub_plank_width(&self) -> f64 {
        self.inner_depth() - self.thickness + self.mirror_thickness
    }

    /// Overall width of a sub-closet.
    pub fn sub_width(&self) -> f64 {
        self.inner_depth() + self.door_thickness()
    }

    /// Shelf heights of a column: `(bottom_y, pants_y, dress_y)`.
    pub fn plank_heights(&self, pants_height: f64) -> (f64, f64, f64) {
        let bottom_y = self.bottom_height + self.offset();
        let pants_y = bottom_y + pants_height + self.thickness;
        let dress_y = pants_y + self.dress_height + self.thickness;
        (bottom_y, pants_y, dress_y)
    }

    /// The sheet thicknesses the cut-list extractor accepts.
    pub fn panel_stock(&self) -> PanelStock {
        PanelStock::new([
            self.thickness,
            self.back_thickness,
            self.sub_back_thickness,
        ])
    }

    /// Dowel selection policy for panel joints.
    pub fn dowel_policy(&self) -> kast_hardware::DowelPolicy {
        kast_hardware::DowelPolicy {
            default_size: self.dowel_size,
            thin_size: DowelSize::Six,
            standard_thickness: self.thickness,
        }
    }
}
