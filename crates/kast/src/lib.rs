#![warn(missing_docs)]

//! kast — parametric closet design in Rust.
//!
//! A configurable wardrobe: carcass frame, fixed shelf columns, mirrored
//! doors, sliding sub-closets on rails, hanging bars, and dowel rows at
//! every panel joint. From the assembled model the cut list of unique
//! wooden panels is extracted.
//!
//! # Example
//!
//! ```rust
//! use kast::{cut_list, ClosetConfig};
//!
//! let config = ClosetConfig::default();
//! let list = cut_list(&config).unwrap();
//! assert!(!list.is_empty());
//! print!("{list}");
//! ```

use thiserror::Error;

mod assembly;
mod config;

pub use assembly::{
    assemble, doors, frame, hanging_bar, hanging_bars, rails, shelf_column, sub_closet,
};
pub use config::{ClosetConfig, ConfigError};

pub use kast_hardware::{self as hardware, DowelSize, HardwareError};
pub use kast_math::{self as math, Location};
pub use kast_parts::{self as parts, extract_wood_parts, CutList};
pub use kast_solid::{self as solid, Node, Shape};

/// Errors from building a closet.
#[derive(Error, Debug)]
pub enum ClosetError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A fastener row could not be placed.
    #[error("fastener placement failed: {0}")]
    Hardware(#[from] HardwareError),
}

/// Assemble the closet and extract its cut list in one step.
pub fn cut_list(config: &ClosetConfig) -> Result<CutList, ClosetError> {
    let closet = assemble(config)?;
    Ok(extract_wood_parts(&closet, &config.panel_stock()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_list_from_default_config() {
        let list = cut_list(&ClosetConfig::default()).unwrap();
        assert!(!list.is_empty());
        let text = list.to_string();
        assert!(text.contains("Sub closet plank"));
        assert!(text.contains("thickness: 18.0mm"));
        assert!(text.contains("thickness: 12.0mm"));
    }

    #[test]
    fn invalid_config_surfaces_as_config_error() {
        let config = ClosetConfig {
            height: -1.0,
            ..ClosetConfig::default()
        };
        assert!(matches!(
            cut_list(&config),
            Err(ClosetError::Config(ConfigError::NonPositive { .. }))
        ));
    }
}
