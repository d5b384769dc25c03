#![warn(missing_docs)]

//! Fastener hardware for the kast closet configurator.
//!
//! Two halves: a small catalog of fastener templates (wooden dowels in the
//! metric sizes the design uses, and a countersunk-screw stand-in), and the
//! placement engine that lays a row of fasteners along the interface between
//! two panels. The engine is purely computational — it reads panel faces and
//! emits freshly placed shapes, never touching the input geometry.

use thiserror::Error;

mod catalog;
mod row;

pub use catalog::{dowel, screw, DowelPolicy, DowelSize, ScrewSpec};
pub use row::{
    place_dowels_between, place_fasteners_between, place_screws_between, rotation_to_interface,
    Interface, RowSpec,
};

/// Errors from fastener configuration or degenerate interface geometry.
///
/// Configuration errors are rejected before any geometry work; geometry
/// errors are hard failures — the engine never emits a partial row or a
/// NaN placement.
#[derive(Error, Debug)]
pub enum HardwareError {
    /// Fastener spacing must be strictly positive.
    #[error("fastener spacing must be positive, got {0}")]
    NonPositiveSpacing(f64),
    /// Fastener length must be strictly positive.
    #[error("fastener length must be positive, got {0}")]
    NonPositiveLength(f64),
    /// A dowel size key outside the catalog.
    #[error("unknown dowel size {0:?} (expected 6mm, 8mm, or 10mm)")]
    UnknownDowelSize(String),
    /// The panel exposes no planar faces to join along.
    #[error("panel has no planar faces")]
    NoFaces,
    /// The interface face has fewer than two edges.
    #[error("interface face has {0} edges, need at least 2")]
    TooFewEdges(usize),
    /// The principal edge of the interface has no length.
    #[error("interface face has a zero-length principal edge")]
    ZeroLengthEdge,
    /// The interface normal or direction vector is degenerate.
    #[error("interface normal or direction is degenerate")]
    DegenerateDirection,
}
