//! Compressed polygon-arc topology decoding and area assembly.
//!
//! The input is a quantized, delta-encoded topology document: a global
//! arc table shared by every area boundary, an affine transform, and
//! named feature layers whose geometries reference arcs by signed index.
//! This crate reconstructs absolute-coordinate polylines, assembles each
//! area's polygon rings, and classifies every boundary segment as a
//! preferred (region-separating or outer) or interior boundary.

pub mod arc_usage;
pub mod dataset;
pub mod raw;

pub use arc_usage::ArcUsage;
pub use dataset::{ArcReference, AssembledArea, RingPoint, TopologyDataset};
