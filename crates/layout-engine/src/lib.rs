//! Spatial layout of countertop pieces.
//!
//! Turns the ordered piece list into absolute placements (box size, center
//! and rotation around the vertical axis) for rendering and inspection.
//! All output is in meters with `+Y` up.

pub mod compute;
pub mod config;
pub mod sequence;
pub mod types;

pub use compute::compute_layout;
pub use config::LayoutConfig;
pub use sequence::{sequence_issues, SequenceIssue};
pub use types::{BoxSize, Layout, Placement};
