//! Stream graph layer geometry for daily precipitation/snow observations.
//!
//! This crate turns cleaned, date-ordered observations into the boundary
//! curves of a wiggle-centered stream graph:
//! - `layers`: stacking the three measures on a centered baseline
//! - `spline`: cubic interpolating spline with not-a-knot end conditions
//! - `compositor`: smoothing every boundary curve onto a uniform time grid

pub mod compositor;
pub mod layers;
pub mod spline;

pub use compositor::{LayerBand, StreamConfig, StreamLayerCompositor};
pub use layers::{BoundaryPair, StackedLayers};
pub use spline::CubicSpline;
