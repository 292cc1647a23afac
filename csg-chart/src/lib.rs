//! Chart payloads for composed stream graph layers.
//!
//! This crate provides:
//! - `figure`: a Plotly-compatible figure document (traces + layout) built
//!   from `LayerBand`s, ready to be serialized for a frontend

pub mod figure;
