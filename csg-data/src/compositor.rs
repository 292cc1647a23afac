//! StreamLayerCompositor: stacked, centered and smoothed layer bands.
//!
//! Data flow:
//! 1. Stack the three measures on the wiggle-centered baseline
//!    (see `layers::stack_layers`).
//! 2. Map the observation dates to elapsed seconds since the first date.
//! 3. Fit a not-a-knot cubic spline through every `top` and every `bottom`
//!    curve independently, and evaluate it on `samples` evenly spaced points.
//! 4. Pair the samples with evenly spaced calendar timestamps between the
//!    first and last observation and emit the layers last-to-first.
//!
//! Adjacent bands touch exactly at the observation points only; after
//! independent smoothing their shared edge may drift slightly.

use crate::layers::stack_layers;
use crate::spline::{CubicSpline, MIN_KNOTS};
use chrono::NaiveDateTime;
use csg_cocorahs::{InputError, Measure, NumericError, Observation, Result};
use csg_utils::dates::{elapsed_seconds, evenly_spaced_timestamps, linspace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of resampled points per curve when not configured otherwise.
pub const DEFAULT_SAMPLES: usize = 300;

/// Tunables for the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Points per smoothed curve (at least 2).
    pub samples: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// One drawable band: a smoothed lower and upper edge sharing timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBand {
    pub measure: Measure,
    pub label: String,
    pub bottom: Vec<(NaiveDateTime, f64)>,
    pub top: Vec<(NaiveDateTime, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamLayerCompositor {
    config: StreamConfig,
}

impl StreamLayerCompositor {
    pub fn new(config: StreamConfig) -> Self {
        StreamLayerCompositor { config }
    }

    /// Compose the smoothed bands for date-ordered, cleaned observations.
    ///
    /// Bands come back in draw order: the last declared measure first.
    /// Any failure aborts the whole composition.
    pub fn compose(&self, observations: &[Observation]) -> Result<Vec<LayerBand>> {
        if self.config.samples < 2 {
            return Err(InputError::InvalidSampleCount(self.config.samples).into());
        }
        let dates: Vec<NaiveDateTime> = observations.iter().map(|o| o.date).collect();
        validate_time_axis(&dates)?;

        let stacked = stack_layers(observations);
        let elapsed = elapsed_seconds(&dates);
        let (min_x, max_x) = bounds(&elapsed);
        let sample_x = linspace(min_x, max_x, self.config.samples);

        let (Some(&first), Some(&last)) = (dates.iter().min(), dates.iter().max()) else {
            return Err(InputError::InsufficientTimePoints {
                needed: MIN_KNOTS,
                found: 0,
            }
            .into());
        };
        let timestamps = evenly_spaced_timestamps(first, last, self.config.samples);

        log::debug!(
            "compositor: {} observations from {} to {}, {} samples per curve",
            observations.len(),
            first,
            last,
            self.config.samples
        );

        let mut bands = Vec::with_capacity(stacked.pairs.len());
        for (measure, pair) in stacked.pairs.iter().rev() {
            let top = smooth_curve(&elapsed, &pair.top, &sample_x)?;
            let bottom = smooth_curve(&elapsed, &pair.bottom, &sample_x)?;
            bands.push(LayerBand {
                measure: *measure,
                label: measure.label().to_string(),
                bottom: timestamps.iter().copied().zip(bottom).collect(),
                top: timestamps.iter().copied().zip(top).collect(),
            });
        }

        log::info!("compositor: composed {} layer bands", bands.len());
        Ok(bands)
    }
}

/// Require enough distinct dates for a cubic fit.
pub fn validate_time_axis(dates: &[NaiveDateTime]) -> std::result::Result<(), InputError> {
    let distinct = dates.iter().collect::<BTreeSet<_>>().len();
    if distinct < MIN_KNOTS {
        return Err(InputError::InsufficientTimePoints {
            needed: MIN_KNOTS,
            found: distinct,
        });
    }
    Ok(())
}

/// Fit one boundary curve and resample it.
fn smooth_curve(
    elapsed: &[f64],
    values: &[f64],
    sample_x: &[f64],
) -> std::result::Result<Vec<f64>, NumericError> {
    let spline = CubicSpline::not_a_knot(elapsed, values)?;
    Ok(spline.evaluate_many(sample_x))
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}
