use csg_cocorahs::{Measure, Observation};
use serde::Serialize;

/// Lower and upper edge of one layer's band at the raw observation points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryPair {
    pub bottom: Vec<f64>,
    pub top: Vec<f64>,
}

/// All three layers stacked on the wiggle-centered baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedLayers {
    /// Sum of every layer per row.
    pub totals: Vec<f64>,
    /// Bottom edge of the first layer per row.
    pub baseline: Vec<f64>,
    /// One pair per measure, in `Measure::ALL` order.
    pub pairs: Vec<(Measure, BoundaryPair)>,
}

/// Measure values as a `[layer][row]` matrix.
pub fn layer_matrix(observations: &[Observation]) -> Vec<Vec<f64>> {
    Measure::ALL
        .iter()
        .map(|m| observations.iter().map(|o| o.measure(*m)).collect())
        .collect()
}

/// Column sums of the layer matrix.
pub fn layer_totals(matrix: &[Vec<f64>]) -> Vec<f64> {
    let rows = matrix.first().map_or(0, |layer| layer.len());
    (0..rows)
        .map(|i| matrix.iter().map(|layer| layer[i]).sum::<f64>())
        .collect()
}

/// Inside-out centering: per row, the mean over layers of the running
/// (cumulative) layer sum, minus half the row total.
pub fn wiggle_baseline(matrix: &[Vec<f64>]) -> Vec<f64> {
    let totals = layer_totals(matrix);
    let layer_count = matrix.len() as f64;
    totals
        .iter()
        .enumerate()
        .map(|(i, total)| {
            let mut running = 0.0;
            let mut cumulative_sum = 0.0;
            for layer in matrix {
                running += layer[i];
                cumulative_sum += running;
            }
            cumulative_sum / layer_count - total / 2.0
        })
        .collect()
}

/// Stack every measure bottom-up on the centered baseline.
///
/// `bottom` of layer k+1 is exactly `top` of layer k.
pub fn stack_layers(observations: &[Observation]) -> StackedLayers {
    let matrix = layer_matrix(observations);
    let totals = layer_totals(&matrix);
    let baseline = wiggle_baseline(&matrix);

    let mut pairs = Vec::with_capacity(Measure::ALL.len());
    let mut current = baseline.clone();
    for (measure, values) in Measure::ALL.iter().zip(matrix.iter()) {
        let top: Vec<f64> = current.iter().zip(values).map(|(b, v)| b + v).collect();
        let bottom = std::mem::replace(&mut current, top.clone());
        pairs.push((*measure, BoundaryPair { bottom, top }));
    }

    StackedLayers {
        totals,
        baseline,
        pairs,
    }
}
