//! Plotly-compatible figure JSON for a stream graph.
//!
//! Every band becomes two consecutive scatter traces:
//! 1. the smoothed top edge, zero-width line, hidden from the legend;
//! 2. the smoothed bottom edge with `fill: "tonexty"`, which fills back up to
//!    the previous trace and carries the layer label.
//!
//! Bands are expected in draw order (as the compositor emits them).

use csg_data::LayerBand;
use csg_utils::dates::format_timestamp;
use serde_json::{json, Value};

/// Opacity of every filled band.
pub const BAND_OPACITY: f64 = 0.4;

/// Figure-level titles.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

impl Default for FigureLayout {
    fn default() -> Self {
        FigureLayout {
            title: "Snow and Precipitation".to_string(),
            x_axis_title: "Date".to_string(),
            y_axis_title: "Measurements".to_string(),
        }
    }
}

fn split_series(points: &[(chrono::NaiveDateTime, f64)]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|(t, v)| (format_timestamp(t), *v))
        .unzip()
}

/// Build the `{data, layout}` figure document.
pub fn build_figure(bands: &[LayerBand], layout: &FigureLayout) -> Value {
    let mut traces: Vec<Value> = Vec::with_capacity(bands.len() * 2);
    for band in bands {
        let (x_top, y_top) = split_series(&band.top);
        let (x_bottom, y_bottom) = split_series(&band.bottom);
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": x_top,
            "y": y_top,
            "line": { "width": 0 },
            "showlegend": false,
        }));
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": x_bottom,
            "y": y_bottom,
            "fill": "tonexty",
            "name": band.label,
            "line": { "width": 0 },
            "opacity": BAND_OPACITY,
            "hoverinfo": "x+y",
        }));
    }

    json!({
        "data": traces,
        "layout": {
            "title": { "text": layout.title },
            "xaxis": { "title": { "text": layout.x_axis_title } },
            "yaxis": { "title": { "text": layout.y_axis_title } },
        },
    })
}

/// Serialize the figure for transport.
pub fn figure_json(bands: &[LayerBand], layout: &FigureLayout) -> serde_json::Result<String> {
    serde_json::to_string(&build_figure(bands, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use csg_cocorahs::Observation;
    use csg_data::{StreamConfig, StreamLayerCompositor};

    fn bands() -> Vec<LayerBand> {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let observations: Vec<Observation> = (0..6)
            .map(|i| Observation {
                date: start + Duration::days(i),
                total_precip_amt: 0.1 * i as f64,
                new_snow_depth: if i % 2 == 0 { 1.0 } else { 0.0 },
                total_snow_depth: 3.0 + i as f64,
            })
            .collect();
        StreamLayerCompositor::new(StreamConfig { samples: 11 })
            .compose(&observations)
            .unwrap()
    }

    #[test]
    fn test_trace_pairs_in_draw_order() {
        let figure = build_figure(&bands(), &FigureLayout::default());
        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 6);

        let names: Vec<&str> = traces
            .iter()
            .skip(1)
            .step_by(2)
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Total Snow Depth", "Snow Depth", "Total Precipitation"]);

        for pair in traces.chunks(2) {
            assert_eq!(pair[0]["showlegend"], json!(false));
            assert!(pair[0].get("fill").is_none());
            assert_eq!(pair[0]["line"]["width"], json!(0));
            assert_eq!(pair[1]["fill"], json!("tonexty"));
            assert_eq!(pair[1]["opacity"], json!(0.4));
            assert_eq!(pair[0]["x"], pair[1]["x"]);
            assert_eq!(pair[0]["y"].as_array().unwrap().len(), 11);
        }
    }

    #[test]
    fn test_timestamps_and_layout() {
        let figure = build_figure(&bands(), &FigureLayout::default());
        let x = figure["data"][0]["x"].as_array().unwrap();
        assert_eq!(x[0], json!("2024-02-01T07:00:00"));
        assert_eq!(x[1], json!("2024-02-01T19:00:00"));
        assert_eq!(x[10], json!("2024-02-06T07:00:00"));
        assert_eq!(figure["layout"]["title"]["text"], json!("Snow and Precipitation"));
        assert_eq!(figure["layout"]["xaxis"]["title"]["text"], json!("Date"));
        assert_eq!(figure["layout"]["yaxis"]["title"]["text"], json!("Measurements"));
    }

    #[test]
    fn test_figure_json_round_trips_as_value() {
        let text = figure_json(&bands(), &FigureLayout::default()).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["data"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_empty_bands() {
        let figure = build_figure(&[], &FigureLayout::default());
        assert!(figure["data"].as_array().unwrap().is_empty());
    }
}
