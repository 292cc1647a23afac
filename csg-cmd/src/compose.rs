//! Compose a report into stream graph layers.

use crate::source::load_cleaned_report;
use csg_chart::figure::{figure_json, FigureLayout};
use csg_cocorahs::Observation;
use csg_data::{StreamConfig, StreamLayerCompositor};
use log::info;

/// Compose observations and render the payload: a Plotly figure, or the
/// raw layer bands when `bands_only` is set.
pub fn render_payload(
    observations: &[Observation],
    samples: usize,
    bands_only: bool,
) -> anyhow::Result<String> {
    let compositor = StreamLayerCompositor::new(StreamConfig { samples });
    let bands = compositor.compose(observations)?;
    let payload = if bands_only {
        serde_json::to_string(&bands)?
    } else {
        figure_json(&bands, &FigureLayout::default())?
    };
    Ok(payload)
}

/// Load the report, compose it, and write the payload to `output` or stdout.
pub async fn run_compose(
    input: &str,
    output: Option<&str>,
    samples: usize,
    bands_only: bool,
) -> anyhow::Result<()> {
    let report = load_cleaned_report(input).await?;
    let payload = render_payload(&report.observations, samples, bands_only)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &payload).await?;
            info!("Compose complete. Output: {}", path);
        }
        None => println!("{}", payload),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"[
        {"ObservationDate":"2023-12-01","TotalPrecipAmt":"0.00","NewSnowDepth":"0.0","TotalSnowDepth":"0"},
        {"ObservationDate":"2023-12-02","TotalPrecipAmt":"0.45","NewSnowDepth":"4.0","TotalSnowDepth":"4"},
        {"ObservationDate":"2023-12-03","TotalPrecipAmt":"T","NewSnowDepth":"T","TotalSnowDepth":"3"},
        {"ObservationDate":"2023-12-04","TotalPrecipAmt":"NA","NewSnowDepth":"NA","TotalSnowDepth":"NA"},
        {"ObservationDate":"","TotalPrecipAmt":"1.0","NewSnowDepth":"1.0","TotalSnowDepth":"1"},
        {"ObservationDate":"2023-12-05","TotalPrecipAmt":"0.20","NewSnowDepth":"2.5","TotalSnowDepth":"5"}
    ]"#;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("csg-cmd-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_run_compose_writes_figure() {
        let input = temp_path("compose-report.json");
        let output = temp_path("compose-figure.json");
        tokio::fs::write(&input, REPORT).await.unwrap();

        run_compose(
            input.to_str().unwrap(),
            Some(output.to_str().unwrap()),
            50,
            false,
        )
        .await
        .unwrap();

        let text = tokio::fs::read_to_string(&output).await.unwrap();
        let figure: serde_json::Value = serde_json::from_str(&text).unwrap();
        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 6);
        assert_eq!(traces[1]["name"], "Total Snow Depth");
        assert_eq!(traces[0]["x"].as_array().unwrap().len(), 50);

        let _ = tokio::fs::remove_file(&input).await;
        let _ = tokio::fs::remove_file(&output).await;
    }

    #[test]
    fn test_render_bands_payload() {
        let report = csg_cocorahs::report::clean_and_sort(
            csg_cocorahs::report::parse_json_report(REPORT).unwrap(),
        );
        assert_eq!(report.dropped, 1);
        let payload = render_payload(&report.observations, 20, true).unwrap();
        let bands: Vec<csg_data::LayerBand> = serde_json::from_str(&payload).unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[2].label, "Total Precipitation");
        assert_eq!(bands[0].top.len(), 20);
    }

    #[test]
    fn test_render_rejects_short_report() {
        let report = csg_cocorahs::report::clean_and_sort(
            csg_cocorahs::report::parse_json_report(
                r#"[{"ObservationDate":"2023-12-01"},{"ObservationDate":"2023-12-02"},{"ObservationDate":"2023-12-03"}]"#,
            )
            .unwrap(),
        );
        let err = render_payload(&report.observations, 300, false).unwrap_err();
        assert!(err.to_string().contains("Insufficient distinct time points"));
    }
}
