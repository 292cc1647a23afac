//! Command implementations for CSG CLI.
//!
//! Provides subcommands that load a CoCoRaHS daily report (local file or
//! URL, JSON or CSV, optionally gzipped) and either compose the stream graph
//! or export the cleaned observation table.

use clap::Subcommand;

pub mod clean;
pub mod compose;
pub mod source;

#[derive(Subcommand)]
pub enum Command {
    /// Compose the smoothed stream graph layers and write the figure JSON
    Compose {
        /// Report path or http(s) URL (.json, .csv, optionally .gz)
        #[arg(short = 'i', long)]
        input: String,

        /// Output path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Resampled points per boundary curve
        #[arg(short = 's', long, default_value_t = csg_data::compositor::DEFAULT_SAMPLES)]
        samples: usize,

        /// Write the raw layer bands instead of a Plotly figure
        #[arg(long)]
        bands: bool,
    },

    /// Write the cleaned, date-sorted observations as CSV
    Clean {
        /// Report path or http(s) URL (.json, .csv, optionally .gz)
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the cleaned CSV
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Compose {
            input,
            output,
            samples,
            bands,
        } => compose::run_compose(&input, output.as_deref(), samples, bands).await,
        Command::Clean { input, output } => clean::run_clean(&input, &output).await,
    }
}
