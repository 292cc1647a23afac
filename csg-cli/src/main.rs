//! CSG CLI - Command line tool for CoCoRaHS snow and precipitation stream graphs.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "csg-cli",
    version,
    about = "CoCoRaHS snow and precipitation stream graph toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: csg_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("csg-cli {}", env!("CARGO_PKG_VERSION"));
    csg_cmd::run(cli.command).await
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_compose_defaults() {
        let cli = Cli::try_parse_from(["csg-cli", "compose", "--input", "report.json"]).unwrap();
        match cli.command {
            csg_cmd::Command::Compose {
                input,
                output,
                samples,
                bands,
            } => {
                assert_eq!(input, "report.json");
                assert_eq!(output, None);
                assert_eq!(samples, 300);
                assert!(!bands);
            }
            _ => panic!("expected compose"),
        }
    }

    #[test]
    fn test_parse_clean_requires_output() {
        assert!(Cli::try_parse_from(["csg-cli", "clean", "-i", "report.csv"]).is_err());
        assert!(Cli::try_parse_from(["csg-cli", "clean", "-i", "report.csv", "-o", "out.csv"]).is_ok());
    }
}
