use anyhow::Context;
use clap::Parser;
use log::info;
use rackreport::{load_config, FailurePolicy, ReportPipeline};
use std::path::PathBuf;

/// Generate and email the weekly data-center rack sensor report.
#[derive(Debug, Parser)]
#[command(name = "rackreport", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "rackreport.toml")]
    config: PathBuf,

    /// Write the workbook here instead of the configured output path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip racks whose catalog or summary fetch fails instead of aborting.
    #[arg(long)]
    skip_failed_racks: bool,

    /// Skip metrics whose sensor is missing instead of aborting.
    #[arg(long)]
    skip_missing_sensors: bool,

    /// Export only; do not send the report email.
    #[arg(long)]
    no_email: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    if let Some(output) = cli.output {
        config.report.output_path = output;
    }
    if cli.skip_failed_racks {
        config.report.on_rack_error = FailurePolicy::Skip;
    }
    if cli.skip_missing_sensors {
        config.report.on_missing_sensor = FailurePolicy::Skip;
    }
    if cli.no_email {
        config.email = None;
    }

    let outcome = ReportPipeline::new(config).run().await?;
    info!(
        "report complete: {} racks reported, {} skipped",
        outcome.racks_reported, outcome.racks_skipped
    );
    println!("wrote {}", outcome.output_path.display());
    Ok(())
}
