//! Command-line front end: build the WKT document from a directory of planetary tables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use planetary_wkt::config::PipelineConfig;
use planetary_wkt::ingestion::TracingObserver;
use planetary_wkt::pipeline::run_pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "planetary-wkt")]
#[command(about = "Build a WKT 2 document from planetary ellipsoid, datum and CRS tables")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing ellipsoid.csv, datum.csv, planetodetic.csv and projection.csv
    #[arg(short, long, env = "PLANETARY_WKT_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Output document (default: wkt.txt in the input directory)
    #[arg(short, long, env = "PLANETARY_WKT_OUTPUT")]
    output: Option<PathBuf>,

    /// Write each object on a single line
    #[arg(long)]
    single_line: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary: bool,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &args.input_dir {
        config.input_dir = dir.clone();
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if args.single_line {
        config.wkt.multiline = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let config = load_config(&args)?;
    info!(input_dir = %config.input_dir.display(), "building WKT document");

    let summary = run_pipeline(&config, &TracingObserver)
        .with_context(|| format!("processing tables in {}", config.input_dir.display()))?;

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
