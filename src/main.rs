use anyhow::{Context, Result};
use chirpgen::{run, Config};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Convert per-source channel lists into CHIRP CSV files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding one `<source>.csv` per channel list.
    #[arg(long, default_value = "raw_data")]
    raw_data_dir: PathBuf,

    /// Metadata overlay; defaults to `<raw_data_dir>/metadata.jsonc`.
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Directory for the per-source CHIRP files.
    #[arg(long, default_value = "chirp_files")]
    chirp_files_dir: PathBuf,

    /// Combined CHIRP file covering every source.
    #[arg(long, short, default_value = "chirp.csv")]
    output: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            metadata_file: cli
                .metadata
                .unwrap_or_else(|| cli.raw_data_dir.join("metadata.jsonc")),
            raw_data_dir: cli.raw_data_dir,
            chirp_files_dir: cli.chirp_files_dir,
            output_file: cli.output,
        }
    }
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) configure dirs ───────────────────────────────────────────
    let config: Config = Cli::parse().into();
    info!(?config, "startup");

    // ─── 3) convert, write, merge ────────────────────────────────────
    // failed sources were already logged by `run`
    let summary = run(&config).context("conversion aborted")?;
    summary.into_result()?;
    info!("all done");
    Ok(())
}
