// src/run.rs

use glob::glob;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::error::{Error, Result};
use crate::metadata::MetadataStore;
use crate::process::{load_raw_table, merge, normalize, raw::source_name, reindex, write_chirp_csv};
use crate::schema::ChannelTable;

/// Where to read sources and metadata from, and where to write CHIRP files.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub raw_data_dir: PathBuf,
    pub metadata_file: PathBuf,
    pub chirp_files_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let raw_data_dir = PathBuf::from("raw_data");
        Self {
            metadata_file: raw_data_dir.join("metadata.jsonc"),
            raw_data_dir,
            chirp_files_dir: PathBuf::from("chirp_files"),
            output_file: PathBuf::from("chirp.csv"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    /// Sources whose per-source file was written, in discovery order.
    pub sources_written: Vec<String>,
    /// (source, error message) for every source that was skipped.
    pub failed: Vec<(String, String)>,
    pub combined_rows: usize,
}

/// All `*.csv` files directly inside `dir`, sorted by path. Entries that
/// can't be read are logged and left out.
pub fn discover_sources<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.csv", dir.as_ref().display());
    let mut paths: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %e.path().display(), "skipping unreadable entry: {}", e.error());
                None
            }
        })
        .collect();
    paths.sort();
    Ok(paths)
}

#[instrument(level = "info", skip(path, metadata), fields(path = %path.display()))]
fn convert_source(path: &Path, metadata: &MetadataStore) -> Result<ChannelTable> {
    let raw = load_raw_table(path)?;
    normalize(&raw, metadata)
}

/// Convert every source under `config.raw_data_dir`.
///
/// Sources are normalized in parallel but written and merged in discovery
/// order. A source that fails is logged and skipped: it gets no file of its
/// own and contributes nothing to the combined table.
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();
    let metadata = MetadataStore::from_path(&config.metadata_file)?;
    info!(records = metadata.len(), "loaded metadata");

    let sources = discover_sources(&config.raw_data_dir)?;
    info!(
        count = sources.len(),
        dir = %config.raw_data_dir.display(),
        "discovered sources"
    );

    let converted: Vec<(PathBuf, Result<ChannelTable>)> = sources
        .into_par_iter()
        .map(|path| {
            let result = convert_source(&path, &metadata);
            (path, result)
        })
        .collect();

    let mut summary = RunSummary::default();
    let mut tables = Vec::with_capacity(converted.len());
    for (path, result) in converted {
        let name = source_name(&path);
        let table = match result {
            Ok(table) => table,
            Err(e) => {
                error!(source = %name, "skipping source: {}", e);
                summary.failed.push((name, e.to_string()));
                continue;
            }
        };

        let out = config.chirp_files_dir.join(format!("{}.csv", name));
        if let Err(e) = write_chirp_csv(&table, &out) {
            error!(source = %name, "failed to write {}: {}", out.display(), e);
            summary.failed.push((name, e.to_string()));
            continue;
        }
        info!(source = %name, rows = table.len(), "processed");
        summary.sources_written.push(name);
        tables.push(table);
    }

    let mut combined = merge("combined", &tables)?;
    reindex(&mut combined);
    write_chirp_csv(&combined, &config.output_file)?;
    summary.combined_rows = combined.len();

    info!(
        sources = summary.sources_written.len(),
        failed = summary.failed.len(),
        rows = summary.combined_rows,
        elapsed = ?start.elapsed(),
        "output written to {}",
        config.output_file.display()
    );
    Ok(summary)
}

impl RunSummary {
    /// Turn a partially failed run into an error naming the failed sources.
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(Error::FailedSources(
            self.failed.into_iter().map(|(name, _)| name).collect(),
        ))
    }
}
