use csv::WriterBuilder;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::schema::{chirp_header, ChannelTable};

/// Serialize `table` as CHIRP CSV into any writer.
pub fn write_chirp<W: Write>(table: &ChannelTable, writer: W, origin: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(chirp_header())
        .map_err(|e| Error::csv(origin, e))?;
    for row in &table.rows {
        wtr.write_record(row.to_record())
            .map_err(|e| Error::csv(origin, e))?;
    }
    wtr.flush().map_err(|e| Error::io(origin, e))?;
    Ok(())
}

/// Write `table` to `path` via a temporary sibling, renamed into place once
/// complete, so a failure never leaves a half-written file behind.
pub fn write_chirp_csv<P: AsRef<Path>>(table: &ChannelTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| table.name.clone());
    let tmp_path: PathBuf = dir.join(format!(".{}.tmp", file_name));

    let file = fs::File::create(&tmp_path).map_err(|e| Error::io(&tmp_path, e))?;
    if let Err(e) = write_chirp(table, file, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    debug!(tmp = %tmp_path.display(), "wrote temporary file");

    fs::rename(&tmp_path, path).map_err(|e| Error::io(path, e))?;
    info!(table = %table.name, rows = table.len(), path = %path.display(), "wrote CHIRP file");
    Ok(())
}
