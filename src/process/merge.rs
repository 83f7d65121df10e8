use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::ChannelTable;

/// Concatenate tables in the given order, keeping each table's row order.
///
/// Every row is checked against the fixed CHIRP schema before anything is
/// copied. Locations are carried over untouched; reindex the result.
pub fn merge(name: &str, tables: &[ChannelTable]) -> Result<ChannelTable> {
    for table in tables {
        for (i, row) in table.rows.iter().enumerate() {
            row.validate(i + 1)
                .map_err(|e| Error::schema(&table.name, e))?;
        }
    }

    let total: usize = tables.iter().map(ChannelTable::len).sum();
    let mut rows = Vec::with_capacity(total);
    for table in tables {
        rows.extend(table.rows.iter().cloned());
    }
    debug!(tables = tables.len(), rows = total, "merged");
    Ok(ChannelTable::new(name, rows))
}
