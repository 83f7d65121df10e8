// src/process/normalize.rs

use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result, SchemaError};
use crate::metadata::{MetadataStore, ParamValue};
use crate::process::{index::reindex, raw::RawTable, template::NameTemplate};
use crate::schema::{baseline_row, ChannelTable, Column, Value};

pub const FREQUENCY_COLUMN: &str = "Frequency";
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Resolve `radio_params` into typed column overrides.
///
/// Keys must be CHIRP data columns. Numeric columns accept numbers or numeric
/// strings. Text columns take strings as-is, render numbers without a
/// trailing `.0` (so `"DtcsCode": 23` becomes `23`), booleans as `True` /
/// `False`, and `null` as an empty cell.
pub fn resolve_radio_params(
    params: &BTreeMap<String, ParamValue>,
) -> std::result::Result<Vec<(Column, Value)>, SchemaError> {
    params
        .iter()
        .map(|(key, param)| {
            let column: Column = key.parse()?;
            let value = if column.is_numeric() {
                let number = match param {
                    ParamValue::Number(n) => Some(*n),
                    ParamValue::Text(s) => s.trim().parse::<f64>().ok(),
                    ParamValue::Flag(_) | ParamValue::Null => None,
                };
                number.map(Value::Number).ok_or_else(|| SchemaError::BadParam {
                    column: key.clone(),
                    value: param.to_string(),
                })?
            } else {
                match param {
                    ParamValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                        Value::Text(format!("{}", *n as i64))
                    }
                    ParamValue::Number(n) => Value::Text(n.to_string()),
                    ParamValue::Text(s) => Value::Text(s.clone()),
                    ParamValue::Flag(true) => Value::text("True"),
                    ParamValue::Flag(false) => Value::text("False"),
                    ParamValue::Null => Value::text(""),
                }
            };
            Ok::<_, SchemaError>((column, value))
        })
        .collect()
}

/// Convert one raw source table into CHIRP rows.
///
/// Per row, later steps win: baseline defaults, Comment = source name,
/// Name = Description, then the source's metadata record (`comment`,
/// `name_format`, `radio_params`, in that order). Rows whose cells are all
/// blank are dropped with a warning. The result keeps input row order and has
/// `Location` numbered 1..N.
#[instrument(level = "info", skip_all, fields(source = %table.name, rows = table.rows.len()))]
pub fn normalize(table: &RawTable, metadata: &MetadataStore) -> Result<ChannelTable> {
    let source = table.name.as_str();

    let freq_idx = table.column(FREQUENCY_COLUMN).ok_or_else(|| {
        Error::schema(source, SchemaError::MissingColumn(FREQUENCY_COLUMN.into()))
    })?;
    let desc_idx = table.column(DESCRIPTION_COLUMN);

    let record = metadata.get(source);
    let comment = record
        .and_then(|r| r.comment.clone())
        .unwrap_or_else(|| source.to_string());
    let template = record
        .and_then(|r| r.name_format.as_deref())
        .map(|f| NameTemplate::compile(f, table))
        .transpose()
        .map_err(|e| Error::template(source, e))?;
    let overrides = match record.and_then(|r| r.radio_params.as_ref()) {
        Some(params) => resolve_radio_params(params).map_err(|e| Error::schema(source, e))?,
        None => Vec::new(),
    };
    debug!(
        has_metadata = record.is_some(),
        overrides = overrides.len(),
        "normalizing"
    );

    let mut rows = Vec::with_capacity(table.rows.len());
    for (i, raw) in table.rows.iter().enumerate() {
        if raw.iter().all(|cell| cell.trim().is_empty()) {
            warn!(source, row = i + 1, "skipping blank row");
            continue;
        }
        let freq_text = RawTable::cell(raw, freq_idx);
        let frequency = freq_text.trim().parse::<f64>().map_err(|_| {
            Error::schema(
                source,
                SchemaError::NotNumeric {
                    column: FREQUENCY_COLUMN.into(),
                    row: i + 1,
                    value: freq_text.to_string(),
                },
            )
        })?;

        let mut row = baseline_row(frequency);
        row.set(Column::Comment, Value::text(comment.as_str()));
        if let Some(idx) = desc_idx {
            row.set(Column::Name, Value::text(RawTable::cell(raw, idx)));
        }
        if let Some(tpl) = &template {
            row.set(Column::Name, Value::Text(tpl.render(raw, i + 1)));
        }
        for (column, value) in &overrides {
            row.set(*column, value.clone());
        }
        rows.push(row);
    }

    let mut out = ChannelTable::new(source, rows);
    reindex(&mut out);
    Ok(out)
}
