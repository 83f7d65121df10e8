use super::types::{ChannelRow, Column, Value};

/// Baseline value for every column except `Frequency`, which always comes
/// from the input row. Name and Comment start empty and are filled in later.
fn default_value(column: Column) -> Value {
    match column {
        Column::Offset => Value::Number(0.0),
        Column::RToneFreq | Column::CToneFreq => Value::Number(88.5),
        Column::TStep => Value::Number(12.5),
        Column::DtcsCode | Column::RxDtcsCode => Value::text("023"),
        Column::DtcsPolarity => Value::text("NN"),
        Column::CrossMode => Value::text("Tone->Tone"),
        Column::Mode => Value::text("NFM"),
        Column::Power => Value::text("4.0W"),
        Column::Frequency => Value::Number(0.0),
        Column::Name
        | Column::Duplex
        | Column::Tone
        | Column::Skip
        | Column::Comment
        | Column::UrCall
        | Column::Rpt1Call
        | Column::Rpt2Call
        | Column::DvCode => Value::text(""),
    }
}

/// A fully populated row carrying the baseline defaults and the given frequency.
pub fn baseline_row(frequency: f64) -> ChannelRow {
    let values = Column::ALL
        .iter()
        .map(|&c| match c {
            Column::Frequency => Value::Number(frequency),
            other => default_value(other),
        })
        .collect();
    ChannelRow::from_values(values)
}
