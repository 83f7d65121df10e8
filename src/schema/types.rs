// src/schema/types.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::SchemaError;

/// One of the 20 data columns of a CHIRP memory row, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    Frequency,
    Duplex,
    Offset,
    Tone,
    RToneFreq,
    CToneFreq,
    DtcsCode,
    DtcsPolarity,
    RxDtcsCode,
    CrossMode,
    Mode,
    TStep,
    Skip,
    Power,
    Comment,
    UrCall,
    Rpt1Call,
    Rpt2Call,
    DvCode,
}

impl Column {
    pub const COUNT: usize = 20;

    pub const ALL: [Column; Column::COUNT] = [
        Column::Name,
        Column::Frequency,
        Column::Duplex,
        Column::Offset,
        Column::Tone,
        Column::RToneFreq,
        Column::CToneFreq,
        Column::DtcsCode,
        Column::DtcsPolarity,
        Column::RxDtcsCode,
        Column::CrossMode,
        Column::Mode,
        Column::TStep,
        Column::Skip,
        Column::Power,
        Column::Comment,
        Column::UrCall,
        Column::Rpt1Call,
        Column::Rpt2Call,
        Column::DvCode,
    ];

    /// Header text as CHIRP spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Frequency => "Frequency",
            Column::Duplex => "Duplex",
            Column::Offset => "Offset",
            Column::Tone => "Tone",
            Column::RToneFreq => "rToneFreq",
            Column::CToneFreq => "cToneFreq",
            Column::DtcsCode => "DtcsCode",
            Column::DtcsPolarity => "DtcsPolarity",
            Column::RxDtcsCode => "RxDtcsCode",
            Column::CrossMode => "CrossMode",
            Column::Mode => "Mode",
            Column::TStep => "TStep",
            Column::Skip => "Skip",
            Column::Power => "Power",
            Column::Comment => "Comment",
            Column::UrCall => "URCALL",
            Column::Rpt1Call => "RPT1CALL",
            Column::Rpt2Call => "RPT2CALL",
            Column::DvCode => "DVCODE",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Column::Frequency
                | Column::Offset
                | Column::RToneFreq
                | Column::CToneFreq
                | Column::TStep
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = SchemaError;

    /// Exact, case-sensitive match on the CHIRP header name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownColumn(s.to_string()))
    }
}

/// A single output cell. Numeric columns hold `Number`, everything else `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Coerce into a `Number` when possible: numbers pass through, text is parsed.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // integral floats keep one decimal place: 0.0, 146.0
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 => {
                write!(f, "{:.1}", n)
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One CHIRP memory: a `Location` plus exactly one value per [`Column`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRow {
    /// 1-based slot number; only meaningful after the owning table is reindexed.
    pub location: usize,
    values: Vec<Value>,
}

impl ChannelRow {
    /// Build a row from values in [`Column::ALL`] order. No checks happen here;
    /// [`ChannelRow::validate`] is what enforces the schema.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            location: 0,
            values,
        }
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.values.get(column.index())
    }

    pub fn set(&mut self, column: Column, value: Value) {
        self.values[column.index()] = value;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Check the fixed-schema invariant: 20 values, numbers where numbers belong.
    pub fn validate(&self, row: usize) -> Result<(), SchemaError> {
        if self.values.len() != Column::COUNT {
            return Err(SchemaError::Mismatch {
                row,
                reason: format!(
                    "expected {} fields, found {}",
                    Column::COUNT,
                    self.values.len()
                ),
            });
        }
        for (column, value) in Column::ALL.iter().zip(&self.values) {
            if column.is_numeric() != value.is_number() {
                return Err(SchemaError::Mismatch {
                    row,
                    reason: format!("column `{}` holds {:?}", column, value),
                });
            }
        }
        Ok(())
    }

    /// The CSV record for this row, `Location` first.
    pub fn to_record(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Column::COUNT + 1);
        out.push(self.location.to_string());
        out.extend(self.values.iter().map(|v| v.to_string()));
        out
    }
}

/// An ordered set of CHIRP rows belonging to one source (or the combined output).
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTable {
    pub name: String,
    pub rows: Vec<ChannelRow>,
}

impl ChannelTable {
    pub fn new(name: impl Into<String>, rows: Vec<ChannelRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order_and_names() {
        let names: Vec<&str> = Column::ALL.iter().map(Column::as_str).collect();
        assert_eq!(
            names,
            vec![
                "Name",
                "Frequency",
                "Duplex",
                "Offset",
                "Tone",
                "rToneFreq",
                "cToneFreq",
                "DtcsCode",
                "DtcsPolarity",
                "RxDtcsCode",
                "CrossMode",
                "Mode",
                "TStep",
                "Skip",
                "Power",
                "Comment",
                "URCALL",
                "RPT1CALL",
                "RPT2CALL",
                "DVCODE",
            ]
        );
        for (i, c) in Column::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn column_parse_is_case_sensitive() {
        assert_eq!("rToneFreq".parse::<Column>(), Ok(Column::RToneFreq));
        assert_eq!(
            "mode".parse::<Column>(),
            Err(SchemaError::UnknownColumn("mode".into()))
        );
        assert!("Location".parse::<Column>().is_err());
    }

    #[test]
    fn number_rendering() {
        assert_eq!(Value::Number(0.0).to_string(), "0.0");
        assert_eq!(Value::Number(88.5).to_string(), "88.5");
        assert_eq!(Value::Number(146.52).to_string(), "146.52");
        assert_eq!(Value::Number(146.0).to_string(), "146.0");
        assert_eq!(Value::text("NFM").to_string(), "NFM");
    }

    #[test]
    fn validate_rejects_short_and_mistyped_rows() {
        let short = ChannelRow::from_values(vec![Value::text("x")]);
        assert!(matches!(
            short.validate(3),
            Err(SchemaError::Mismatch { row: 3, .. })
        ));

        let mut values: Vec<Value> = Column::ALL
            .iter()
            .map(|c| {
                if c.is_numeric() {
                    Value::Number(1.0)
                } else {
                    Value::text("")
                }
            })
            .collect();
        assert!(ChannelRow::from_values(values.clone()).validate(0).is_ok());

        values[Column::TStep.index()] = Value::text("12.5");
        assert!(ChannelRow::from_values(values).validate(0).is_err());
    }
}
