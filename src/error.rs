use std::path::PathBuf;

use thiserror::Error;

/// The metadata document could not be turned into source records.
#[derive(Error, Debug)]
#[error("invalid metadata document at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("column `{column}` must be numeric, got {value:?} (row {row})")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("`{0}` is not a CHIRP column")]
    UnknownColumn(String),

    #[error("radio_params value {value:?} for numeric column `{column}` is not a number")]
    BadParam { column: String, value: String },

    #[error("row {row} does not match the CHIRP schema: {reason}")]
    Mismatch { row: usize, reason: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("name_format references unknown field `{0}`")]
    UnknownField(String),

    #[error("malformed name_format {template:?}: {reason}")]
    Malformed { template: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("source `{table}`: {error}")]
    Schema {
        table: String,
        #[source]
        error: SchemaError,
    },

    #[error("source `{table}`: {error}")]
    Template {
        table: String,
        #[source]
        error: TemplateError,
    },

    #[error("I/O error on {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("CSV error in {path}: {error}")]
    Csv {
        path: PathBuf,
        #[source]
        error: csv::Error,
    },

    #[error("{} source(s) failed: {}", .0.len(), .0.join(", "))]
    FailedSources(Vec<String>),

    #[error("bad input glob: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn schema(table: &str, error: SchemaError) -> Self {
        Error::Schema {
            table: table.to_string(),
            error,
        }
    }

    pub fn template(table: &str, error: TemplateError) -> Self {
        Error::Template {
            table: table.to_string(),
            error,
        }
    }

    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            error,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            error,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
