// src/metadata/mod.rs

pub mod strip;

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fs, io, path::Path};
use tracing::{debug, warn};

use crate::error::{Error, ParseError};

pub use strip::strip_line_comments;

/// A JSON scalar from `radio_params`. Whether it fits the target column is
/// decided per source when the overrides are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Null,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag(b) => write!(f, "{}", b),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Null => f.write_str("null"),
        }
    }
}

/// Per-source overlay applied after the baseline defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    /// Written verbatim into every row's Comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `{Field}` template over the raw row, producing Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_format: Option<String>,
    /// CHIRP column → constant, applied to every row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_params: Option<BTreeMap<String, ParamValue>>,
}

/// Source name → metadata record, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataStore {
    records: BTreeMap<String, MetadataRecord>,
}

impl MetadataStore {
    /// Parse a JSON document that may carry `//` line comments.
    pub fn load(text: &str) -> Result<Self, ParseError> {
        let stripped = strip_line_comments(text);
        let records: BTreeMap<String, MetadataRecord> = serde_json::from_str(&stripped)?;
        debug!(sources = records.len(), "parsed metadata");
        Ok(Self { records })
    }

    /// Read and parse `path`. A missing file is not an error: every source
    /// then gets the baseline defaults only.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::load(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no metadata file; using defaults for every source");
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, source: &str) -> Option<&MetadataRecord> {
        self.records.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, MetadataRecord)> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = (String, MetadataRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r#"
// channel list overlays
{
    "airports": {"comment": "Air"}, // note
    "repeaters": {
        "name_format": "{Callsign} {City}",
        "radio_params": {"Mode": "FM", "Offset": 0.6, "Duplex": "-"}
    },
    "empty": {}
}
"#;

    #[test]
    fn parses_records() -> Result<()> {
        let store = MetadataStore::load(DOC)?;
        assert_eq!(store.len(), 3);

        let airports = store.get("airports").expect("airports");
        assert_eq!(airports.comment.as_deref(), Some("Air"));
        assert!(airports.name_format.is_none());
        assert!(airports.radio_params.is_none());

        let repeaters = store.get("repeaters").expect("repeaters");
        assert_eq!(repeaters.name_format.as_deref(), Some("{Callsign} {City}"));
        let params = repeaters.radio_params.as_ref().expect("params");
        assert_eq!(params.get("Mode"), Some(&ParamValue::Text("FM".into())));
        assert_eq!(params.get("Offset"), Some(&ParamValue::Number(0.6)));

        assert_eq!(store.get("empty"), Some(&MetadataRecord::default()));
        Ok(())
    }

    #[test]
    fn bool_and_null_params_parse() -> Result<()> {
        let store =
            MetadataStore::load(r#"{"pmr": {"radio_params": {"Skip": true, "Tone": null}}}"#)?;
        let params = store
            .get("pmr")
            .and_then(|r| r.radio_params.as_ref())
            .expect("params");
        assert_eq!(params.get("Skip"), Some(&ParamValue::Flag(true)));
        assert_eq!(params.get("Tone"), Some(&ParamValue::Null));
        Ok(())
    }

    #[test]
    fn lookup_is_case_sensitive() -> Result<()> {
        let store = MetadataStore::load(DOC)?;
        assert!(store.get("Airports").is_none());
        Ok(())
    }

    #[test]
    fn trailing_comment_parses_like_plain_line() -> Result<()> {
        let with = MetadataStore::load("{\n\"airports\": {\"comment\": \"Air\"} // note\n}")?;
        let without = MetadataStore::load("{\n\"airports\": {\"comment\": \"Air\"}\n}")?;
        assert_eq!(with, without);
        Ok(())
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = MetadataStore::load("{\n  \"a\": {\"comment\": }\n}").unwrap_err();
        assert_eq!(err.line, 2);

        assert!(MetadataStore::load("[1, 2]").is_err());
        assert!(MetadataStore::load(r#"{"a": {"comment": 5}}"#).is_err());
        assert!(MetadataStore::load(r#"{"a": {"radio_params": {"Mode": [1]}}}"#).is_err());
    }

    #[test]
    fn missing_file_gives_empty_store() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = MetadataStore::from_path(dir.path().join("metadata.jsonc"))?;
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn reads_from_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(DOC.as_bytes())?;
        let store = MetadataStore::from_path(tmp.path())?;
        assert!(store.get("repeaters").is_some());
        Ok(())
    }
}
