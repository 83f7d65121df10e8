use anyhow::{Context, Result};
use chirpgen::metadata::MetadataStore;
use chirpgen::process::{normalize::resolve_radio_params, template::placeholders};
use std::env;
use std::fs;

/// Validate a metadata file without touching any channel lists, then print
/// the parsed mapping as YAML.
fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "raw_data/metadata.jsonc".to_string());

    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let store = MetadataStore::load(&text).with_context(|| format!("parsing {}", path))?;

    let mut problems = 0;
    for (source, record) in store.iter() {
        if let Some(format) = &record.name_format {
            match placeholders(format) {
                Ok(fields) => println!("{}: name_format uses {:?}", source, fields),
                Err(e) => {
                    eprintln!("✗ {}: {}", source, e);
                    problems += 1;
                }
            }
        }
        if let Some(params) = &record.radio_params {
            if let Err(e) = resolve_radio_params(params) {
                eprintln!("✗ {}: {}", source, e);
                problems += 1;
            }
        }
    }

    let yaml = serde_yaml::to_string(&store)?;
    println!("{}", yaml);

    if problems > 0 {
        anyhow::bail!("{} problem(s) in {}", problems, path);
    }
    println!("✔ {} sources OK", store.len());
    Ok(())
}
