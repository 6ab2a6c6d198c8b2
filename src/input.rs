use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads shipment identifiers from a headerless CSV file.
///
/// The identifier is the first field of each record. Blank identifiers are
/// skipped; every other field is ignored.
pub fn read_identifiers(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;

    read_identifiers_from(file).with_context(|| format!("Failed to read input file {}", path.display()))
}

pub fn read_identifiers_from<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut identifiers = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Malformed record {}", line + 1))?;
        match record.get(0) {
            Some(id) if !id.is_empty() => identifiers.push(id.to_string()),
            _ => tracing::debug!(record = line + 1, "Skipping record without identifier"),
        }
    }

    Ok(identifiers)
}
