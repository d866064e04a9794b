// CSV Ingestion
// Reads the raw investment export into untyped key/value rows. All typing,
// validation and rejection happens in the normalizer, not here; a file that
// opens and parses as CSV always yields one RawRow per data line.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// One untyped input row. Keys are lowercased, trimmed header names;
/// empty cells are not stored.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number in the source file (header is line 1).
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(row_number: usize) -> Self {
        RawRow {
            row_number,
            fields: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    /// First non-empty value among the given keys.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }
}

/// Load a CSV export into raw rows.
pub fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let line_number = i + 2; // 1-indexed, after the header row
        let record = result
            .with_context(|| format!("Failed to parse CSV line {} in {}", line_number, path.display()))?;

        let mut row = RawRow::new(line_number);
        for (header, value) in headers.iter().zip(record.iter()) {
            let value = value.trim();
            if !value.is_empty() {
                row.fields.insert(header.clone(), value.to_string());
            }
        }
        rows.push(row);
    }

    Ok(rows)
}
