//! CSV → `Table`.
//!
//! The first record is the header. Cells are kept as text; the usual missing
//! markers (`NA`, `NULL`, `nan`, empty, …) become absent values so column
//! pruning and record filtering treat them alike.

use std::collections::HashMap;

use csv::ReaderBuilder;

use crate::ingest::IngestError;
use crate::models::table::Table;

/// Cell contents treated as missing. Matched exactly, without trimming.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn parse_csv(bytes: &[u8]) -> Result<Table, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| IngestError::Csv(e.to_string()))?,
        None => return Err(IngestError::NoColumns),
    };
    let columns = unique_column_names(header.iter());

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| IngestError::Csv(e.to_string()))?;
        if record.len() > columns.len() {
            let line = record.position().map_or(rows.len() as u64 + 2, |p| p.line());
            return Err(IngestError::TooManyFields {
                line,
                expected: columns.len(),
                saw: record.len(),
            });
        }
        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(Table::new(columns, rows))
}

fn cell_value(raw: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Names blank headers `Unnamed: {index}` and suffixes repeats with `.1`,
/// `.2`, … so every column name is unique.
fn unique_column_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (index, name) in raw.enumerate() {
        let mut name = if name.is_empty() {
            format!("Unnamed: {index}")
        } else {
            name.to_string()
        };

        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{name}.{seen}");
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        names.push(name);
    }
    names
}
