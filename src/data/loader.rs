use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CellValue, Dataset};
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV file into a [`Dataset`].
///
/// * missing file → [`ViewerError::FileNotFound`]
/// * no data rows (empty file or header only) → [`ViewerError::EmptyData`]
/// * anything else → [`ViewerError::Load`] with the full context chain
pub fn load_csv(path: &Path) -> Result<Dataset, ViewerError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ViewerError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("opening {}", path.display()))
                .into());
        }
    };

    let dataset = parse_csv(file)?;
    if dataset.is_empty() {
        return Err(ViewerError::EmptyData);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: first row holds the column names, every later row is data.
/// Short rows are padded with nulls; rows longer than the header are
/// rejected.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?;
    let columns = normalize_headers(headers.iter());

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() > columns.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, saw {}",
                columns.len(),
                record.len()
            );
        }

        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Dataset::new(columns, rows))
}

/// Give blank headers a positional name and disambiguate repeats with a
/// numeric suffix, so every column can be addressed by name. A suffixed name
/// that is already taken gets suffixed again (`x,x,x.1` → `x,x.1,x.1.1`).
fn normalize_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    // name → how many times it has been handed out
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .enumerate()
        .map(|(i, h)| {
            let mut name = if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            };
            let mut count = seen.get(&name).copied().unwrap_or(0);
            while count > 0 {
                seen.insert(name.clone(), count + 1);
                name = format!("{name}.{count}");
                count = seen.get(&name).copied().unwrap_or(0);
            }
            seen.insert(name.clone(), count + 1);
            name
        })
        .collect()
}

fn guess_cell_type(s: &str) -> CellValue {
    let t = s.trim();
    if t.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = t.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = t.parse::<f64>() {
        return CellValue::Float(f);
    }
    match t {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}
