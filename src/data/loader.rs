use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::error::{DataError, Result};
use super::types::StockRow;

/// Load screener rows from a `.csv` or `.json` file.
///
/// JSON input is an array of row objects. Any row missing one of the six
/// factor columns fails the whole load.
pub fn load_rows(path: &Path) -> Result<Vec<StockRow>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let open = || {
        File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let rows = match extension.as_str() {
        "csv" => read_csv(open()?)?,
        "json" => read_json(BufReader::new(open()?))?,
        _ => return Err(DataError::UnsupportedFormat(path.display().to_string())),
    };

    debug!(path = %path.display(), rows = rows.len(), "loaded rows");
    Ok(rows)
}

/// Parse CSV with a header row. Cells are trimmed; empty optional cells
/// become `None`.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<StockRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    reader.headers().map_err(DataError::Header)?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<StockRow>().enumerate() {
        let row = record.map_err(|e| DataError::Row {
            row: i + 1,
            message: e.to_string(),
        })?;
        rows.push(check_factors(row, i + 1)?);
    }
    Ok(rows)
}

/// Parse a JSON array of row objects. Each element is decoded on its own so
/// a bad row is reported by its 1-based position.
pub fn read_json<R: Read>(input: R) -> Result<Vec<StockRow>> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(input)?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let row = serde_json::from_value::<StockRow>(value).map_err(|e| DataError::Row {
                row: i + 1,
                message: e.to_string(),
            })?;
            check_factors(row, i + 1)
        })
        .collect()
}

/// Reject a row whose factors include NaN or an infinity.
fn check_factors(row: StockRow, index: usize) -> Result<StockRow> {
    match row.non_finite_factor() {
        Some(column) => Err(DataError::Row {
            row: index,
            message: format!("{} must be a finite number", column),
        }),
        None => Ok(row),
    }
}
