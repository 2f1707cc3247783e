use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Model, Observation, COLUMNS};

/// Fixed calendar shift applied to every parsed date. The source pipeline
/// publishes its timeline 230 days behind the dashboard's; this constant is
/// inherited from that pipeline and must not change without re-aligning the
/// upstream data.
pub const DATE_OFFSET_DAYS: u64 = 230;

/// Date formats accepted in the `date` column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is missing or unreadable. Fatal at startup.
    #[error("cannot read dataset {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the source. Fatal at startup.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// A row exists but one of its cells cannot be parsed.
    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed source: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a price dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited file with a header row (primary format)
/// * `.json` – records-oriented array, the default `df.to_json(orient='records')`
///
/// Both carry the same five columns: `date`, `Model`, `Price Category`,
/// `postcode`, `Value`. Extra columns are ignored. Every date is shifted
/// forward by [`DATE_OFFSET_DAYS`] before it reaches the dataset.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Raw record – one source row before validation
// ---------------------------------------------------------------------------

/// A source row as it appears on disk. Field names map to the canonical
/// column headers; the date stays a string until `into_observation`
/// parses and shifts it.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    #[serde(rename = "Model")]
    model: Model,
    #[serde(rename = "Price Category")]
    price_category: String,
    postcode: String,
    #[serde(rename = "Value")]
    value: f64,
}

impl RawRecord {
    /// Validate one row: parse the date, apply the offset, reject
    /// non-finite values.
    fn into_observation(self, row: usize) -> Result<Observation, LoadError> {
        let parsed = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&self.date, fmt).ok())
            .ok_or_else(|| LoadError::InvalidRow {
                row,
                message: format!("'{}' is not a recognised date", self.date),
            })?;

        let date = parsed
            .checked_add_days(Days::new(DATE_OFFSET_DAYS))
            .ok_or_else(|| LoadError::InvalidRow {
                row,
                message: format!("date '{}' overflows the calendar when shifted", self.date),
            })?;

        if !self.value.is_finite() {
            return Err(LoadError::InvalidRow {
                row,
                message: format!("Value '{}' is not finite", self.value),
            });
        }

        Ok(Observation {
            date,
            model: self.model,
            price_category: self.price_category,
            postcode: self.postcode,
            value: self.value,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(format!("reading CSV header: {e}")))?;
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let record = result.map_err(|e| LoadError::InvalidRow {
            row: row_no,
            message: e.to_string(),
        })?;
        rows.push(record.into_observation(row_no)?);
    }

    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected schema:
///
/// ```json
/// [
///   { "date": "2024-01-01", "Model": "Prophet",
///     "Price Category": "Detached", "postcode": "SW1", "Value": 421000.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    // Probe the first record for the schema check so a missing column is
    // reported as such rather than as a per-row parse failure.
    let probe: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(&text)
        .map_err(|e| LoadError::Malformed(format!("parsing JSON: {e}")))?;
    if let Some(first) = probe.first() {
        for column in COLUMNS {
            if !first.contains_key(column) {
                return Err(LoadError::MissingColumn { column });
            }
        }
    }

    let records: Vec<RawRecord> = serde_json::from_str(&text)
        .map_err(|e| LoadError::Malformed(format!("parsing JSON records: {e}")))?;

    let rows = records
        .into_iter()
        .enumerate()
        .map(|(row_no, record)| record.into_observation(row_no))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(ext: &str, contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    const SAMPLE_CSV: &str = "\
date,Model,Price Category,postcode,Value
2023-01-01,Prophet,Detached,SW1,100.0
2023-01-02,Actual,Detached,SW1,98.5
";

    #[test]
    fn loads_csv_and_applies_fixed_date_offset() {
        let path = write_temp("csv", SAMPLE_CSV);
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        // 2023-01-01 + 230 days = 2023-08-19
        assert_eq!(ds.rows[0].date, "2023-08-19".parse().unwrap());
        assert_eq!(ds.rows[1].date, "2023-08-20".parse().unwrap());
        assert_eq!(ds.rows[0].model, Model::Prophet);
        assert_eq!(ds.rows[0].value, 100.0);
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"date": "2023-01-01", "Model": "Regressor",
             "Price Category": "Flat", "postcode": "E2", "Value": 250000.0}
        ]"#;
        let path = write_temp("json", json);
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].date, "2023-08-19".parse().unwrap());
        assert_eq!(ds.rows[0].model, Model::Regressor);
        assert_eq!(ds.rows[0].postcode, "E2");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let path = write_temp(
            "csv",
            "date,Model,postcode,Value\n2023-01-01,Actual,SW1,1.0\n",
        );
        match load_file(&path) {
            Err(LoadError::MissingColumn { column }) => assert_eq!(column, "Price Category"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = load_file(Path::new("no_such_dataset.csv")).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn unknown_model_tag_passes_through_as_opaque_string() {
        let path = write_temp(
            "csv",
            "date,Model,Price Category,postcode,Value\n2023-01-01,Ensemble,Flat,E2,5.0\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.rows[0].model, Model::Other("Ensemble".to_string()));
    }

    #[test]
    fn bad_date_is_an_invalid_row() {
        let path = write_temp(
            "csv",
            "date,Model,Price Category,postcode,Value\nnot-a-date,Actual,Flat,E2,5.0\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { row: 0, .. }));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let path = write_temp(
            "csv",
            "date,Model,Price Category,postcode,Value,region\n2023-01-01,Actual,Flat,E2,5.0,London\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
