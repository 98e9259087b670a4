//! CSV loader for BHXH contribution periods.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column | Required | Type | Notes |
//! |------------------|----------|---------|------------------------------------|
//! | `id` | no | string | Free-form label, may be left empty |
//! | `start_year` | yes | integer | e.g. `2014` |
//! | `end_year` | yes | integer | inclusive |
//! | `months` | yes | integer | months actually contributed |
//! | `average_salary` | yes | integer | whole Dong |
//!
//! ```csv
//! id,start_year,end_year,months,average_salary
//! first job,2010,2013,48,6000000
//! ```
//!
//! Rows are returned as read. Range checks belong to
//! [`payroll_core::Validate`].

use std::fs;
use std::path::{Path, PathBuf};

use payroll_core::{BhxhPeriod, Dong};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct PeriodRow {
    #[serde(default)]
    id: Option<String>,
    start_year: i32,
    end_year: i32,
    months: u32,
    average_salary: Dong,
}

impl From<PeriodRow> for BhxhPeriod {
    fn from(row: PeriodRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            start_year: row.start_year,
            end_year: row.end_year,
            months: row.months,
            average_salary: row.average_salary,
        }
    }
}

/// Errors that can occur while reading a periods file.
#[derive(Debug, Error)]
pub enum PeriodLoaderError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based, not counting the header.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Parse CSV text into contribution periods, in file order.
pub fn periods_from_str(input: &str) -> Result<Vec<BhxhPeriod>, PeriodLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<PeriodRow>()
        .enumerate()
        .map(|(index, result)| {
            result
                .map(BhxhPeriod::from)
                .map_err(|source| PeriodLoaderError::Parse {
                    row: index + 1,
                    source,
                })
        })
        .collect()
}

/// Read contribution periods from the CSV file at `path`.
pub fn load_periods(path: impl AsRef<Path>) -> Result<Vec<BhxhPeriod>, PeriodLoaderError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| PeriodLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    periods_from_str(&input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let csv = "id,start_year,end_year,months,average_salary\n\
                   a,2010,2013,48,6000000\n\
                   b,2014,2016,36,9000000";

        let periods = periods_from_str(csv).unwrap();

        assert_eq!(periods.len(), 2);
        assert_eq!(
            periods[1],
            BhxhPeriod {
                id: "b".to_string(),
                start_year: 2014,
                end_year: 2016,
                months: 36,
                average_salary: 9_000_000,
            }
        );
    }

    #[test]
    fn id_column_is_optional() {
        let csv = "start_year,end_year,months,average_salary\n2020,2020,12,5000000";

        let periods = periods_from_str(csv).unwrap();

        assert_eq!(periods[0].id, "");
    }

    #[test]
    fn reports_failing_row() {
        let csv = "id,start_year,end_year,months,average_salary\n\
                   a,2010,2013,48,6000000\n\
                   b,2014,2016,many,9000000";

        let err = periods_from_str(csv).unwrap_err();

        assert!(matches!(err, PeriodLoaderError::Parse { row: 2, .. }));
    }
}
