//! Annotated utterance dataset
//!
//! One row per tutor utterance. Rows carry an assignment label (which cohort
//! the tutor belongs to) and one binary indicator column per strategy.
//!
//! # Format
//!
//! A CSV file with a header row:
//!
//! ```text
//! TUTOR_COPILOT_ASSIGNMENT,strategies-2,strategies-4
//! TREATMENT,1.0,0.0
//! CONTROL,0.0,
//! ```
//!
//! Empty cells, `NaN` and the usual spreadsheet markers for missing data
//! (`NA`, `N/A`, `null`, `None`, `#N/A`, ...) are treated as missing and are
//! skipped when counting values.

use std::{cmp::Ordering, fmt, io, path::Path};

use tracing::debug;
use tutorodds_stats::frequency::FrequencyCounts;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DatasetError {
    #[display("failed to read CSV data: {_0}")]
    Csv(csv::Error),
    #[display("Column {column} not in dataset")]
    #[from(ignore)]
    MissingColumn { column: String },
    #[display("invalid value '{value}' in column {column} at row {row}")]
    #[from(ignore)]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

/// Cell contents read as a missing value rather than as data.
const MISSING_VALUE_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_VALUE_MARKERS.contains(&cell)
}

/// A numeric cell value, ordered so it can be used as a count label.
///
/// `-0.0` and `0.0` are the same label.
#[derive(Debug, Clone, Copy)]
pub struct ColumnValue(pub f64);

impl ColumnValue {
    /// The indicator value recording that a strategy is present.
    pub const PRESENT: Self = Self(1.0);

    /// Wraps `value`, folding `-0.0` into `0.0`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value == 0.0 { Self(0.0) } else { Self(value) }
    }
}

impl PartialEq for ColumnValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ColumnValue {}

impl PartialOrd for ColumnValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColumnValue {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == 0.0 && other.0 == 0.0 {
            return Ordering::Equal;
        }
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Debug` keeps the trailing `.0` of whole numbers
        fmt::Debug::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone)]
pub struct AnnotatedDataset {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl AnnotatedDataset {
    pub fn from_path<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    fn from_csv_reader<R>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect::<Vec<_>>();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        debug!(
            columns = headers.len(),
            rows = rows.len(),
            "loaded annotated dataset"
        );
        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn require_column(&self, column: &str) -> Result<usize, DatasetError> {
        self.column_index(column)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: column.to_owned(),
            })
    }

    /// Fails with the first column of `columns` that the dataset lacks.
    pub fn require_columns<I, S>(&self, columns: I) -> Result<(), DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for column in columns {
            self.require_column(column.as_ref())?;
        }
        Ok(())
    }

    /// Rows whose `assignment_column` equals `label`.
    pub fn cohort(&self, assignment_column: &str, label: &str) -> Result<Cohort<'_>, DatasetError> {
        let index = self.require_column(assignment_column)?;
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, record)| record.get(index).map(str::trim) == Some(label))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        debug!(label, rows = rows.len(), "selected cohort");
        Ok(Cohort {
            dataset: self,
            label: label.to_owned(),
            rows,
        })
    }
}

/// A subset of dataset rows sharing an assignment label.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    dataset: &'a AnnotatedDataset,
    label: String,
    rows: Vec<usize>,
}

impl Cohort<'_> {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Counts each distinct value of `column` within the cohort.
    ///
    /// Missing cells are skipped. `row` in [`DatasetError::InvalidValue`] is the
    /// 1-based data row of the offending cell.
    pub fn value_counts(&self, column: &str) -> Result<FrequencyCounts<ColumnValue>, DatasetError> {
        let index = self.dataset.require_column(column)?;
        let mut counts = FrequencyCounts::new();
        for &row in &self.rows {
            let Some(cell) = self.dataset.rows[row].get(index) else {
                continue;
            };
            let cell = cell.trim();
            if is_missing(cell) {
                continue;
            }
            let value = cell
                .parse::<f64>()
                .map_err(|_| DatasetError::InvalidValue {
                    column: column.to_owned(),
                    row: row + 1,
                    value: cell.to_owned(),
                })?;
            // NaN marks a missing cell as well
            if value.is_nan() {
                continue;
            }
            counts.add(ColumnValue::new(value), 1);
        }
        Ok(counts)
    }
}
