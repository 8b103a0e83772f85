//! Per-strategy log-odds analysis of treatment against control
//!
//! For every evaluated strategy, compares how often its indicator column is
//! `1.0` (strategy present) in the treatment cohort against the control
//! cohort. A positive score means treatment tutors used the strategy more than
//! control tutors; a negative score means control tutors used it more.
//!
//! # Examples
//!
//! ```
//! use tutorodds_analysis::{
//!     catalog::{Strategy, StrategyCatalog},
//!     dataset::AnnotatedDataset,
//!     strategy::{AnalysisConfig, StrategyLogOddsAnalysis},
//! };
//!
//! let catalog = StrategyCatalog::new([
//!     Strategy::new(2, "Ask_a_question", Some("Ask Question to Guide Thinking")),
//!     Strategy::new(9, "Retry", Some("Ask Student to Retry")),
//! ])
//! .unwrap();
//! let csv = "\
//! TUTOR_COPILOT_ASSIGNMENT,strategies-2,strategies-9
//! TREATMENT,1.0,0.0
//! TREATMENT,1.0,1.0
//! TREATMENT,0.0,0.0
//! CONTROL,0.0,1.0
//! CONTROL,1.0,1.0
//! CONTROL,0.0,0.0
//! ";
//! let dataset = AnnotatedDataset::from_reader(csv.as_bytes()).unwrap();
//!
//! let analysis = StrategyLogOddsAnalysis::new(&catalog, AnalysisConfig::default());
//! let table = analysis.run(&dataset).unwrap();
//!
//! assert_eq!(table.rows[0].name, "Ask Question to Guide Thinking");
//! assert!(table.rows[0].log_odds > 0.0);
//! assert!(table.rows[1].log_odds < 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tutorodds_stats::log_odds::Normalization;

use crate::{
    catalog::{StrategyCatalog, StrategyId},
    comparison::{self, ComparisonError},
    dataset::{AnnotatedDataset, ColumnValue, DatasetError},
};

pub const DEFAULT_ASSIGNMENT_COLUMN: &str = "TUTOR_COPILOT_ASSIGNMENT";
pub const DEFAULT_TREATMENT_LABEL: &str = "TREATMENT";
pub const DEFAULT_CONTROL_LABEL: &str = "CONTROL";
/// "Explanation of concept" is not evaluated.
pub const DEFAULT_EXCLUDED_STRATEGIES: [StrategyId; 1] = [StrategyId(1)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Column holding each row's cohort label.
    pub assignment_column: String,
    /// Cohort compared as group A (positive scores).
    pub treatment_label: String,
    /// Cohort compared as group B (negative scores).
    pub control_label: String,
    /// Strategies skipped by the analysis.
    pub excluded_strategies: Vec<StrategyId>,
    pub normalization: Normalization,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            assignment_column: DEFAULT_ASSIGNMENT_COLUMN.to_owned(),
            treatment_label: DEFAULT_TREATMENT_LABEL.to_owned(),
            control_label: DEFAULT_CONTROL_LABEL.to_owned(),
            excluded_strategies: DEFAULT_EXCLUDED_STRATEGIES.to_vec(),
            normalization: Normalization::ZScore,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("Column {column} not in corpus")]
    MissingColumn { column: String },
    #[display("no log-odds row for value {value} of column {column}")]
    MissingPresentLabel { column: String, value: ColumnValue },
    #[display("failed to compare cohorts on column {column}")]
    Comparison {
        column: String,
        source: ComparisonError,
    },
    #[display("failed to select cohort {label}")]
    Cohort { label: String, source: DatasetError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLogOddsRow {
    pub strategy: StrategyId,
    /// Indicator column the score was computed from.
    pub column: String,
    /// Natural-language strategy label.
    pub name: String,
    pub log_odds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLogOddsTable {
    pub normalization: Normalization,
    pub treatment_rows: usize,
    pub control_rows: usize,
    /// Sorted by `log_odds`, descending.
    pub rows: Vec<StrategyLogOddsRow>,
}

#[derive(Debug, Clone)]
pub struct StrategyLogOddsAnalysis<'a> {
    catalog: &'a StrategyCatalog,
    config: AnalysisConfig,
}

impl<'a> StrategyLogOddsAnalysis<'a> {
    #[must_use]
    pub fn new(catalog: &'a StrategyCatalog, config: AnalysisConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Indicator columns the dataset must provide.
    #[must_use]
    pub fn expected_columns(&self) -> Vec<String> {
        self.catalog
            .indicator_columns(&self.config.excluded_strategies)
    }

    /// Scores every evaluated strategy.
    ///
    /// All indicator columns are checked before any comparison runs, so a
    /// dataset lacking one fails without producing partial results. A missing
    /// assignment column fails when the cohorts are selected.
    pub fn run(&self, dataset: &AnnotatedDataset) -> Result<StrategyLogOddsTable, AnalysisError> {
        let config = &self.config;

        for column in self.expected_columns() {
            if !dataset.has_column(&column) {
                return Err(AnalysisError::MissingColumn { column });
            }
        }

        let cohort = |label: &str| {
            dataset
                .cohort(&config.assignment_column, label)
                .map_err(|source| AnalysisError::Cohort {
                    label: label.to_owned(),
                    source,
                })
        };
        let treatment = cohort(&config.treatment_label)?;
        let control = cohort(&config.control_label)?;
        info!(
            treatment = treatment.len(),
            control = control.len(),
            "split dataset into cohorts"
        );

        let mut rows = vec![];
        for strategy in self.catalog.evaluated(&config.excluded_strategies) {
            let column = strategy.column_name();
            let ranked = comparison::compare_cohorts(
                &treatment,
                &control,
                &column,
                config.normalization,
            )
            .map_err(|source| AnalysisError::Comparison {
                column: column.clone(),
                source,
            })?;

            let log_odds = ranked.get(&ColumnValue::PRESENT).ok_or_else(|| {
                AnalysisError::MissingPresentLabel {
                    column: column.clone(),
                    value: ColumnValue::PRESENT,
                }
            })?;
            debug!(column = %column, log_odds, "scored strategy");

            rows.push(StrategyLogOddsRow {
                strategy: strategy.id,
                column,
                name: strategy.display_label().to_owned(),
                log_odds,
            });
        }
        rows.sort_by(|a, b| b.log_odds.total_cmp(&a.log_odds));

        Ok(StrategyLogOddsTable {
            normalization: config.normalization,
            treatment_rows: treatment.len(),
            control_rows: control.len(),
            rows,
        })
    }
}
