//! Log-odds comparison of one column between two cohorts.

use tracing::debug;
use tutorodds_stats::{
    frequency::FrequencyCounts,
    log_odds::{self, LogOddsError, Normalization},
    ranking::RankedScores,
};

use crate::dataset::{Cohort, ColumnValue, DatasetError};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ComparisonError {
    #[display("{_0}")]
    Dataset(DatasetError),
    #[display("{_0}")]
    LogOdds(LogOddsError),
}

/// Compares the distribution of `column` in cohort `a` against cohort `b`.
///
/// Each cohort's values are tallied, the prior is the per-value sum of both
/// tallies, and every value is scored with the log-odds estimator. Positive
/// scores mean the value is more frequent in `a`.
pub fn compare_cohorts(
    a: &Cohort<'_>,
    b: &Cohort<'_>,
    column: &str,
    normalization: Normalization,
) -> Result<RankedScores<ColumnValue>, ComparisonError> {
    let counts_a = a.value_counts(column)?;
    let counts_b = b.value_counts(column)?;
    let prior = FrequencyCounts::combined(&counts_a, &counts_b);
    debug!(
        column,
        a = counts_a.total(),
        b = counts_b.total(),
        labels = prior.len(),
        "comparing cohorts"
    );

    let result = log_odds::log_odds_with_prior(&counts_a, &counts_b, &prior)?;
    Ok(result.ranked(normalization))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::AnnotatedDataset;

    const CSV: &str = "\
GROUP,strategies-2,strategies-5
T,1.0,0.0
T,1.0,0.0
T,1.0,1.0
T,0.0,0.0
C,0.0,0.0
C,0.0,1.0
C,1.0,0.0
C,0.0,0.0
";

    fn compare(column: &str, normalization: Normalization) -> RankedScores<ColumnValue> {
        let dataset = AnnotatedDataset::from_reader(CSV.as_bytes()).unwrap();
        let treatment = dataset.cohort("GROUP", "T").unwrap();
        let control = dataset.cohort("GROUP", "C").unwrap();
        compare_cohorts(&treatment, &control, column, normalization).unwrap()
    }

    #[test]
    fn test_present_value_favors_treatment() {
        let ranked = compare("strategies-2", Normalization::ZScore);
        assert_eq!(ranked.len(), 2);

        let present = ranked.get(&ColumnValue::PRESENT).unwrap();
        let absent = ranked.get(&ColumnValue(0.0)).unwrap();
        assert!(present > 0.0);
        assert!((present + absent).abs() < 1e-12);
        assert_eq!(ranked.iter().next().map(|(v, _)| *v), Some(ColumnValue::PRESENT));
    }

    #[test]
    fn test_identical_distributions_score_zero() {
        let ranked = compare("strategies-5", Normalization::ZScore);
        for (_, score) in ranked.iter() {
            assert!(score.abs() < 1e-12);
        }
    }

    #[test]
    fn test_unnormalized_scores() {
        let z = compare("strategies-2", Normalization::ZScore);
        let raw = compare("strategies-2", Normalization::Unnormalized);
        let z_present = z.get(&ColumnValue::PRESENT).unwrap();
        let raw_present = raw.get(&ColumnValue::PRESENT).unwrap();
        assert!(raw_present > 0.0);
        assert!(raw_present < z_present);
    }

    #[test]
    fn test_missing_column() {
        let dataset = AnnotatedDataset::from_reader(CSV.as_bytes()).unwrap();
        let treatment = dataset.cohort("GROUP", "T").unwrap();
        let control = dataset.cohort("GROUP", "C").unwrap();
        let err = compare_cohorts(&treatment, &control, "strategies-9", Normalization::ZScore)
            .unwrap_err();
        assert!(matches!(
            err,
            ComparisonError::Dataset(DatasetError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_single_value_column_is_degenerate() {
        let csv = "GROUP,flag\nT,1.0\nC,1.0\n";
        let dataset = AnnotatedDataset::from_reader(csv.as_bytes()).unwrap();
        let treatment = dataset.cohort("GROUP", "T").unwrap();
        let control = dataset.cohort("GROUP", "C").unwrap();
        let err =
            compare_cohorts(&treatment, &control, "flag", Normalization::ZScore).unwrap_err();
        assert!(matches!(err, ComparisonError::LogOdds(_)));
    }
}
