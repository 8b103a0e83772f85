//! Log-odds ratio with an informative Dirichlet prior.
//!
//! Compares how often each label occurs in group A versus group B. Every count
//! is smoothed by the prior count of the same label, and the variance of the
//! resulting log-odds ratio is estimated so that the score can be reported in
//! units of standard error (a z-score).
//!
//! For a label `w` with group counts `c_a`, `c_b`, prior count `p`, group totals
//! `n_a`, `n_b` and prior total `n_p`:
//!
//! ```text
//! odds_i   = (c_i + p) / ((n_i + n_p) - (c_i + p))
//! delta    = ln(odds_a) - ln(odds_b)
//! variance = 1 / (c_a + p) + 1 / (c_b + p)
//! z        = delta / sqrt(variance)
//! ```
//!
//! When the prior is the sum of both groups this reduces to a smoothed log-odds
//! ratio. Labels with a zero prior count score exactly zero.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{frequency::FrequencyCounts, ranking::RankedScores};

/// How a log-odds ratio is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide the log-odds ratio by its estimated standard error.
    #[default]
    ZScore,
    /// Report the log-odds ratio as is.
    Unnormalized,
}

/// One of the two groups being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Group {
    #[display("A")]
    A,
    #[display("B")]
    B,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LogOddsError {
    /// The smoothed count of a label equals the smoothed total of its group,
    /// leaving no mass for the complement and making the odds unbounded.
    #[display("odds of label '{label}' in group {group} are unbounded (zero denominator)")]
    DegenerateOdds { label: String, group: Group },
}

/// Log-odds estimate for a single label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogOddsEstimate {
    /// Unnormalized log-odds ratio of group A against group B.
    pub log_odds: f64,
    /// Estimated standard error, `None` for labels with a zero prior count.
    pub std_err: Option<f64>,
}

impl LogOddsEstimate {
    const ZERO_PRIOR: Self = Self {
        log_odds: 0.0,
        std_err: None,
    };

    #[must_use]
    pub fn variance(&self) -> Option<f64> {
        self.std_err.map(|se| se * se)
    }

    /// The log-odds ratio in units of its standard error.
    #[must_use]
    pub fn z_score(&self) -> f64 {
        match self.std_err {
            Some(se) => self.log_odds / se,
            None => 0.0,
        }
    }

    #[must_use]
    pub fn score(&self, normalization: Normalization) -> f64 {
        match normalization {
            Normalization::ZScore => self.z_score(),
            Normalization::Unnormalized => self.log_odds,
        }
    }
}

/// Estimates for every label of the prior.
#[derive(Debug, Clone, PartialEq)]
pub struct LogOddsResult<K> {
    estimates: BTreeMap<K, LogOddsEstimate>,
}

impl<K> LogOddsResult<K>
where
    K: Ord + Clone,
{
    #[must_use]
    pub fn get(&self, label: &K) -> Option<&LogOddsEstimate> {
        self.estimates.get(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &LogOddsEstimate)> {
        self.estimates.iter()
    }

    #[must_use]
    pub fn scores(&self, normalization: Normalization) -> BTreeMap<K, f64> {
        self.estimates
            .iter()
            .map(|(label, estimate)| (label.clone(), estimate.score(normalization)))
            .collect()
    }

    /// Ranks the labels by score, see [`RankedScores`].
    #[must_use]
    pub fn ranked(&self, normalization: Normalization) -> RankedScores<K> {
        RankedScores::new(self.scores(normalization))
    }
}

/// Computes the log-odds ratio of `counts_a` against `counts_b` for every label
/// present in `prior`.
///
/// Labels missing from either group count as zero occurrences. A positive
/// score means the label is more characteristic of group A.
///
/// # Errors
///
/// Returns [`LogOddsError::DegenerateOdds`] when a label's smoothed count in a
/// group equals that group's smoothed total.
///
/// # Examples
///
/// ```
/// use tutorodds_stats::{
///     frequency::FrequencyCounts,
///     log_odds::{self, Normalization},
/// };
///
/// let a = FrequencyCounts::from_iter([("x", 10), ("y", 0)]);
/// let b = FrequencyCounts::from_iter([("x", 0), ("y", 10)]);
/// let prior = FrequencyCounts::combined(&a, &b);
///
/// let result = log_odds::log_odds_with_prior(&a, &b, &prior).unwrap();
/// let x = result.get(&"x").unwrap().score(Normalization::ZScore);
/// let y = result.get(&"y").unwrap().score(Normalization::ZScore);
/// assert!(x > 0.0);
/// assert!((x + y).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn log_odds_with_prior<K>(
    counts_a: &FrequencyCounts<K>,
    counts_b: &FrequencyCounts<K>,
    prior: &FrequencyCounts<K>,
) -> Result<LogOddsResult<K>, LogOddsError>
where
    K: Ord + Clone + fmt::Display,
{
    let n_a = counts_a.total();
    let n_b = counts_b.total();
    let n_prior = prior.total();

    let mut estimates = BTreeMap::new();
    for (label, prior_count) in prior.iter() {
        if prior_count == 0 {
            estimates.insert(label.clone(), LogOddsEstimate::ZERO_PRIOR);
            continue;
        }

        let smoothed_a = counts_a.get(label) + prior_count;
        let smoothed_b = counts_b.get(label) + prior_count;
        let odds_a = smoothed_odds(label, Group::A, smoothed_a, n_a + n_prior)?;
        let odds_b = smoothed_odds(label, Group::B, smoothed_b, n_b + n_prior)?;

        let variance = 1.0 / smoothed_a as f64 + 1.0 / smoothed_b as f64;
        estimates.insert(
            label.clone(),
            LogOddsEstimate {
                log_odds: odds_a.ln() - odds_b.ln(),
                std_err: Some(variance.sqrt()),
            },
        );
    }

    Ok(LogOddsResult { estimates })
}

#[expect(clippy::cast_precision_loss)]
fn smoothed_odds<K>(
    label: &K,
    group: Group,
    smoothed_count: u64,
    smoothed_total: u64,
) -> Result<f64, LogOddsError>
where
    K: fmt::Display,
{
    // A label count never exceeds its group total, so this cannot underflow.
    let complement = smoothed_total - smoothed_count;
    if complement == 0 {
        return Err(LogOddsError::DegenerateOdds {
            label: label.to_string(),
            group,
        });
    }
    Ok(smoothed_count as f64 / complement as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn estimate(
        a: &[(&'static str, u64)],
        b: &[(&'static str, u64)],
    ) -> LogOddsResult<&'static str> {
        let a = a.iter().copied().collect::<FrequencyCounts<_>>();
        let b = b.iter().copied().collect::<FrequencyCounts<_>>();
        let prior = FrequencyCounts::combined(&a, &b);
        log_odds_with_prior(&a, &b, &prior).unwrap()
    }

    #[test]
    fn test_zero_prior_scores_zero() {
        let a = FrequencyCounts::from_iter([("x", 4), ("y", 2)]);
        let b = FrequencyCounts::from_iter([("x", 1), ("y", 5)]);
        let mut prior = FrequencyCounts::combined(&a, &b);
        prior.add("unseen", 0);

        let result = log_odds_with_prior(&a, &b, &prior).unwrap();
        let unseen = result.get(&"unseen").unwrap();
        assert_eq!(unseen.log_odds, 0.0);
        assert_eq!(unseen.std_err, None);
        assert_eq!(unseen.score(Normalization::ZScore), 0.0);
        assert_eq!(unseen.score(Normalization::Unnormalized), 0.0);
    }

    #[test]
    fn test_only_prior_labels_are_scored() {
        let a = FrequencyCounts::from_iter([("x", 4), ("y", 2), ("extra", 1)]);
        let b = FrequencyCounts::from_iter([("x", 1), ("y", 5)]);
        let prior = FrequencyCounts::from_iter([("x", 5), ("y", 7)]);

        let result = log_odds_with_prior(&a, &b, &prior).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.get(&"extra").is_none());
    }

    #[test]
    fn test_antisymmetric_under_group_swap() {
        let a = [("x", 7), ("y", 3), ("z", 1)];
        let b = [("x", 2), ("y", 9), ("z", 4)];
        let forward = estimate(&a, &b);
        let backward = estimate(&b, &a);

        for (label, est) in forward.iter() {
            let swapped = backward.get(label).unwrap();
            assert!((est.z_score() + swapped.z_score()).abs() < EPSILON);
            assert!((est.log_odds + swapped.log_odds).abs() < EPSILON);
        }
    }

    #[test]
    fn test_unnormalized_equals_z_times_std_err() {
        let result = estimate(&[("x", 12), ("y", 3), ("z", 5)], &[("x", 4), ("y", 8)]);
        for (_, est) in result.iter() {
            let std_err = est.std_err.unwrap();
            let raw = est.score(Normalization::Unnormalized);
            let z = est.score(Normalization::ZScore);
            assert!((raw - z * std_err).abs() < EPSILON);
        }
    }

    #[test]
    fn test_mirrored_counts() {
        let result = estimate(&[("X", 10), ("Y", 0)], &[("X", 0), ("Y", 10)]);
        let x = result.get(&"X").unwrap().z_score();
        let y = result.get(&"Y").unwrap().z_score();

        // odds_a = 20 / 10, odds_b = 10 / 20, variance = 1/20 + 1/10
        let expected = (2.0_f64.ln() - 0.5_f64.ln()) / (0.15_f64).sqrt();
        assert!((x - expected).abs() < EPSILON);
        assert!(x > 3.0);
        assert!((x + y).abs() < EPSILON);
    }

    #[test]
    fn test_matches_hand_computed_values() {
        let result = estimate(&[("p", 3), ("q", 1)], &[("p", 1), ("q", 5)]);
        let p = result.get(&"p").unwrap();

        // prior p = 4, totals: n_a = 4, n_b = 6, n_prior = 10
        let odds_a = 7.0 / (14.0 - 7.0);
        let odds_b = 5.0 / (16.0 - 5.0);
        let variance = 1.0 / 7.0 + 1.0 / 5.0;
        assert!((p.log_odds - (f64::ln(odds_a) - f64::ln(odds_b))).abs() < EPSILON);
        assert!((p.variance().unwrap() - variance).abs() < EPSILON);
    }

    #[test]
    fn test_label_missing_from_one_group_is_finite() {
        let result = estimate(&[("present", 6), ("absent", 4)], &[("absent", 9)]);
        let present = result.get(&"present").unwrap();
        assert!(present.z_score().is_finite());
        assert!(present.z_score() > 0.0);
    }

    #[test]
    fn test_single_label_is_degenerate() {
        let a = FrequencyCounts::from_iter([("only", 3)]);
        let b = FrequencyCounts::from_iter([("only", 2)]);
        let prior = FrequencyCounts::combined(&a, &b);

        let err = log_odds_with_prior(&a, &b, &prior).unwrap_err();
        match err {
            LogOddsError::DegenerateOdds { label, group } => {
                assert_eq!(label, "only");
                assert_eq!(group, Group::A);
            }
        }
    }

    #[test]
    fn test_ranked_orders_by_score() {
        let result = estimate(
            &[("up", 20), ("flat", 10), ("down", 2)],
            &[("up", 4), ("flat", 10), ("down", 15)],
        );
        let ranked = result.ranked(Normalization::ZScore);
        let labels = ranked.iter().map(|(label, _)| *label).collect::<Vec<_>>();
        assert_eq!(labels.first(), Some(&"up"));
        assert_eq!(labels.last(), Some(&"down"));
    }
}
