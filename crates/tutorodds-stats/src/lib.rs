//! Statistical utilities for comparing label frequencies between two groups.
//!
//! This crate provides:
//!
//! - **Frequency counts**: tally label occurrences and build priors from them
//! - **Log-odds ratio**: smoothed log-odds with an informative prior and
//!   variance-based z-scoring
//! - **Ranking**: order labels by score, split by which group they favor
//!
//! # Modules
//!
//! - [`frequency`]: Label → count mappings with zero-default lookups
//! - [`log_odds`]: The log-odds estimator
//! - [`ranking`]: Sign-partitioned ranking of scored labels
//!
//! # Examples
//!
//! ## Comparing two groups
//!
//! ```
//! use tutorodds_stats::{
//!     frequency::FrequencyCounts,
//!     log_odds::{self, Normalization},
//! };
//!
//! let treatment = FrequencyCounts::tally([1, 1, 1, 0]);
//! let control = FrequencyCounts::tally([1, 0, 0, 0]);
//! let prior = FrequencyCounts::combined(&treatment, &control);
//!
//! let result = log_odds::log_odds_with_prior(&treatment, &control, &prior).unwrap();
//! let ranked = result.ranked(Normalization::ZScore);
//!
//! // `1` is more frequent in the first group, so it ranks first.
//! assert_eq!(ranked.iter().next().map(|(label, _)| *label), Some(1));
//! ```

pub mod frequency;
pub mod log_odds;
pub mod ranking;
