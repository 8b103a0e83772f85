//! Strategy usage analysis for tutoring sessions
//!
//! This crate compares how often tutors in a treatment cohort and a control
//! cohort use each tutoring strategy, based on utterances annotated with one
//! binary indicator column per strategy.
//!
//! # Overview
//!
//! 1. **Catalog** ([`catalog::StrategyCatalog`]): Which strategies exist, their
//!    indicator columns and display labels
//! 2. **Load Data** ([`dataset::AnnotatedDataset`]): Read annotated utterances
//!    from CSV and split them into cohorts
//! 3. **Compare** ([`comparison::compare_cohorts`]): Log-odds ratio of every
//!    value of one column between two cohorts
//! 4. **Analyze** ([`strategy::StrategyLogOddsAnalysis`]): Score each strategy's
//!    presence, treatment against control
//!
//! # Examples
//!
//! ```no_run
//! use tutorodds_analysis::{
//!     catalog::StrategyCatalog,
//!     dataset::AnnotatedDataset,
//!     strategy::{AnalysisConfig, StrategyLogOddsAnalysis},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let catalog = StrategyCatalog::builtin();
//! let dataset = AnnotatedDataset::from_path("datafiles/messages/annotated_strategies.csv")?;
//!
//! let table = StrategyLogOddsAnalysis::new(&catalog, AnalysisConfig::default()).run(&dataset)?;
//! for row in &table.rows {
//!     println!("{:<40} {:>8.3}", row.name, row.log_odds);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod comparison;
pub mod dataset;
pub mod strategy;
