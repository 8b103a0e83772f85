use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tutorodds_analysis::{
    comparison,
    strategy::{DEFAULT_ASSIGNMENT_COLUMN, DEFAULT_CONTROL_LABEL, DEFAULT_TREATMENT_LABEL},
};
use tutorodds_stats::log_odds::Normalization;

use crate::util;

use super::strategies::DEFAULT_INPUT_PATH;

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    /// Column whose values are compared
    #[arg(long)]
    pub column: String,

    /// Path to the annotated utterances CSV file
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Column holding the cohort label of each row
    #[arg(long, default_value = DEFAULT_ASSIGNMENT_COLUMN)]
    pub assignment_column: String,

    /// Cohort label compared as the positive side
    #[arg(long, default_value = DEFAULT_TREATMENT_LABEL)]
    pub treatment: String,

    /// Cohort label compared as the negative side
    #[arg(long, default_value = DEFAULT_CONTROL_LABEL)]
    pub control: String,

    /// Report raw log odds instead of z-scores
    #[arg(long)]
    pub unnormalized: bool,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.input)?;
    let treatment = dataset
        .cohort(&arg.assignment_column, &arg.treatment)
        .with_context(|| format!("Failed to select cohort {}", arg.treatment))?;
    let control = dataset
        .cohort(&arg.assignment_column, &arg.control)
        .with_context(|| format!("Failed to select cohort {}", arg.control))?;
    if treatment.is_empty() || control.is_empty() {
        tracing::warn!(
            treatment = treatment.len(),
            control = control.len(),
            "a cohort has no rows"
        );
    }

    let normalization = if arg.unnormalized {
        Normalization::Unnormalized
    } else {
        Normalization::ZScore
    };
    let ranked = comparison::compare_cohorts(&treatment, &control, &arg.column, normalization)
        .with_context(|| format!("Failed to compare column {}", arg.column))?;

    super::table::print_ranked_table(
        &arg.column,
        &ranked,
        normalization,
        &format!("favoring {}", arg.treatment),
        &format!("favoring {}", arg.control),
    );
    Ok(())
}
