//! Strategy log-odds command
//!
//! Scores every evaluated strategy by the z-scored log odds of its presence in
//! treatment utterances against control utterances, prints the result and
//! renders it as a bar chart.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;
use tutorodds_analysis::{
    catalog::StrategyId,
    strategy::{
        AnalysisConfig, DEFAULT_EXCLUDED_STRATEGIES, StrategyLogOddsAnalysis,
        StrategyLogOddsTable,
    },
};
use tutorodds_plot::{Bar, LogOddsBarChart, PlotConfig};
use tutorodds_stats::log_odds::Normalization;

use crate::util::{self, Output};

pub(super) const DEFAULT_INPUT_PATH: &str = "datafiles/messages/annotated_strategies.csv";
const DEFAULT_OUTPUT_PATH: &str = "output/log_odds.svg";

fn default_excluded() -> Vec<u32> {
    DEFAULT_EXCLUDED_STRATEGIES.iter().map(|id| id.0).collect()
}

#[derive(Debug, Clone, Args)]
pub(crate) struct StrategiesArg {
    /// Path to the annotated utterances CSV file
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Path of the rendered SVG figure
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Strategy catalog JSON file (defaults to the built-in catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Strategy IDs not to evaluate (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = default_excluded())]
    pub exclude: Vec<u32>,

    /// Report raw log odds instead of z-scores
    #[arg(long)]
    pub unnormalized: bool,

    /// X axis title (defaults to a title matching the normalization)
    #[arg(long)]
    pub title: Option<String>,

    /// Annotation on the negative (control) side
    #[arg(long, default_value = "Control")]
    pub text_left: String,

    /// Annotation on the positive (treatment) side
    #[arg(long, default_value = "Treatment")]
    pub text_right: String,

    /// Also write the result table as JSON to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,
}

impl Default for StrategiesArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            catalog: None,
            exclude: default_excluded(),
            unnormalized: false,
            title: None,
            text_left: "Control".to_owned(),
            text_right: "Treatment".to_owned(),
            json_output: None,
        }
    }
}

impl StrategiesArg {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            excluded_strategies: self.exclude.iter().copied().map(StrategyId).collect(),
            normalization: if self.unnormalized {
                Normalization::Unnormalized
            } else {
                Normalization::ZScore
            },
            ..AnalysisConfig::default()
        }
    }

    fn plot_config(&self, normalization: Normalization) -> PlotConfig {
        let title = self.title.clone().unwrap_or_else(|| {
            match normalization {
                Normalization::ZScore => "Z-scored log odds ratio",
                Normalization::Unnormalized => "Log odds ratio",
            }
            .to_owned()
        });
        PlotConfig {
            title,
            text_left: self.text_left.clone(),
            text_right: self.text_right.clone(),
            ..PlotConfig::default()
        }
    }
}

pub(crate) fn run(arg: &StrategiesArg) -> anyhow::Result<()> {
    let catalog = util::load_catalog(arg.catalog.as_deref())?;
    let dataset = util::read_dataset_file(&arg.input)?;

    let analysis = StrategyLogOddsAnalysis::new(&catalog, arg.analysis_config());
    let config = analysis.config();
    info!(
        strategies = analysis.expected_columns().len(),
        "computing strategy log odds"
    );
    let table = analysis
        .run(&dataset)
        .with_context(|| format!("Strategy analysis failed for {}", arg.input.display()))?;

    super::table::print_strategy_table(&table, &config.treatment_label, &config.control_label);

    save_figure(&table, &arg.plot_config(table.normalization), &arg.output)?;
    info!(path = %arg.output.display(), "saved figure");

    if let Some(path) = &arg.json_output {
        Output::save_json(&table, Some(path.clone()))?;
        info!(path = %path.display(), "saved result table");
    }

    Ok(())
}

fn bar_chart(table: &StrategyLogOddsTable, config: &PlotConfig) -> LogOddsBarChart {
    let bars = table
        .rows
        .iter()
        .map(|row| Bar::new(row.name.clone(), row.log_odds))
        .collect();
    LogOddsBarChart::new(bars).config(config.clone())
}

fn save_figure(
    table: &StrategyLogOddsTable,
    config: &PlotConfig,
    path: &Path,
) -> anyhow::Result<()> {
    util::create_parent_dir(path)?;
    bar_chart(table, config)
        .save(path)
        .with_context(|| format!("Failed to write figure: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tutorodds_analysis::strategy::StrategyLogOddsRow;
    use tutorodds_plot::BarClass;

    use super::*;

    fn row(column: &str, name: &str, log_odds: f64) -> StrategyLogOddsRow {
        StrategyLogOddsRow {
            strategy: StrategyId::from_column_name(column).unwrap(),
            column: column.to_owned(),
            name: name.to_owned(),
            log_odds,
        }
    }

    #[test]
    fn test_default_arg_matches_cli_defaults() {
        use clap::Parser as _;

        #[derive(Debug, clap::Parser)]
        struct Wrapper {
            #[clap(flatten)]
            arg: StrategiesArg,
        }

        let parsed = Wrapper::try_parse_from(["test"]).unwrap().arg;
        let default = StrategiesArg::default();
        assert_eq!(parsed.input, default.input);
        assert_eq!(parsed.output, default.output);
        assert_eq!(parsed.exclude, default.exclude);
        assert_eq!(parsed.text_left, default.text_left);
        assert_eq!(parsed.text_right, default.text_right);
        assert_eq!(parsed.unnormalized, default.unnormalized);
        assert_eq!(parsed.exclude, [1]);
    }

    #[test]
    fn test_analysis_config_from_args() {
        let arg = StrategiesArg {
            exclude: vec![1, 3],
            unnormalized: true,
            ..StrategiesArg::default()
        };
        let config = arg.analysis_config();
        assert_eq!(config.excluded_strategies, [StrategyId(1), StrategyId(3)]);
        assert_eq!(config.normalization, Normalization::Unnormalized);
        assert_eq!(config.assignment_column, "TUTOR_COPILOT_ASSIGNMENT");
    }

    #[test]
    fn test_plot_title_follows_normalization() {
        let arg = StrategiesArg::default();
        assert_eq!(
            arg.plot_config(Normalization::ZScore).title,
            "Z-scored log odds ratio"
        );
        assert_eq!(
            arg.plot_config(Normalization::Unnormalized).title,
            "Log odds ratio"
        );

        let arg = StrategiesArg {
            title: Some("Custom".to_owned()),
            ..StrategiesArg::default()
        };
        assert_eq!(arg.plot_config(Normalization::ZScore).title, "Custom");
    }

    #[test]
    fn test_bar_chart_keeps_table_order() {
        let table = StrategyLogOddsTable {
            normalization: Normalization::ZScore,
            treatment_rows: 10,
            control_rows: 10,
            rows: vec![
                row("strategies-2", "Ask Question to Guide Thinking", 2.5),
                row("strategies-9", "Ask Student to Retry", 0.3),
                row("strategies-8", "Give Away Answer/Explanation", -1.8),
            ],
        };
        let arg = StrategiesArg::default();
        let chart = bar_chart(&table, &arg.plot_config(table.normalization));

        let labels = chart.bars().iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                "Ask Question to Guide Thinking",
                "Ask Student to Retry",
                "Give Away Answer/Explanation",
            ]
        );
        let classes = chart.classes().collect::<Vec<_>>();
        assert_eq!(
            classes,
            [
                BarClass::StrongPositive,
                BarClass::NotSignificant,
                BarClass::StrongNegative,
            ]
        );
    }

    const FULL_CSV: &str = "\
TUTOR_COPILOT_ASSIGNMENT,strategies-1,strategies-2,strategies-4,strategies-5,strategies-6,strategies-7,strategies-8,strategies-9
TREATMENT,1.0,1.0,0.0,1.0,0.0,1.0,0.0,0.0
TREATMENT,0.0,1.0,1.0,1.0,0.0,1.0,0.0,1.0
TREATMENT,0.0,1.0,0.0,0.0,1.0,0.0,0.0,0.0
CONTROL,1.0,0.0,1.0,0.0,1.0,0.0,1.0,0.0
CONTROL,0.0,0.0,1.0,0.0,1.0,1.0,1.0,1.0
CONTROL,0.0,1.0,0.0,1.0,0.0,0.0,1.0,0.0
";

    #[test]
    fn test_run_writes_figure_and_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("annotated.csv");
        std::fs::write(&input, FULL_CSV).unwrap();

        let arg = StrategiesArg {
            input,
            output: dir.path().join("figures").join("log_odds.svg"),
            json_output: Some(dir.path().join("log_odds.json")),
            ..StrategiesArg::default()
        };
        run(&arg).unwrap();

        let svg = std::fs::read_to_string(&arg.output).unwrap();
        assert!(svg.contains("Ask Question to Guide Thinking"));
        assert!(svg.contains("Z-scored log odds ratio"));

        let table: StrategyLogOddsTable =
            util::read_json_file("result", arg.json_output.as_ref().unwrap()).unwrap();
        assert_eq!(table.rows.len(), 7);
        assert_eq!(table.treatment_rows, 3);
        assert_eq!(table.control_rows, 3);
    }

    #[test]
    fn test_run_fails_on_missing_column_before_plotting() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("annotated.csv");
        let csv = FULL_CSV
            .lines()
            .map(|line| {
                let mut cells = line.split(',').collect::<Vec<_>>();
                cells.remove(3);
                cells.join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(!csv.contains("strategies-4"));
        std::fs::write(&input, csv).unwrap();

        let arg = StrategiesArg {
            input,
            output: dir.path().join("log_odds.svg"),
            ..StrategiesArg::default()
        };
        let err = run(&arg).unwrap_err();
        assert!(format!("{err:#}").contains("strategies-4"));
        assert!(!arg.output.exists());
    }

    #[test]
    fn test_run_writes_no_json_when_figure_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("annotated.csv");
        std::fs::write(&input, FULL_CSV).unwrap();
        // a regular file where the figure's parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let arg = StrategiesArg {
            input,
            output: blocker.join("log_odds.svg"),
            json_output: Some(dir.path().join("log_odds.json")),
            ..StrategiesArg::default()
        };
        assert!(run(&arg).is_err());
        assert!(!arg.json_output.as_ref().unwrap().exists());
    }
}
