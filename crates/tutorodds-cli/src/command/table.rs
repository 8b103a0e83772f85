//! Text tables printed to stdout

use tutorodds_analysis::{
    catalog::StrategyCatalog, dataset::ColumnValue, strategy::StrategyLogOddsTable,
};
use tutorodds_stats::{log_odds::Normalization, ranking::RankedScores};

fn normalization_label(normalization: Normalization) -> &'static str {
    match normalization {
        Normalization::ZScore => "z-scored",
        Normalization::Unnormalized => "unnormalized",
    }
}

pub(super) fn print_strategy_table(table: &StrategyLogOddsTable, treatment: &str, control: &str) {
    println!(
        "Strategy log odds, {treatment} ({}) vs {control} ({}), {}",
        table.treatment_rows,
        table.control_rows,
        normalization_label(table.normalization)
    );
    println!("  {:<36} {:<14} {:>10}", "Strategy", "Column", "Log odds");
    println!("  {}", "-".repeat(62));
    for row in &table.rows {
        println!(
            "  {:<36} {:<14} {:>10.3}",
            row.name, row.column, row.log_odds
        );
    }
}

pub(super) fn print_ranked_table(
    column: &str,
    ranked: &RankedScores<ColumnValue>,
    normalization: Normalization,
    favoring_a: &str,
    favoring_b: &str,
) {
    println!(
        "Log odds of {column} values ({})",
        normalization_label(normalization)
    );
    println!("  {:<12} {:>10}", "Value", "Log odds");
    println!("  {}", "-".repeat(23));

    let sections = [
        (favoring_a, ranked.favoring_a()),
        (favoring_b, ranked.favoring_b()),
    ];
    for (title, rows) in sections {
        if rows.is_empty() {
            continue;
        }
        println!("  [{title}]");
        for (value, score) in rows {
            println!("  {:<12} {score:>10.3}", value.to_string());
        }
    }
}

pub(super) fn print_catalog(catalog: &StrategyCatalog) {
    println!("  {:>3} {:<14} {:<30} Label", "ID", "Column", "Name");
    println!("  {}", "-".repeat(82));
    for strategy in catalog.strategies() {
        println!(
            "  {:>3} {:<14} {:<30} {}",
            strategy.id,
            strategy.column_name(),
            strategy.name,
            strategy.label.as_deref().unwrap_or("-")
        );
    }
}
