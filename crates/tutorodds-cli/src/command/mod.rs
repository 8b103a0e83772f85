use clap::{ArgAction, Parser, Subcommand};

use crate::util;

use self::{catalog::CatalogArg, compare::CompareArg, strategies::StrategiesArg};

mod catalog;
mod compare;
mod strategies;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace). `RUST_LOG` takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compare strategy usage between treatment and control and plot the result
    Strategies(#[clap(flatten)] StrategiesArg),
    /// Rank every value of one column by log odds, treatment against control
    Compare(#[clap(flatten)] CompareArg),
    /// Show the strategy catalog
    Catalog(#[clap(flatten)] CatalogArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    match args
        .mode
        .unwrap_or(Mode::Strategies(StrategiesArg::default()))
    {
        Mode::Strategies(arg) => strategies::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Catalog(arg) => catalog::run(&arg)?,
    }
    Ok(())
}
