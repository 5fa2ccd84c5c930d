use clap::{Parser, Subcommand};

use self::{config::ConfigArg, simulate::SimulateArg, summarize::SummarizeArg};

mod config;
mod simulate;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run the skewness-bias simulation and export the result table
    Simulate(#[clap(flatten)] SimulateArg),
    /// Summarize an exported result table by skewness bins
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Print the default simulation configuration as JSON
    Config(#[clap(flatten)] ConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::Config(arg) => config::run(&arg)?,
    }
    Ok(())
}
