use std::path::PathBuf;

use skewbeta_sim::config::SimulationConfig;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let ConfigArg { output } = arg;
    let mut output = Output::create(output.clone())?;
    output.write_json(&SimulationConfig::default())?;
    Ok(())
}
