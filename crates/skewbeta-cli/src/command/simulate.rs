use std::{path::PathBuf, time::Instant};

use skewbeta_sim::{
    config::{SeedStrategy, SimulationConfig},
    simulator::Simulator,
};
use skewbeta_stats::moments::SkewnessKind;

use crate::util::{self, ExportFormat, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SeedingArg {
    SingleStream,
    PerTrial,
}

impl From<SeedingArg> for SeedStrategy {
    fn from(arg: SeedingArg) -> Self {
        match arg {
            SeedingArg::SingleStream => Self::SingleStream,
            SeedingArg::PerTrial => Self::PerTrial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SkewnessArg {
    Moment,
    Adjusted,
}

impl From<SkewnessArg> for SkewnessKind {
    fn from(arg: SkewnessArg) -> Self {
        match arg {
            SkewnessArg::Moment => Self::Moment,
            SkewnessArg::Adjusted => Self::Adjusted,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// JSON configuration file (options below override its values)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of trials
    #[arg(long)]
    trials: Option<usize>,
    /// Observations per trial
    #[arg(long)]
    sample_size: Option<usize>,
    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
    /// How the seed is turned into random streams
    #[arg(long, value_enum)]
    seeding: Option<SeedingArg>,
    /// Worker threads (requires per-trial seeding when above 1)
    #[arg(long)]
    threads: Option<usize>,
    /// Fit the standardized model without an intercept
    #[arg(long)]
    no_intercept: bool,
    /// Skewness estimator recorded for the varying regressor
    #[arg(long, value_enum)]
    skewness: Option<SkewnessArg>,
    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SimulateArg {
    fn load_config(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trial_count = trials;
        }
        if let Some(sample_size) = self.sample_size {
            config.sample_size = sample_size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(seeding) = self.seeding {
            config.seeding = seeding.into();
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.no_intercept {
            config.intercept = false;
        }
        if let Some(skewness) = self.skewness {
            config.skewness = skewness.into();
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    let simulator = Simulator::new(config.clone())?;

    eprintln!(
        "Running {} trials with {} observations each (seed {}, {:?}, {} thread(s))...",
        config.trial_count, config.sample_size, config.seed, config.seeding, config.threads
    );
    let start = Instant::now();
    let table = simulator.run()?;
    eprintln!(
        "Simulation completed in {:.2}s",
        start.elapsed().as_secs_f64()
    );
    eprintln!(
        "  Undefined trials: {} of {}",
        table.undefined_count(),
        table.len()
    );
    if let Some(middle) = table.nearest_fraction(0.5)
        && let Some(pair) = middle.estimate.coefficients()
    {
        eprintln!(
            "  p = {:.3}: beta_const = {:.3}, beta_var = {:.3}",
            middle.mixing_fraction, pair.beta_const, pair.beta_var
        );
    }

    let mut output = Output::create(arg.output.clone())?;
    output.export(arg.format, &config, &table)?;
    eprintln!("Result table written to {output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Wrapper {
        #[clap(flatten)]
        arg: SimulateArg,
    }

    fn parse(args: &[&str]) -> SimulateArg {
        Wrapper::try_parse_from(std::iter::once("simulate").chain(args.iter().copied()))
            .unwrap()
            .arg
    }

    #[test]
    fn test_defaults_without_flags() {
        let arg = parse(&[]);
        assert_eq!(arg.format, ExportFormat::Json);
        assert_eq!(arg.load_config().unwrap(), SimulationConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let arg = parse(&[
            "--trials",
            "11",
            "--sample-size",
            "50",
            "--seed",
            "7",
            "--seeding",
            "per-trial",
            "--threads",
            "2",
            "--no-intercept",
            "--skewness",
            "adjusted",
            "--format",
            "csv",
        ]);
        let config = arg.load_config().unwrap();
        assert_eq!(config.trial_count, 11);
        assert_eq!(config.sample_size, 50);
        assert_eq!(config.seed, 7);
        assert_eq!(config.seeding, SeedStrategy::PerTrial);
        assert_eq!(config.threads, 2);
        assert!(!config.intercept);
        assert_eq!(config.skewness, SkewnessKind::Adjusted);
        assert_eq!(arg.format, ExportFormat::Csv);
    }

    #[test]
    fn test_rejects_unknown_seeding() {
        let result = Wrapper::try_parse_from(["simulate", "--seeding", "random"]);
        assert!(result.is_err());
    }
}
