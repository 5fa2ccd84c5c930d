use std::{fmt, path::PathBuf};

use skewbeta_sim::summary::{CoefficientSummary, SkewnessSummary};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Result table JSON file written by `simulate`
    table: PathBuf,
    /// Number of |skewness| bins
    #[arg(long, default_value_t = 10)]
    bins: usize,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let SummarizeArg { table, bins } = arg;
    anyhow::ensure!(*bins > 0, "number of bins must be positive");

    let document = util::read_result_file(table)?;
    eprintln!(
        "Loaded {} trials generated at {} ({} undefined)",
        document.rows.len(),
        document.generated_at,
        document.undefined_trials
    );

    let summary = SkewnessSummary::new(document.points(), *bins);
    if summary.bins.is_empty() {
        eprintln!("No trials with defined coefficients");
        return Ok(());
    }

    println!("Coefficients by |skewness of x_var|:");
    println!(
        "{:>15} | {:>5} | {:>23} | {:>23}",
        "|skewness|", "count", "beta_const mean [P05,P95]", "beta_var mean [P05,P95]"
    );
    for bin in &summary.bins {
        println!(
            "{:>15} | {:>5} | {:>23} | {:>23}",
            format_range(&bin.range),
            bin.count,
            CoefficientCell(bin.beta_const.as_ref()),
            CoefficientCell(bin.beta_var.as_ref()),
        );
    }

    println!();
    println!("Mean |beta_var| by |skewness of x_var|:");
    print_bar_chart(summary.non_empty_bins().map(|bin| {
        let mean = bin.beta_var.as_ref().map_or(0.0, |s| s.stats.mean.abs());
        (format_range(&bin.range), mean)
    }));

    Ok(())
}

fn format_range(range: &std::ops::Range<f64>) -> String {
    format!("{:.2}-{:.2}", range.start, range.end)
}

struct CoefficientCell<'a>(Option<&'a CoefficientSummary>);

impl fmt::Display for CoefficientCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(summary) = self.0 else {
            return f.pad("-");
        };
        f.pad(&format!(
            "{:.3} [{:.3},{:.3}]",
            summary.stats.mean, summary.band.lower, summary.band.upper
        ))
    }
}

fn print_bar_chart<I, S>(data: I)
where
    I: Iterator<Item = (S, f64)>,
    S: fmt::Display,
{
    let data = data.collect::<Vec<_>>();
    let max_value = data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let max_bar_width = 50;
    for (label, value) in &data {
        println!(
            "{:>15} | {:<5.3} {}",
            label,
            value,
            "#".repeat(bar_width(*value, max_value, max_bar_width))
        );
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn bar_width(value: f64, max_value: f64, max_bar_width: usize) -> usize {
    if max_value <= 0.0 {
        return 0;
    }
    ((value / max_value) * max_bar_width as f64).round() as usize
}
