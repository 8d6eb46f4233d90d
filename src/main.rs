//! Rent vs Buy CLI
//!
//! Command-line interface for running buy-versus-rent projections

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rent_vs_buy::{
    export::{period_label, write_csv, Granularity},
    inputs::{load_session, save_session, session::DEFAULT_SESSION_PATH},
    projection::{Comparison, NetMeasure, ProjectionRequest, ProjectionResult, Verdict},
    ScenarioRunner, Session,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "rent-vs-buy", version, about = "Project the cost of buying versus renting a home")]
struct Cli {
    /// Saved session with buy and rent inputs
    #[arg(short, long, global = true, default_value = DEFAULT_SESSION_PATH)]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGranularity {
    #[value(alias = "monthly")]
    Month,
    #[value(alias = "yearly")]
    Year,
}

impl From<CliGranularity> for Granularity {
    fn from(value: CliGranularity) -> Self {
        match value {
            CliGranularity::Month => Granularity::Month,
            CliGranularity::Year => Granularity::Year,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a session file with default inputs
    Init {
        /// Overwrite an existing session file
        #[arg(long)]
        force: bool,
    },

    /// Run a projection and print or export the table
    Project {
        /// Table granularity
        #[arg(short, long, value_enum, default_value_t = CliGranularity::Year)]
        granularity: CliGranularity,

        /// Write the table as CSV instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the buy vs rent verdict
    Compare {
        /// Compare before sale (net value plus deduction savings) instead of after tax
        #[arg(long)]
        before_sale: bool,
    },

    /// Re-run the session at several mortgage rates
    Sweep {
        /// Mortgage rates in percent
        #[arg(short, long, value_delimiter = ',', required = true)]
        rates: Vec<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => init(&cli.session, force),
        Command::Project { granularity, output } => {
            let granularity = Granularity::from(granularity);
            let result = run(&cli.session)?;
            match output {
                Some(path) => export(&path, &result, granularity),
                None => {
                    print_table(&result, granularity);
                    Ok(())
                }
            }
        }
        Command::Compare { before_sale } => {
            let measure = if before_sale {
                NetMeasure::AfterDeductions
            } else {
                NetMeasure::AfterTax
            };
            compare(&run(&cli.session)?, measure);
            Ok(())
        }
        Command::Sweep { rates } => sweep(&cli.session, &rates),
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_session(path, &Session::default())
        .with_context(|| format!("failed to write session {}", path.display()))?;
    println!("Default inputs written to: {}", path.display());
    Ok(())
}

fn request_from(path: &Path) -> Result<ProjectionRequest> {
    let session = load_session(path)
        .with_context(|| format!("failed to load session {} (run `init` first)", path.display()))?;
    Ok(ProjectionRequest::new(session.buy_inputs, session.rent_inputs))
}

fn run(path: &Path) -> Result<ProjectionResult> {
    let request = request_from(path)?;
    let result = ScenarioRunner::new()
        .run(&request)
        .context("invalid scenario inputs")?;
    Ok(result)
}

fn export(path: &Path, result: &ProjectionResult, granularity: Granularity) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(BufWriter::new(file), result, granularity)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Projection written to: {}", path.display());
    Ok(())
}

fn print_table(result: &ProjectionResult, granularity: Granularity) {
    println!("{:>10} {:>14} {:>14} {:>12} {:>16} {:>12} {:>16} {:>14}",
        "Period", "House Value", "Equity", "Buy/Month", "Buy Net (Tax)", "Rent/Month", "Rent Net (Tax)", "Buy vs Rent");
    println!("{}", "-".repeat(116));

    let step = match granularity {
        Granularity::Month => 1,
        Granularity::Year => 12,
    };
    for (buy, rent) in result.rows().step_by(step) {
        println!("{:>10} {:>14.0} {:>14.0} {:>12.0} {:>16.0} {:>12.0} {:>16.0} {:>14.0}",
            period_label(granularity, buy),
            buy.house_value,
            buy.equity,
            buy.total_monthly,
            buy.net_value_after_tax,
            rent.total_monthly,
            rent.net_value_after_tax,
            buy.net_value_after_tax - rent.net_value_after_tax,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months:               {}", summary.total_months);
    println!("  Mortgage payment:     ${:.2}", summary.monthly_payment);
    println!("  Total interest:       ${:.2}", summary.total_interest);
    println!("  Total PMI:            ${:.2}", summary.total_pmi);
    println!("  Total tax savings:    ${:.2}", summary.total_tax_savings);
    println!("  Final house value:    ${:.2}", summary.final_house_value);
    println!("  Final rent portfolio: ${:.2}", summary.final_rent_investment);
    match summary.buy_investment_start_month {
        Some(month) => println!("  Owner starts investing in month {}", month),
        None => println!("  Buying never costs less than renting"),
    }
}

fn compare(result: &ProjectionResult, measure: NetMeasure) {
    let comparison = Comparison::new(result, measure);
    let last = comparison.advantage.last().copied().unwrap_or(0.0);

    let verdict = match comparison.final_verdict {
        Verdict::Buy => format!("Buying comes out ahead by ${:.0}", last),
        Verdict::Rent => format!("Renting comes out ahead by ${:.0}", -last),
        Verdict::Even => "Buying and renting come out even".to_string(),
    };
    println!("After {} months: {}", result.months(), verdict);

    match comparison.break_even_month {
        Some(month) => println!("Buying stays ahead from month {} (year {})", month, (month - 1) / 12 + 1),
        None => println!("Buying is not ahead at the end of the horizon"),
    }
}

fn sweep(path: &Path, rates: &[f64]) -> Result<()> {
    let request = request_from(path)?;
    let runner = ScenarioRunner::new();

    println!("{:>8} {:>12} {:>16} {:>16} {:>12}", "Rate", "Payment", "Buy Net (Tax)", "Rent Net (Tax)", "Break-even");
    println!("{}", "-".repeat(68));

    for (rate, result) in runner.sweep_mortgage_rates(&request, rates) {
        let result = result.with_context(|| format!("projection at {}% failed", rate))?;
        let summary = result.summary();
        let break_even = Comparison::new(&result, NetMeasure::AfterTax)
            .break_even_month
            .map_or_else(|| "never".to_string(), |m| format!("month {}", m));

        println!("{:>7.2}% {:>12.2} {:>16.0} {:>16.0} {:>12}",
            rate,
            summary.monthly_payment,
            summary.final_buy_net_after_tax,
            summary.final_rent_net_after_tax,
            break_even,
        );
    }

    Ok(())
}
