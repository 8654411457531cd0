//! Command-line front end for the SIP and goal calculators
//!
//! Prints the same figures the site's calculators display, and exports the
//! yearly schedule as CSV for comparison with spreadsheets.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sip_planner::calculator::{export_schedule_csv, sweep, write_schedule_csv, yearly_schedule};
use sip_planner::format::{format_inr, format_inr_compact};
use sip_planner::input::parse_amount;
use sip_planner::quotes::{CsvQuoteSource, QuoteBoard};
use sip_planner::{ContributionPlan, GoalTarget, PlannerConfig, ProjectionResult};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sip-calc", version, about = "SIP and goal-based investment calculator")]
struct Cli {
    /// Emit JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the maturity value of a monthly SIP
    Project {
        /// Monthly contribution, e.g. 5000 or "₹5,000"
        #[arg(long)]
        amount: String,
        #[command(flatten)]
        horizon: Horizon,
    },
    /// Solve for the monthly SIP needed to reach a target corpus
    Goal {
        /// Target maturity value, e.g. 10000000
        #[arg(long)]
        target: String,
        #[command(flatten)]
        horizon: Horizon,
    },
    /// Year-by-year breakdown of a SIP
    Schedule {
        #[arg(long)]
        amount: String,
        #[command(flatten)]
        horizon: Horizon,
        /// Write CSV here instead of printing a table
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Maturity values across several rates and horizons
    Sweep {
        #[arg(long)]
        amount: String,
        /// Comma-separated annual rates in percent
        #[arg(long, value_delimiter = ',', default_values_t = [8.0, 10.0, 12.0, 14.0])]
        rates: Vec<f64>,
        /// Comma-separated horizons in years
        #[arg(long, value_delimiter = ',', default_values_t = [5, 10, 15, 20])]
        years: Vec<u32>,
    },
    /// Show the ticker list and where it came from
    Quotes {
        /// Quote feed CSV (overrides SIP_QUOTES_CSV)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct Horizon {
    /// Expected annual return in percent
    #[arg(long, default_value = "12")]
    rate: String,
    /// Horizon in years
    #[arg(long, conflicts_with = "months")]
    years: Option<u32>,
    /// Horizon in months
    #[arg(long)]
    months: Option<u32>,
}

impl Horizon {
    fn rate(&self) -> Result<f64> {
        Ok(parse_amount("rate", &self.rate)?)
    }

    fn months(&self) -> Result<u32> {
        match (self.years, self.months) {
            (_, Some(months)) => Ok(months),
            (Some(years), None) => Ok(years.saturating_mul(12)),
            (None, None) => bail!("one of --years or --months is required"),
        }
    }
}

fn print_projection(result: &ProjectionResult) {
    println!("  Invested amount: {:>16}", format_inr(result.total_contributed));
    println!("  Est. returns:    {:>16}", format_inr(result.total_growth));
    println!(
        "  Total value:     {:>16}  ({})",
        format_inr(result.maturity_value),
        format_inr_compact(result.maturity_value)
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = PlannerConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::Project { amount, horizon } => {
            let plan = ContributionPlan::new(
                parse_amount("amount", &amount)?,
                horizon.rate()?,
                horizon.months()?,
            );
            let result = plan.project();
            if cli.json {
                println!("{}", serde_json::json!({ "plan": plan, "result": result }));
            } else {
                println!(
                    "SIP of {}/month at {}% for {} months",
                    format_inr(plan.periodic_amount),
                    plan.annual_rate_percent,
                    plan.duration_months
                );
                print_projection(&result);
            }
        }
        Command::Goal { target, horizon } => {
            let target = GoalTarget::new(parse_amount("target", &target)?);
            let rate = horizon.rate()?;
            let months = horizon.months()?;
            let goal = target.solve(rate, months);
            if cli.json {
                println!("{}", serde_json::to_string(&goal)?);
            } else {
                println!(
                    "Goal of {} at {}% in {} months",
                    format_inr(target.target_maturity_value),
                    rate,
                    months
                );
                println!("  Monthly SIP needed: {:>13}", format_inr(goal.required_periodic_amount));
                print_projection(&goal.projection);
            }
        }
        Command::Schedule { amount, horizon, output } => {
            let plan = ContributionPlan::new(
                parse_amount("amount", &amount)?,
                horizon.rate()?,
                horizon.months()?,
            );
            match output {
                Some(path) => {
                    let count = export_schedule_csv(&plan, &path)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!("{} rows written to {}", count, path.display());
                }
                None if cli.json => println!("{}", serde_json::to_string(&yearly_schedule(&plan))?),
                None => write_schedule_csv(&yearly_schedule(&plan), io::stdout().lock())?,
            }
        }
        Command::Sweep { amount, rates, years } => {
            let amount = parse_amount("amount", &amount)?;
            let durations: Vec<u32> = years.iter().map(|y| y.saturating_mul(12)).collect();
            let cells = sweep(amount, &rates, &durations);
            if cli.json {
                println!("{}", serde_json::to_string(&cells)?);
            } else {
                print!("{:>8}", "Rate");
                for y in &years {
                    print!(" {:>14}", format!("{y}y"));
                }
                println!();
                for (row, rate) in cells.chunks(durations.len().max(1)).zip(&rates) {
                    print!("{:>7}%", rate);
                    for cell in row {
                        print!(" {:>14}", format_inr_compact(cell.result.maturity_value));
                    }
                    println!();
                }
            }
        }
        Command::Quotes { csv } => {
            let board = match csv {
                Some(path) => QuoteBoard::with_static_fallback(
                    Box::new(CsvQuoteSource::new(path)),
                    config.quote_ttl(),
                ),
                None => config.quote_board(),
            };
            let snapshot = board.current()?;
            if cli.json {
                println!("{}", serde_json::to_string(&snapshot)?);
            } else {
                println!("Quotes from {} ({:?}) as of {}", snapshot.source, snapshot.freshness, snapshot.as_of);
                for quote in &snapshot.quotes {
                    let arrow = if quote.is_up() { "▲" } else { "▼" };
                    println!(
                        "  {:<10} {:>12.2} {} {:>+9.2} ({:+.2}%)",
                        quote.symbol, quote.price, arrow, quote.change, quote.change_percent
                    );
                }
            }
        }
    }

    Ok(())
}
