//! Memorial Register CLI
//!
//! Loads a death register export and prints the derived views as JSON.

mod commands;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use register::systems::{FilterCriteria, SortKey};
use state::AppState;

#[derive(Parser)]
#[command(name = "register-cli")]
#[command(about = "Death register analytics and memorial calendar")]
struct Cli {
    /// JSON file of death records (bare list or API response)
    #[arg(long, global = true, env = "REGISTER_RECORDS")]
    records: Option<PathBuf>,
    /// JSON reporting config
    #[arg(long, global = true, env = "REGISTER_CONFIG")]
    config: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<String>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filtered, sorted register listing
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Cohort and trend statistics
    Stats {
        /// Trailing window in months (snapped to 6, 12 or 24)
        #[arg(long, allow_negative_numbers = true)]
        window: Option<i64>,
    },
    /// Memorial calendar for one month
    Calendar {
        /// YYYY-MM; defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Anniversaries coming up soon
    Upcoming {
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Every view combined into one versioned document
    Report {
        #[arg(long)]
        month: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SortArg {
    DateOfDeath,
    Name,
    FuneralDate,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::DateOfDeath => SortKey::DateOfDeath,
            SortArg::Name => SortKey::Name,
            SortArg::FuneralDate => SortKey::FuneralDate,
        }
    }
}

impl FilterArgs {
    fn criteria(self, default_sort: SortKey) -> FilterCriteria {
        FilterCriteria {
            search_term: self.search,
            year: self.year,
            sort_key: self.sort.map(SortKey::from).unwrap_or(default_sort),
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = AppState::load(
        cli.records.as_deref(),
        cli.config.as_deref(),
        cli.today.as_deref(),
    )?;
    let default_sort = state.config.default_sort;

    match cli.command {
        Command::List { filter } => {
            print_json(&commands::records::list_records(&state, &filter.criteria(default_sort)))
        }
        Command::Stats { window } => print_json(&commands::statistics::get_statistics(&state, window)),
        Command::Calendar { month } => {
            print_json(&commands::calendar::get_month(&state, month.as_deref())?)
        }
        Command::Upcoming { days, limit } => {
            print_json(&commands::calendar::get_upcoming(&state, days, limit))
        }
        Command::Report { month, filter, out } => {
            let json = commands::report::render_report(
                &state,
                month.as_deref(),
                filter.criteria(default_sort),
            )?;
            match out {
                Some(path) => commands::report::write_report(&json, &path),
                None => {
                    println!("{json}");
                    Ok(())
                }
            }
        }
        Command::Config => print_json(&commands::config::get_config(&state)),
    }
}
