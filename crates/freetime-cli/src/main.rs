//! `freetime` CLI — compute free workday slots from calendar occurrences.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for a week, occurrences read from stdin
//! cat calendar.json | freetime slots --start 2026-03-16 --end 2026-03-20
//!
//! # Custom workday and zone, pretty output to a file
//! freetime slots -i calendar.json --start 2026-03-16 --end 2026-03-20 \
//!   --timezone America/Los_Angeles --start-hour 8 --end-hour 16 --min-free 45 \
//!   -o slots.json --pretty
//!
//! # First free hour in the range
//! freetime first -i calendar.json --start 2026-03-16 --end 2026-03-20 --min-free 60
//!
//! # Settings from a TOML file ([workday] table), flags still win
//! freetime --config freetime.toml slots -i calendar.json --start 2026-03-16 --end 2026-03-16
//! ```

mod config;
mod input;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, Settings};
use crate::input::CalendarInput;

#[derive(Parser)]
#[command(
    name = "freetime",
    version,
    about = "Find free time within workday windows of a calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file with a [workday] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Free slots for every date in the range, as JSON keyed by date
    Slots {
        #[command(flatten)]
        range: RangeArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// The first free slot in the range, or null
    First {
        #[command(flatten)]
        range: RangeArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// First date (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,
    /// Last date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,
    /// Calendar JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// IANA time zone for all interval math (e.g., "America/Los_Angeles")
    #[arg(long)]
    timezone: Option<String>,
    /// Workday start hour (0-23)
    #[arg(long)]
    start_hour: Option<u32>,
    /// Workday end hour (1-24)
    #[arg(long)]
    end_hour: Option<u32>,
    /// Minimum free slot length in minutes
    #[arg(long)]
    min_free: Option<u32>,
}

impl RangeArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            timezone: self.timezone.clone(),
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            min_free_minutes: self.min_free,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Slots {
            range,
            output,
            pretty,
        } => {
            let workday = settings.into_workday(&range.overrides())?;
            let calendar = load_calendar(range.input.as_deref())?;

            let schedule =
                freetime_engine::compute_schedule(&calendar, range.start, range.end, &workday)
                    .context("Failed to compute free slots")?;
            info!(days = schedule.len(), "computed schedule");

            let json = if pretty {
                serde_json::to_string_pretty(&schedule)?
            } else {
                serde_json::to_string(&schedule)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::First { range, output } => {
            let workday = settings.into_workday(&range.overrides())?;
            let calendar = load_calendar(range.input.as_deref())?;

            let slot = freetime_engine::schedule::first_free_slot_in_range(
                &calendar,
                range.start,
                range.end,
                &workday,
                workday.min_free_duration(),
            )
            .context("Failed to search for a free slot")?;

            write_output(output.as_deref(), &serde_json::to_string(&slot)?)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable.
fn init_logging(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to set up logging: {}", e))
}

fn load_calendar(path: Option<&str>) -> Result<freetime_engine::Calendar> {
    let json = read_input(path)?;
    CalendarInput::parse(&json)?.into_calendar()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
