//! Command implementations for the TMX CLI.
//!
//! Every subcommand loads a daily temperature CSV (local path or URL),
//! aggregates the trailing years into the month grid and then exports,
//! renders or inspects it.

use clap::{Args, Subcommand};
use tmx_core::mode::Mode;
use tmx_core::month::MonthKey;
use tmx_data::config::WINDOW_YEARS_DEFAULT;

pub mod export;
pub mod inspect;
pub mod load;

/// Input file used when `--input` is not given.
pub const DEFAULT_INPUT: &str = "temperature_daily.csv";

/// Where to read records from and how many years to keep.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Daily temperature CSV: a local path or an http(s) URL
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Number of most recent calendar years to show
    #[arg(
        short = 'n',
        long,
        default_value_t = WINDOW_YEARS_DEFAULT as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub years: u64,
}

impl SourceArgs {
    pub fn window_years(&self) -> anyhow::Result<usize> {
        Ok(usize::try_from(self.years)?)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate daily records into the month grid and write it as JSON
    Aggregate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output path for the grid JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render the matrix to an SVG file
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Statistic that colors the cells: max or min
        #[arg(short, long, default_value_t = Mode::Max)]
        mode: Mode,

        /// JSON file overriding matrix geometry and colors
        #[arg(short, long)]
        layout: Option<String>,

        /// Output path for the SVG document
        #[arg(short, long)]
        output: String,
    },

    /// Print the tooltip text for one month
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Statistic reported as selected: max or min
        #[arg(short, long, default_value_t = Mode::Max)]
        mode: Mode,

        /// Month to describe, as YYYY-MM
        #[arg(long)]
        month: MonthKey,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Aggregate { source, output } => {
            export::run_aggregate(&source, output.as_deref()).await
        }
        Command::Render {
            source,
            mode,
            layout,
            output,
        } => export::run_render(&source, mode, layout.as_deref(), &output).await,
        Command::Inspect {
            source,
            mode,
            month,
        } => {
            let text = inspect::run_inspect(&source, mode, month).await?;
            println!("{text}");
            Ok(())
        }
    }
}
