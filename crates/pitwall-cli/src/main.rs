//! Pitwall CLI
//!
//! Head-to-head driver comparisons over a directory of race result tables.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pitwall_cli::commands::{self, OutputFormat};
use pitwall_cli::{Config, load_engine, log_level};

#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(about = "Compare two drivers head to head over historical race results")]
struct Args {
    /// Directory holding drivers.csv, races.csv, results.csv and circuits.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Number of catalog entries that numeric selections index into
    #[arg(long, global = true)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List drivers, most starts first
    Catalog,

    /// Resolve a name, code, reference or catalog number to one driver
    Resolve { query: String },

    /// Compare two drivers over the races they shared
    H2h {
        /// First driver (name, code, reference or catalog number)
        #[arg(required_unless_present = "pair")]
        driver_a: Option<String>,

        /// Second driver
        #[arg(required_unless_present = "pair")]
        driver_b: Option<String>,

        /// Both drivers as "A, B"
        #[arg(long, conflicts_with_all = ["driver_a", "driver_b"])]
        pair: Option<String>,

        /// First season to include
        #[arg(long)]
        from: Option<i32>,

        /// Last season to include
        #[arg(long)]
        to: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Subscriber first, so configuration warnings are not lost
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(|key| env::var(key).ok())))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();

    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(limit) = args.limit {
        config.suggestion_limit = limit;
    }

    match run(args.command, &config) {
        Ok(output) => {
            if output.ends_with('\n') {
                print!("{output}");
            } else {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let status = commands::exit_status(&err);
            if status == 2 {
                eprintln!("{err}");
            } else {
                tracing::error!("Command failed: {err:#}");
                eprintln!("error: {err:#}");
            }
            ExitCode::from(status)
        }
    }
}

fn run(command: Command, config: &Config) -> Result<String> {
    let engine = load_engine(config)?;
    let limit = config.suggestion_limit;

    let output = match command {
        Command::Catalog => commands::catalog(&engine, limit),
        Command::Resolve { query } => commands::resolve(&engine, &query, limit)?,
        Command::H2h {
            driver_a,
            driver_b,
            pair,
            from,
            to,
            format,
        } => {
            let (a, b) = commands::driver_tokens(driver_a, driver_b, pair.as_deref())?;
            commands::h2h(&engine, (&a, &b), (from, to), limit, format)?
        }
    };
    Ok(output)
}
