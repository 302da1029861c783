//! Hackathon — team registration and selection-status CLI.
//!
//! # Usage
//!
//! ```text
//! hackathon apply --team <name> --lead-name <name> --lead-email <email>
//!                 --member "<name>:<email>" --member ... [--experience <level>]
//! hackathon submit <application-id> --name <name> --theme <theme>
//!                  --description <text> --tech-stack <stack> [--link <url>]
//! hackathon status <application-id | team name> [--json]
//! hackathon select <application-id>
//! hackathon reject <application-id>
//! hackathon stats [--json]
//! hackathon list [--status pending|selected|rejected] [--json]
//! ```

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    apply::ApplyArgs, list::ListArgs, review::ReviewArgs, stats::StatsArgs,
    status::StatusArgs, submit::SubmitArgs,
};
use hackathon_core::{ApplicationStatus, RegistryError};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "hackathon",
    version,
    about = "Register hackathon teams, collect projects and check selection status",
    long_about = None,
)]
struct Cli {
    /// Directory holding the snapshot files. Defaults to the configured
    /// `data_dir`, else ~/.hackathon
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a team application.
    Apply(ApplyArgs),

    /// Submit the project for an application.
    Submit(SubmitArgs),

    /// Check an application's selection status by ID or team name.
    Status(StatusArgs),

    /// Mark an application as selected (admin).
    Select(ReviewArgs),

    /// Mark an application as rejected (admin).
    Reject(ReviewArgs),

    /// Show application, project and selection counts.
    Stats(StatsArgs),

    /// List applications (admin).
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Shared status argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ApplicationStatus` from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct StatusArg(pub ApplicationStatus);

impl FromStr for StatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self(ApplicationStatus::Pending)),
            "selected" => Ok(Self(ApplicationStatus::Selected)),
            "rejected" => Ok(Self(ApplicationStatus::Rejected)),
            other => Err(format!(
                "unknown status '{other}'; expected: pending, selected, rejected"
            )),
        }
    }
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<StatusArg> for ApplicationStatus {
    fn from(s: StatusArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Exit status for input the registry refused (duplicate team, unknown id, ...).
const EXIT_REJECTED: i32 = 2;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli.data_dir;
    let result = match cli.command {
        Commands::Apply(args) => args.run(data_dir),
        Commands::Submit(args) => args.run(data_dir),
        Commands::Status(args) => args.run(data_dir),
        Commands::Select(args) => args.run(data_dir, ApplicationStatus::Selected),
        Commands::Reject(args) => args.run(data_dir, ApplicationStatus::Rejected),
        Commands::Stats(args) => args.run(data_dir),
        Commands::List(args) => args.run(data_dir),
    };

    // Rejected input gets a one-line message and its own exit status;
    // store and config failures keep anyhow's full report.
    if let Err(err) = &result {
        if err
            .downcast_ref::<RegistryError>()
            .is_some_and(RegistryError::is_validation)
        {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_REJECTED);
        }
    }
    result
}

/// Logs go to stderr; `HACKATHON_LOG` wins over `RUST_LOG`, default `warn`.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env("HACKATHON_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
