//! u-judging command line.
//!
//! Reads a JSON `ScheduleRequest` (or synthesises one in demo mode), runs
//! the scheduler and prints the `ScheduleOutcome` as JSON on stdout.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_judging::demo::demo_request;
use u_judging::request::{ScheduleOutcome, ScheduleRequest, DEFAULT_MAX_ATTEMPTS};
use u_judging::scheduler::JudgingScheduler;

/// u-judging - judge-to-table scheduler for project fairs
#[derive(Parser, Debug)]
#[command(name = "u-judging")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error or an EnvFilter directive).
    /// Falls back to RUST_LOG, then info, when unset.
    #[arg(long, env = "U_JUDGING_LOG")]
    log_level: Option<String>,

    /// Pretty-print the JSON outcome
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Schedule a request read from a JSON file ("-" for stdin)
    Run {
        /// Path to the request file
        config: PathBuf,

        /// Override the request's seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Schedule a synthetic roster
    Demo {
        /// Number of judges
        #[arg(short, long, default_value = "20")]
        judges: usize,

        /// Number of projects
        #[arg(short, long, default_value = "50")]
        projects: usize,

        /// Judgings per project
        #[arg(short = 'k', long, default_value = "3")]
        judgings: usize,

        /// Number of rooms
        #[arg(short, long, default_value = "4")]
        rooms: usize,

        /// Per-room capacities, comma separated
        #[arg(long, value_delimiter = ',')]
        capacities: Option<Vec<usize>>,

        /// Seed for roster and schedule
        #[arg(long)]
        seed: Option<u64>,

        /// Attempt bound
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    u_judging::logging::init(cli.log_level.as_deref());

    let request = match cli.command {
        Commands::Run { config, seed } => {
            let mut request = read_request(&config)?;
            if seed.is_some() {
                request.seed = seed;
            }
            request
        }
        Commands::Demo {
            judges,
            projects,
            judgings,
            rooms,
            capacities,
            seed,
            max_attempts,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut request = demo_request(judges, projects, judgings, rooms, &mut rng)
                .with_max_attempts(max_attempts);
            if let Some(capacities) = capacities {
                request = request.with_room_capacities(capacities);
            }
            if let Some(seed) = seed {
                request = request.with_seed(seed);
            }
            request
        }
    };

    let outcome = JudgingScheduler::new()
        .generate_schedule(&request)
        .context("invalid judging configuration")?;

    print_outcome(&outcome, cli.pretty)?;

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn read_request(path: &Path) -> Result<ScheduleRequest> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse request {}", path.display()))
}

fn print_outcome(outcome: &ScheduleOutcome, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(outcome)
    } else {
        serde_json::to_string(outcome)
    }
    .context("failed to serialize outcome")?;
    println!("{json}");
    Ok(())
}
