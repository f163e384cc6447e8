//! Evidence threshold and verification-time-to-evidence reports.
//!
//! Reads the participant log table and the per-arm milestone logs of an
//! experiment project and prints fixed-format reports.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use evidence::cli::{self, OutputFormat};
use evidence::exit_codes;
use evidence::io::config::ConfigOverrides;
use evidence::logging;

#[derive(Parser)]
#[command(
    name = "evidence",
    version,
    about = "Evidence threshold checks and verification time to evidence"
)]
struct Cli {
    /// Project root that relative input paths resolve against (default: cwd).
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Config file (default: `<root>/evidence.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase diagnostic output on stderr (`-v` info, `-vv` debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check effect direction, replication, and sensor corroboration thresholds.
    Check {
        /// Participant log CSV (overrides `logs_path`).
        #[arg(long)]
        logs: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Compute time to evidence for the academic and memetic arms.
    Vte {
        /// Academic milestone log (overrides `academic_milestones_path`).
        #[arg(long)]
        academic: Option<PathBuf>,
        /// Memetic milestone log (overrides `memetic_milestones_path`).
        #[arg(long)]
        memetic: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let root = match cli.root {
        Some(root) => root,
        None => cli::default_root()?,
    };
    match cli.command {
        Command::Check { logs, json } => {
            let overrides = ConfigOverrides {
                logs_path: logs,
                ..ConfigOverrides::default()
            };
            let cfg = cli::resolve_config(&root, cli.config.as_deref(), &overrides)?;
            cli::check(&cfg, OutputFormat::from_json_flag(json))
        }
        Command::Vte {
            academic,
            memetic,
            json,
        } => {
            let overrides = ConfigOverrides {
                academic_milestones_path: academic,
                memetic_milestones_path: memetic,
                ..ConfigOverrides::default()
            };
            let cfg = cli::resolve_config(&root, cli.config.as_deref(), &overrides)?;
            cli::vte(&cfg, OutputFormat::from_json_flag(json))
        }
    }
}
