use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

mod commands;

use commands::{add, commit, init, log, rm, status};

#[derive(Parser)]
#[command(name = "gator")]
#[command(version, about = "Minimal local snapshot version control", long_about = None)]
struct Cli {
    /// Working directory of the repository
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    dir: PathBuf,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty repository in the working directory
    Init,

    /// Start tracking a file
    Add {
        /// Path relative to the working directory
        file: String,
    },

    /// Stop tracking a file
    Rm {
        /// Path relative to the working directory
        file: String,
    },

    /// Snapshot all tracked files
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// List tracked files
    Status,

    /// Show commit history
    Log {
        /// Number of commits to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print commits as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            match err.downcast_ref::<gator_core::Error>() {
                Some(core) => {
                    if !core.is_recoverable() {
                        eprintln!(
                            "hint: inspect {} before running further commands",
                            gator_core::META_DIR
                        );
                    }
                    ExitCode::from(core.exit_code())
                }
                None => ExitCode::from(2),
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let dir = cli.dir;

    match cli.command {
        Commands::Init => init::run(&dir)?,
        Commands::Add { file } => add::run(&dir, &file)?,
        Commands::Rm { file } => rm::run(&dir, &file)?,
        Commands::Commit { message } => commit::run(&dir, &message)?,
        Commands::Status => status::run(&dir)?,
        Commands::Log { limit, json } => log::run(&dir, limit, json)?,
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
