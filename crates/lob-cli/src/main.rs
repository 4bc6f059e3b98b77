use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lob")]
#[command(about = "Trading time-step translator CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> overrides)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a time step to its `YYYY-MM-DD HH:MM` timestamp
    Time {
        /// Non-negative time step
        #[arg(long)]
        step: u64,
    },

    /// Convert a `YYYY-MM-DD HH:MM` timestamp to its time step
    Step {
        /// Timestamp, e.g. "2019-01-02 09:30"
        #[arg(long)]
        time: String,
    },

    /// Print calendar size, max supported step and cache size
    Stats,

    /// List trading days with the first step of each
    Days {
        /// First date to list (YYYY-MM-DD); defaults to horizon start
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to list (YYYY-MM-DD); defaults to horizon end
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Validate layered config: unused keys, schedule, horizon, holidays
    ConfigCheck {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Fail on unused keys instead of warning
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience).
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let config_paths = &cli.config_paths;

    match cli.cmd {
        Commands::Time { step } => commands::convert::time(step, config_paths)?,
        Commands::Step { time } => commands::convert::step(&time, config_paths)?,
        Commands::Stats => commands::convert::stats(config_paths)?,
        Commands::Days { from, to } => commands::convert::days(from, to, config_paths)?,
        Commands::ConfigHash { paths } => commands::config::config_hash(&paths)?,
        Commands::ConfigCheck { paths, strict } => {
            commands::config::config_check(&paths, strict)?
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays `key=value` only. Quiet unless
/// `RUST_LOG` asks for more.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}
