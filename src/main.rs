use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skillmatch::AppConfig;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Skill-based job recommender", long_about = None)]
struct Cli {
    /// Config file (default: ~/.skillmatch/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the engine and serve recommendations over HTTP
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Rank jobs for a list of skills
    Recommend {
        /// Skills to match (e.g. Python SQL "Machine Learning")
        skills: Vec<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Replace generated postings with synthetic data
    Seed {
        /// Number of postings to generate
        #[arg(short, long, default_value_t = 1000)]
        count: usize,

        /// RNG seed for a reproducible catalog
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a curated job posting
    AddJob(commands::add_job::AddJobArgs),

    /// List every job posting, curated first
    Jobs {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List registered skills
    Skills {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show catalog and engine statistics
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            let options = commands::serve::ServeOptions {
                host: host.unwrap_or_else(|| config.serve.host.clone()),
                port: port.unwrap_or(config.serve.port),
            };
            commands::serve::execute(&config, options)?;
        }
        Commands::Recommend { skills, json } => {
            commands::recommend::execute(&config, &skills, json)?;
        }
        Commands::Seed { count, seed } => {
            commands::seed::execute(&config, count, seed)?;
        }
        Commands::AddJob(args) => {
            commands::add_job::execute(&config, args)?;
        }
        Commands::Jobs { json } => {
            commands::jobs::execute(&config, json)?;
        }
        Commands::Skills { json } => {
            commands::skills::execute(&config, json)?;
        }
        Commands::Stats { json } => {
            commands::stats::execute(&config, json)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => "warn,skillmatch=info",
        1 => "info,skillmatch=debug",
        _ => "debug,skillmatch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
