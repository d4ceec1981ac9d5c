use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "starmap")]
#[command(about = "Stars, levels and leaderboards for the village learning map")]
#[command(version)]
struct Cli {
    /// Working directory (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .starmap/config.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a student's dashboard
    Student {
        /// User id of the student
        user_id: String,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the class dashboard for a teacher
    Teacher {
        /// User id of the teacher
        user_id: String,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the student leaderboard
    Leaderboard {
        /// Only show the first N students
        #[arg(long)]
        top: Option<usize>,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new .starmap/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Student { user_id, json } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::student::student_command(&work_dir, &config, user_id, json).await?;
        }
        Commands::Teacher { user_id, json } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::teacher::teacher_command(&work_dir, &config, user_id, json).await?;
        }
        Commands::Leaderboard { top, json } => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::leaderboard::leaderboard_command(&work_dir, &config, top, json).await?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, cli.config, force).await?;
        }
    }

    Ok(())
}
