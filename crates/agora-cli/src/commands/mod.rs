//! CLI commands module

pub mod comment;
pub mod init;
pub mod post;
pub mod vote;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use agora_core::config::Config;
use agora_core::types::UserId;
use agora_storage::FileStore;

/// agora - discussion forum backend CLI
#[derive(Debug, Parser)]
#[command(name = "agora")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Data directory (default: platform data dir)
    #[arg(long, global = true, env = "AGORA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Act as this user id instead of the stored identity
    #[arg(long = "as", global = true, value_name = "USER_ID")]
    pub as_user: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize the local store and identity
    Init(init::InitArgs),

    /// Manage posts
    #[command(subcommand)]
    Post(post::PostCommand),

    /// Manage comments
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// Cast and inspect votes
    #[command(subcommand)]
    Vote(vote::VoteCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Init(args) => init::execute(&cli, args),
        Commands::Post(cmd) => post::execute(&cli, cmd),
        Commands::Comment(cmd) => comment::execute(&cli, cmd),
        Commands::Vote(cmd) => vote::execute(&cli, cmd),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Resolve the data directory from flag or platform default
pub fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(|| {
        directories::ProjectDirs::from("org", "agora", "agora")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".agora")
            })
    })
}

/// Open the store at the resolved data directory
pub fn open_store(cli: &Cli) -> Result<FileStore> {
    let dir = data_dir(cli);
    FileStore::open(&dir).with_context(|| format!("Failed to open store at {}", dir.display()))
}

/// Load the configuration file, falling back to defaults
pub fn load_config(cli: &Cli) -> Result<Config> {
    let path = data_dir(cli).join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the acting user: --as flag, then the stored identity
pub fn resolve_user(cli: &Cli) -> Result<UserId> {
    if let Some(raw) = &cli.as_user {
        return UserId::from_string(raw).with_context(|| format!("Invalid user id: {}", raw));
    }

    let path = data_dir(cli).join("identity");
    let raw = std::fs::read_to_string(&path)
        .context("No identity found. Run 'agora init' first or pass --as <user-id>")?;
    UserId::from_string(raw.trim()).context("Stored identity is corrupt; re-run 'agora init'")
}
