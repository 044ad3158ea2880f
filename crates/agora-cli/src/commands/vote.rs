//! Vote commands

use anyhow::{Context, Result};
use clap::Subcommand;
use std::sync::Arc;
use uuid::Uuid;

use agora_core::vote::{VotableKind, VotableRef, VoteEngine, VoteLedger};

use super::Cli;

/// Vote subcommands
#[derive(Debug, Subcommand)]
pub enum VoteCommand {
    /// Cast, change, or retract a vote (value: 1, -1, or 0 to retract)
    Cast {
        /// Votable kind: "post" or "comment"
        kind: String,

        /// Votable ID
        id: String,

        /// Vote value: 1, -1, or 0
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },

    /// Show the counter and your current vote on a votable
    Show {
        /// Votable kind: "post" or "comment"
        kind: String,

        /// Votable ID
        id: String,
    },
}

/// Execute a vote command
pub fn execute(cli: &Cli, cmd: &VoteCommand) -> Result<()> {
    let store = Arc::new(super::open_store(cli)?);
    let engine = VoteEngine::with_ledger(store as Arc<dyn VoteLedger>);

    match cmd {
        VoteCommand::Cast { kind, id, value } => cast(cli, &engine, kind, id, *value),
        VoteCommand::Show { kind, id } => show(cli, &engine, kind, id),
    }
}

fn cast(cli: &Cli, engine: &VoteEngine, kind: &str, id: &str, value: i64) -> Result<()> {
    use colored::Colorize;

    let user = super::resolve_user(cli)?;
    let raw_id = parse_id(id)?;

    let outcome = engine.submit_raw(&user, kind, raw_id, value)?;

    let state = match outcome.vote {
        Some(direction) => format!("{}voted", direction).cyan(),
        None => "no vote".dimmed(),
    };
    println!(
        "{} delta {:+}, now {}",
        "✓".green(),
        outcome.applied_delta,
        state
    );
    Ok(())
}

fn show(cli: &Cli, engine: &VoteEngine, kind: &str, id: &str) -> Result<()> {
    use colored::Colorize;

    let user = super::resolve_user(cli)?;
    let kind = VotableKind::parse(kind)?;
    let votable = VotableRef::new(kind, parse_id(id)?);

    let count = engine.vote_count(&votable)?;
    let vote = engine.current_vote(&user, &votable)?;

    println!("{} {}", votable.to_string().dimmed(), count.to_string().bold());
    match vote {
        Some(direction) => println!("your vote: {}", direction),
        None => println!("your vote: none"),
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid votable id: {}", raw))
}
