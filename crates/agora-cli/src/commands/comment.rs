//! Comment commands

use anyhow::{Context, Result};
use clap::Subcommand;

use agora_core::comment::{Comment, CommentStore, CommentValidator};
use agora_core::types::{CommentId, PostId};

use super::Cli;

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Add a comment to a post
    Add {
        /// Post ID
        post: String,

        /// Comment content
        #[arg(long, short)]
        content: String,

        /// Reply to this comment
        #[arg(long, short)]
        parent: Option<String>,
    },

    /// Delete a comment
    Delete {
        /// Comment ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute a comment command
pub fn execute(cli: &Cli, cmd: &CommentCommand) -> Result<()> {
    let store = super::open_store(cli)?;

    match cmd {
        CommentCommand::Add {
            post,
            content,
            parent,
        } => add(cli, &store, post, content, parent.as_deref()),
        CommentCommand::Delete { id, yes } => delete(&store, id, *yes),
    }
}

fn add(
    cli: &Cli,
    store: &impl CommentStore,
    post: &str,
    content: &str,
    parent: Option<&str>,
) -> Result<()> {
    use colored::Colorize;

    let user = super::resolve_user(cli)?;
    let config = super::load_config(cli)?;
    let post_id = PostId::from_string(post).with_context(|| format!("Invalid post id: {}", post))?;

    CommentValidator::with_max_length(config.comment.max_length).validate_content(content)?;

    let comment = match parent {
        Some(raw) => {
            let parent_id =
                CommentId::from_string(raw).with_context(|| format!("Invalid comment id: {}", raw))?;
            let parent = store.get_comment(&parent_id)?;
            anyhow::ensure!(
                parent.post_id == post_id,
                "Parent comment belongs to a different post"
            );
            Comment::reply(post_id, user, parent_id, content)
        }
        None => Comment::new(post_id, user, content),
    };

    store.save_comment(&comment)?;
    println!(
        "{} Added comment {}",
        "+".green(),
        comment.id.to_string().cyan()
    );
    Ok(())
}

fn delete(store: &impl CommentStore, id: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let id = CommentId::from_string(id).with_context(|| format!("Invalid comment id: {}", id))?;
    let comment = store.get_comment(&id)?;

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete comment \"{}\"? Replies will no longer be shown.",
                comment.content
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.delete_comment(&id)?;
    println!("{} Deleted comment {}", "-".red(), id);
    Ok(())
}
