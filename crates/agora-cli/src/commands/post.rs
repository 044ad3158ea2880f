//! Post commands
//!
//! Create, list, show, and delete posts. `show` prints the full comment
//! thread assembled from the flat rows.

use anyhow::{Context, Result};
use clap::Subcommand;

use agora_core::comment::{assemble, CommentNode, CommentStore};
use agora_core::post::{paginate, sort_feed, FeedSort, Post, PostStore};
use agora_core::types::PostId;

use super::Cli;

/// Post subcommands
#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Create a new post
    Create {
        /// Community to post in
        #[arg(long, short)]
        community: String,

        /// Post title
        #[arg(long, short)]
        title: String,

        /// Optional body text
        #[arg(long, short)]
        body: Option<String>,
    },

    /// List posts as a feed
    List {
        /// Sort order: "new" or "top"
        #[arg(long, short)]
        sort: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Posts per page
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a post with its comment thread
    Show {
        /// Post ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a post
    Delete {
        /// Post ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

/// Execute a post command
pub fn execute(cli: &Cli, cmd: &PostCommand) -> Result<()> {
    let store = super::open_store(cli)?;

    match cmd {
        PostCommand::Create {
            community,
            title,
            body,
        } => create(cli, &store, community, title, body.as_deref()),
        PostCommand::List {
            sort,
            page,
            limit,
            json,
        } => list(cli, &store, sort.as_deref(), *page, *limit, *json),
        PostCommand::Show { id, json } => show(&store, id, *json),
        PostCommand::Delete { id, yes } => delete(&store, id, *yes),
    }
}

fn create(
    cli: &Cli,
    store: &impl PostStore,
    community: &str,
    title: &str,
    body: Option<&str>,
) -> Result<()> {
    use colored::Colorize;

    let user = super::resolve_user(cli)?;
    let mut post = Post::new(user, community, title);
    if let Some(body) = body {
        post = post.with_body(body);
    }
    store.save_post(&post)?;

    println!("{} Created post {}", "+".green(), post.id.to_string().cyan());
    Ok(())
}

fn list(
    cli: &Cli,
    store: &impl PostStore,
    sort: Option<&str>,
    page: usize,
    limit: Option<usize>,
    as_json: bool,
) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(cli)?;
    let sort = sort
        .map(FeedSort::parse)
        .unwrap_or_else(|| FeedSort::parse(&config.feed.default_sort));
    let limit = limit.unwrap_or(config.feed.page_size);

    let mut posts = store.list_posts()?;
    sort_feed(&mut posts, sort);
    let feed = paginate(posts, page, limit);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
        return Ok(());
    }

    if feed.posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    for post in &feed.posts {
        println!(
            "{:>5}  {}  {}  {}",
            post.vote_count,
            post.id.to_string().dimmed(),
            post.community.cyan(),
            post.title.bold()
        );
    }
    println!();
    println!(
        "Page {}/{} ({} posts)",
        feed.page, feed.total_pages, feed.total_posts
    );
    Ok(())
}

fn show<S: PostStore + CommentStore>(store: &S, id: &str, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let id = PostId::from_string(id).with_context(|| format!("Invalid post id: {}", id))?;
    let post = store.get_post(&id)?;
    let thread = assemble(store.comments_for_post(&id)?);

    if as_json {
        let value = serde_json::json!({ "post": post, "comments": thread });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", post.title.bold(), post.community.cyan());
    println!(
        "{} points · {} · {}",
        post.vote_count,
        post.user_id.to_string().dimmed(),
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(body) = &post.body {
        println!();
        println!("{}", body);
    }
    if !thread.is_empty() {
        println!();
        for node in &thread {
            print_node(node, 0);
        }
    }
    Ok(())
}

fn print_node(node: &CommentNode, depth: usize) {
    use colored::Colorize;

    let indent = "  ".repeat(depth);
    println!(
        "{}{} {} · {}",
        indent,
        format!("[{:+}]", node.comment.vote_count).dimmed(),
        node.comment.content,
        node.comment.user_id.to_string().dimmed()
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn delete(store: &impl PostStore, id: &str, yes: bool) -> Result<()> {
    use colored::Colorize;

    let id = PostId::from_string(id).with_context(|| format!("Invalid post id: {}", id))?;
    let post = store.get_post(&id)?;

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete post \"{}\" and all its comments?", post.title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.delete_post(&id)?;
    println!("{} Deleted post {}", "-".red(), id);
    Ok(())
}
