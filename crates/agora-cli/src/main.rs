//! agora - discussion forum CLI
//!
//! A small front end over the agora forum core: posts, threaded comments,
//! and up/down voting against a local file-backed store.
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize the local store and an identity
//! agora init
//!
//! # Create a post and vote on it
//! agora post create --community rust --title "Hello"
//! agora vote cast post <id> 1
//!
//! # Read a thread
//! agora post show <id>
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
