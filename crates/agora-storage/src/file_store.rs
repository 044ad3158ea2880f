//! File system backed forum storage

use crate::state::{State, StateFile};
use agora_core::comment::{Comment, CommentStore};
use agora_core::error::{AgoraError, Result};
use agora_core::post::{Post, PostStore};
use agora_core::types::{CommentId, PostId, UserId};
use agora_core::vote::{Reconciliation, VoteDirection, VoteLedger, VotableRef, VoteOutcome};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const STATE_FILE: &str = "forum.json";
const TEMP_FILE: &str = ".forum.json.tmp";

/// File system backed store
///
/// Holds the whole forum in memory under one mutex and writes a JSON
/// snapshot after every mutation, temp-file first and then an atomic
/// rename. A failed write rolls the in-memory state back, so no caller
/// observes a half-applied mutation.
pub struct FileStore {
    base_dir: PathBuf,
    state: Mutex<State>,
}

impl FileStore {
    /// Open a store in the given directory, loading existing state if any
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(|e| {
                AgoraError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create data directory: {}", e),
                ))
            })?;
            debug!("Created data directory: {:?}", base_dir);
        }

        let state_path = base_dir.join(STATE_FILE);
        let state = if state_path.exists() {
            let file = fs::File::open(&state_path)?;
            let reader = BufReader::new(file);
            let state_file: StateFile = serde_json::from_reader(reader)?;
            let state = State::from_file(state_file)?;
            info!(
                posts = state.posts.len(),
                comments = state.comments.len(),
                votes = state.votes.len(),
                "Loaded forum state"
            );
            state
        } else {
            State::default()
        };

        Ok(Self {
            base_dir,
            state: Mutex::new(state),
        })
    }

    /// Open a store at the default platform location (~/.agora or similar)
    pub fn default_location() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("org", "agora", "agora")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".agora")
            });
        Self::open(base_dir)
    }

    /// Base directory of this store
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AgoraError::StorageConflict("store lock poisoned".to_string()))
    }

    /// Write the state snapshot atomically (temp file, then rename)
    fn persist(&self, state: &State) -> Result<()> {
        let temp_path = self.base_dir.join(TEMP_FILE);
        let final_path = self.base_dir.join(STATE_FILE);

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            AgoraError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &state.to_file())?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AgoraError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved forum state to {:?}", final_path);
        Ok(())
    }

    /// Run a mutation and persist, rolling back on a failed write.
    ///
    /// The lock is held across mutation and persist so snapshots on disk
    /// never interleave between concurrent mutations.
    fn mutate<T>(&self, op: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        let mut state = self.lock()?;
        let backup = state.clone();
        let value = match op(&mut state) {
            Ok(value) => value,
            Err(e) => {
                *state = backup;
                return Err(e);
            }
        };
        if let Err(e) = self.persist(&state) {
            *state = backup;
            return Err(e);
        }
        Ok(value)
    }
}

impl PostStore for FileStore {
    fn save_post(&self, post: &Post) -> Result<()> {
        self.mutate(|state| state.upsert_post(post))
    }

    fn get_post(&self, id: &PostId) -> Result<Post> {
        self.lock()?.get_post(id)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.lock()?.posts.values().cloned().collect())
    }

    fn delete_post(&self, id: &PostId) -> Result<()> {
        self.mutate(|state| state.remove_post(id))
    }

    fn post_exists(&self, id: &PostId) -> bool {
        self.lock()
            .map(|state| state.posts.contains_key(id))
            .unwrap_or(false)
    }
}

impl CommentStore for FileStore {
    fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.mutate(|state| state.upsert_comment(comment))
    }

    fn get_comment(&self, id: &CommentId) -> Result<Comment> {
        self.lock()?.get_comment(id)
    }

    fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        Ok(self.lock()?.comments_for_post(post_id))
    }

    fn delete_comment(&self, id: &CommentId) -> Result<()> {
        self.mutate(|state| state.remove_comment(id))
    }

    fn comment_exists(&self, id: &CommentId) -> bool {
        self.lock()
            .map(|state| state.comments.contains_key(id))
            .unwrap_or(false)
    }
}

impl VoteLedger for FileStore {
    fn transact(
        &self,
        user: &UserId,
        votable: &VotableRef,
        decide: &dyn Fn(Option<VoteDirection>) -> Reconciliation,
    ) -> Result<VoteOutcome> {
        self.mutate(|state| state.transact_vote(user, votable, decide))
    }

    fn current_vote(&self, user: &UserId, votable: &VotableRef) -> Result<Option<VoteDirection>> {
        Ok(self.lock()?.current_vote(user, votable))
    }

    fn vote_count(&self, votable: &VotableRef) -> Result<i64> {
        self.lock()?.vote_count(votable)
    }
}
