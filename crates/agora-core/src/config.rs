//! Configuration management for agora

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage settings
    pub storage: StorageConfig,
    /// Feed settings
    pub feed: FeedConfig,
    /// Comment settings
    pub comment: CommentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            feed: FeedConfig::default(),
            comment: CommentConfig::default(),
        }
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; None means the platform default location
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

/// Feed-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Default page size for feed listings
    pub page_size: usize,
    /// Default sort order ("new" or "top")
    pub default_sort: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            default_sort: "new".to_string(),
        }
    }
}

/// Comment-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    /// Maximum comment content length
    pub max_length: usize,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self { max_length: 10000 }
    }
}
