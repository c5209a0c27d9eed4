//! Configuration
//!
//! Field bounds and the remote request timeout. Every knob has a serde
//! default so callers can deserialize a partial config file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-field bounds enforced by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Max title length in chars, after trimming
    #[serde(default = "default_title_max")]
    pub title_max: usize,
    /// Max description length in chars, after trimming
    #[serde(default = "default_description_max")]
    pub description_max: usize,
    /// Max number of tags per item
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    /// Max length of a single tag in chars
    #[serde(default = "default_tag_max")]
    pub tag_max: usize,
}

fn default_title_max() -> usize {
    100
}

fn default_description_max() -> usize {
    500
}

fn default_max_tags() -> usize {
    10
}

fn default_tag_max() -> usize {
    50
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            title_max: default_title_max(),
            description_max: default_description_max(),
            max_tags: default_max_tags(),
            tag_max: default_tag_max(),
        }
    }
}

/// Crate-wide configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub limits: Limits,
    /// Bound on every remote call; elapsing yields `RemoteError::Timeout`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            request_timeout: default_request_timeout(),
        }
    }
}
