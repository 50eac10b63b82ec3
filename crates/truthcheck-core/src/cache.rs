//! Local answer cache.
//!
//! File-backed stand-in for the quiz page's `answer` local-storage key: the
//! last submitted answer is kept as JSON and read back on the next visit to
//! pre-fill the outro form. A malformed or missing cache is never an error;
//! the form simply falls back to its placeholders.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::Answer;

/// The cached last answer of this machine's participant.
#[derive(Debug, Clone)]
pub struct AnswerCache {
    path: PathBuf,
}

impl AnswerCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/truthcheck/answer.json`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("truthcheck")
                .join("answer.json")
        })
    }

    /// Read the cached answer, if a well-formed one exists.
    pub fn load(&self) -> Option<Answer> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::debug!("ignoring malformed cached answer: {e}");
                None
            }
        }
    }

    /// Overwrite the cache with a freshly submitted answer.
    pub fn store(&self, answer: &Answer) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create cache dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string(answer).context("failed to encode answer")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write cache: {}", self.path.display()))
    }
}
