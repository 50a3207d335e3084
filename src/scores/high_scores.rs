//! Best score per game mode, kept in a small JSON file
//!
//! The file is a flat object such as `{"classic": 120, "adventure": 40}`.
//! A missing or unreadable file behaves like an empty table, and failed
//! writes are logged and otherwise ignored: the in-memory table stays
//! authoritative for the rest of the process.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::game::GameMode;

pub type ScoreTable = BTreeMap<String, u32>;

#[derive(Debug, Clone, Default)]
pub struct HighScores {
    path: Option<PathBuf>,
    table: ScoreTable,
}

impl HighScores {
    /// Load the table from `path`, falling back to an empty one
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let table = if path.exists() {
            match read_table(&path) {
                Ok(table) => table,
                Err(e) => {
                    warn!("ignoring high score file: {e:#}");
                    ScoreTable::new()
                }
            }
        } else {
            debug!("no high score file at {:?}", path);
            ScoreTable::new()
        };

        Self {
            path: Some(path),
            table,
        }
    }

    /// A table that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get_best(&self, mode: GameMode) -> u32 {
        self.table.get(mode.as_str()).copied().unwrap_or(0)
    }

    /// Store `score` if it beats the current best for `mode`.
    ///
    /// Returns whether the table changed.
    pub fn record_if_better(&mut self, mode: GameMode, score: u32) -> bool {
        if score <= self.get_best(mode) {
            return false;
        }

        self.table.insert(mode.as_str().to_string(), score);
        info!(mode = mode.as_str(), score, "new best score");

        if let Some(path) = &self.path {
            if let Err(e) = write_table(path, &self.table) {
                warn!("could not save high scores: {e:#}");
            }
        }

        true
    }

    #[cfg(test)]
    pub fn table(&self) -> &ScoreTable {
        &self.table
    }
}

fn read_table(path: &Path) -> Result<ScoreTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read high scores from {:?}", path))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse high scores in {:?}", path))
}

fn write_table(path: &Path, table: &ScoreTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let json = serde_json::to_string_pretty(table).context("Failed to serialize high scores")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write high scores to {:?}", path))?;

    Ok(())
}
