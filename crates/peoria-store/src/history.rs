use std::path::{Path, PathBuf};

use peoria_core::SavedCompetition;

use crate::{StoreError, read_optional, write_json};

/// File name of the history list inside the data directory.
pub const HISTORY_FILE: &str = "history.json";

/// Saved competitions, newest first.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

fn is_usable(entry: &SavedCompetition) -> bool {
    !entry.id.is_empty()
        && !entry.name.is_empty()
        && !entry.date.is_empty()
        && entry.config.validate().is_ok()
}

impl HistoryStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every usable entry. Entries that fail to parse or validate are
    /// skipped; a file that is not a JSON array reads as empty.
    pub fn list(&self) -> Result<Vec<SavedCompetition>, StoreError> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };
        let raw: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring malformed history: {e}");
                return Ok(Vec::new());
            },
        };
        let total = raw.len();
        let entries: Vec<SavedCompetition> = raw
            .into_iter()
            .filter_map(|v| serde_json::from_value::<SavedCompetition>(v).ok())
            .filter(is_usable)
            .collect();
        if entries.len() != total {
            tracing::warn!(
                skipped = total - entries.len(),
                "Skipped unusable history entries"
            );
        }
        Ok(entries)
    }

    /// Prepend `competition` to the history.
    pub fn save(&self, competition: SavedCompetition) -> Result<(), StoreError> {
        let mut history = self.list()?;
        tracing::info!(id = %competition.id, name = %competition.name, "Saving competition");
        history.insert(0, competition);
        write_json(&self.path, &history, false)
    }

    pub fn get(&self, id: &str) -> Result<SavedCompetition, StoreError> {
        self.list()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut history = self.list()?;
        let before = history.len();
        history.retain(|c| c.id != id);
        if history.len() == before {
            return Ok(false);
        }
        write_json(&self.path, &history, false)?;
        tracing::info!(id, "Deleted competition");
        Ok(true)
    }
}
