use std::path::{Path, PathBuf};

use peoria_core::{CompetitionState, PlayerResult};

use crate::{StoreError, read_optional, write_json};

/// File name of the working snapshot inside the data directory.
pub const STATE_FILE: &str = "state.json";

/// File name of the most recent ranking, kept so the next one can show movement.
pub const RESULTS_FILE: &str = "last_results.json";

/// The competition currently being edited.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    results_path: PathBuf,
}

impl StateStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STATE_FILE),
            results_path: data_dir.as_ref().join(RESULTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, state: &CompetitionState) -> Result<(), StoreError> {
        write_json(&self.path, state, false)?;
        tracing::debug!(path = %self.path.display(), players = state.players.len(), "Saved state");
        Ok(())
    }

    /// The saved snapshot. Missing, unreadable, malformed or invalid data all
    /// read as `None` so a damaged file never blocks starting over.
    pub fn load(&self) -> Option<CompetitionState> {
        let content = match read_optional(&self.path) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("{e}");
                return None;
            },
        };
        let state: CompetitionState = match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring malformed state: {e}");
                return None;
            },
        };
        if let Err(e) = state.config.validate() {
            tracing::warn!(path = %self.path.display(), "Ignoring state with invalid config: {e}");
            return None;
        }
        Some(state)
    }

    /// The saved snapshot, or a fresh default competition.
    pub fn load_or_default(&self) -> CompetitionState {
        self.load().unwrap_or_default()
    }

    pub fn save_results(&self, results: &[PlayerResult]) -> Result<(), StoreError> {
        write_json(&self.results_path, results, false)
    }

    /// Results of the previous ranking, if one was saved and still parses.
    pub fn load_results(&self) -> Option<Vec<PlayerResult>> {
        let content = read_optional(&self.results_path).ok()??;
        serde_json::from_str(&content)
            .inspect_err(|e| tracing::debug!("Discarding stale results: {e}"))
            .ok()
    }

    /// Delete the snapshot and the remembered results. Already absent is fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        for path in [&self.path, &self.results_path] {
            match std::fs::remove_file(path) {
                Ok(()) => {},
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
                Err(source) => {
                    return Err(StoreError::Write {
                        path: path.clone(),
                        source,
                    });
                },
            }
        }
        Ok(())
    }
}
