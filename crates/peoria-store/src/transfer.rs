use std::path::Path;

use peoria_core::CompetitionState;
use peoria_core::time::file_stamp_now;

use crate::{StoreError, write_json};

/// Pretty JSON for sharing a competition as a file.
pub fn export_json(state: &CompetitionState) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parse and validate an exported competition.
pub fn import_json(json: &str) -> Result<CompetitionState, StoreError> {
    let state: CompetitionState = serde_json::from_str(json)?;
    state.config.validate()?;
    Ok(state)
}

pub fn export_to_file(state: &CompetitionState, path: &Path) -> Result<(), StoreError> {
    write_json(path, state, true)?;
    tracing::info!(path = %path.display(), "Exported competition");
    Ok(())
}

pub fn import_from_file(path: &Path) -> Result<CompetitionState, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_json(&content)
}

/// `peoria-<timestamp>.json`
pub fn default_export_name() -> String {
    format!("peoria-{}.json", file_stamp_now())
}
