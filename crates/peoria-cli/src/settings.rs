use std::path::{Path, PathBuf};

use serde::Deserialize;

use peoria_core::{CompetitionConfig, CompetitionState, HandicapCap, RoundingMode};

use crate::error::CliError;

/// Settings file looked up in the working directory when `--settings` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "peoria.toml";

/// CLI settings, loaded from `peoria.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeoriaSettings {
    /// Directory holding `state.json`, `history.json` and `last_results.json`.
    pub data_dir: String,
    pub display: DisplaySettings,
    pub defaults: CompetitionDefaults,
}

impl Default for PeoriaSettings {
    fn default() -> Self {
        Self {
            data_dir: ".peoria".to_string(),
            display: DisplaySettings::default(),
            defaults: CompetitionDefaults::default(),
        }
    }
}

/// Output preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print JSON instead of tables unless overridden per command.
    pub json: bool,
    /// Include the hidden-hole total column in ranking tables.
    pub show_hidden_total: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            json: false,
            show_hidden_total: true,
        }
    }
}

/// Configuration a brand-new competition starts from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompetitionDefaults {
    pub multiplier: f64,
    pub hidden_weight: f64,
    pub double_par_cut: bool,
    pub max_handicap: HandicapCap,
    pub rounding_mode: RoundingMode,
}

impl Default for CompetitionDefaults {
    fn default() -> Self {
        let config = CompetitionConfig::default();
        Self {
            multiplier: config.multiplier,
            hidden_weight: config.hidden_weight,
            double_par_cut: config.limits.double_par_cut,
            max_handicap: config.limits.max_handicap,
            rounding_mode: config.rounding_mode,
        }
    }
}

impl CompetitionDefaults {
    pub fn config(&self) -> CompetitionConfig {
        let mut config = CompetitionConfig {
            multiplier: self.multiplier,
            hidden_weight: self.hidden_weight,
            rounding_mode: self.rounding_mode,
            ..CompetitionConfig::default()
        };
        config.limits.double_par_cut = self.double_par_cut;
        config.limits.max_handicap = self.max_handicap;
        config
    }
}

const DEFAULT_SETTINGS_TEMPLATE: &str = "\
# peoria settings
# PEORIA_DATA_DIR overrides data_dir.

# Where the working competition and history are kept
# data_dir = \".peoria\"

[display]
# json = false
# show_hidden_total = true

# Starting configuration for new competitions
[defaults]
# multiplier = 0.8
# hidden_weight = 1.5
# double_par_cut = true
# max_handicap = 999      # 999 = no limit
# rounding_mode = \"round\" # round, floor or ceil
";

impl PeoriaSettings {
    /// Load settings from `path` (or `peoria.toml`) if it exists, then apply
    /// environment overrides. A file that fails to parse is reported and
    /// ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        let mut settings = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<PeoriaSettings>(&content) {
                Ok(cfg) => {
                    tracing::debug!(path = %path.display(), "Loaded settings");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    PeoriaSettings::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {} found, using defaults", path.display());
                PeoriaSettings::default()
            },
        };

        if let Ok(dir) = std::env::var("PEORIA_DATA_DIR")
            && !dir.is_empty()
        {
            settings.data_dir = dir;
        }

        settings
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::Settings("data_dir must not be empty".to_string()));
        }
        self.defaults.config().validate()?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// A new, empty competition using the configured defaults.
    pub fn new_competition(&self) -> CompetitionState {
        CompetitionState::new(self.defaults.config())
    }
}

/// Write the commented default settings file. Refuses to overwrite.
pub fn create_default_settings(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::Settings(format!(
            "settings file already exists at {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::Settings(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    std::fs::write(path, DEFAULT_SETTINGS_TEMPLATE)
        .map_err(|e| CliError::Settings(format!("failed to write {}: {e}", path.display())))
}
