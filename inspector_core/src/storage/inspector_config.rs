// inspector_core/src/storage/inspector_config.rs
use crate::error::ConfigError;
use directories_next::ProjectDirs;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Inspector presentation settings. Missing keys take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Shown instead of the members when every selected value is null.
    pub null_label: String,
    /// Shown by hosts for a control whose instances disagree.
    pub mixed_label: String,
    /// Shown instead of objects nested deeper than `max_depth`.
    pub depth_label: String,
    pub max_depth: usize,
    /// Turns `max_speed` into `Max Speed` when no display name is given.
    pub humanize_names: bool,
    pub logging: LoggingConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            null_label: "<null>".to_string(),
            mixed_label: "--".to_string(),
            depth_label: "...".to_string(),
            max_depth: 8,
            humanize_names: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// File logger settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `flexi_logger` spec, e.g. `info` or `warn, inspector_core=debug`.
    pub level: String,
    /// Log directory. `logs` under the app dir when unset.
    pub directory: Option<PathBuf>,
    pub basename: String,
    /// Size in bytes after which the log file is rotated.
    pub rotate_bytes: u64,
    pub keep_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            basename: "inspector".to_string(),
            rotate_bytes: 5_000_000,
            keep_files: 5,
        }
    }
}

impl LoggingConfig {
    /// The configured directory, else `logs` under the app dir, else
    /// `logs` in the working directory.
    pub fn log_dir(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => app_dir().unwrap_or_default().join("logs"),
        }
    }
}

impl InspectorConfig {
    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(txt) => Self::from_ron_str(&txt),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No inspector config at {}, using defaults.", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_ron_str(txt: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(txt)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Saves the config as a .ron file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}

/// Returns the app dir for the program, `None` when the platform has no
/// home directory.
pub fn app_dir() -> Option<PathBuf> {
    match ProjectDirs::from("com", "inspector", "inspector") {
        Some(project_dir) => Some(project_dir.config_dir().to_path_buf()),
        None => {
            log::error!("Could not resolve app directory.");
            None
        }
    }
}

/// Default location of the inspector config.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("inspector_config.ron"))
}
