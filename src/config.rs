use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::DirStore;

pub const CONFIG_VERSION: u64 = 1;
pub const APP_ID: &str = "dev.goalpost.app";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("goalpost")
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(default_data_dir)
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct GoalpostConfig {
    /// Where the record store keeps the goal collection and theme.
    pub data_directory: PathBuf,
    /// Where exported documents are written.
    pub export_directory: PathBuf,
    pub week_start: WeekStart,
    pub debug_logging: bool,
}

impl Default for GoalpostConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            export_directory: default_export_dir(),
            week_start: WeekStart::default(),
            debug_logging: false,
        }
    }
}

impl GoalpostConfig {
    pub fn record_store(&self) -> DirStore {
        DirStore::new(&self.data_directory)
    }

    pub fn export_path(&self, file_name: &str) -> PathBuf {
        self.export_directory.join(file_name)
    }

    /// Ensure the data directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_path_joins_file_name() {
        let config = GoalpostConfig {
            export_directory: PathBuf::from("/tmp/exports"),
            ..GoalpostConfig::default()
        };
        assert_eq!(
            config.export_path("goals.json"),
            PathBuf::from("/tmp/exports/goals.json")
        );
    }

    #[test]
    fn ensure_dirs_creates_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoalpostConfig {
            data_directory: dir.path().join("goalpost"),
            ..GoalpostConfig::default()
        };
        config.ensure_dirs().unwrap();
        assert!(config.data_directory.is_dir());
    }
}
