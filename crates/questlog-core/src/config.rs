use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::project::DEFAULT_WINDOW_DAYS;

/// Project file, relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = ".questlog/config.toml";

/// Environment variable overriding the snapshot location.
pub const SNAPSHOT_ENV: &str = "QUESTLOG_SNAPSHOT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot file; relative paths are resolved against the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Load `.questlog/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_PATH);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config from the platform config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir)
}

/// Load `questlog/config.toml` under an explicit config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config_from(config_dir: &Path) -> Result<UserConfig> {
    let path = config_dir.join("questlog/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Pick the snapshot file: flag, then env, then project config, then user config.
#[must_use]
pub fn resolve_snapshot_path(
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    project_root: &Path,
    project: &ProjectConfig,
    user: &UserConfig,
) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env_path.map(str::trim).filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = &project.snapshot.path {
        return Some(if path.is_absolute() {
            path.clone()
        } else {
            project_root.join(path)
        });
    }

    user.snapshot.clone()
}

/// Window length: flag, then project config (which defaults to 7).
#[must_use]
pub fn resolve_window_days(cli_days: Option<u32>, project: &ProjectConfig) -> u32 {
    cli_days.unwrap_or(project.calendar.window_days)
}

const fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}
