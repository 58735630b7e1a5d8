use super::files::atomic_write;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between automatic missed-task checks
    pub miss_check_secs: u64,
    /// Length of the rolling summary window
    pub window_days: u32,
    /// Send a desktop notification when a task is missed
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            miss_check_secs: 60,
            window_days: 7,
            notifications: true,
        }
    }
}

/// Load settings, using defaults when the file is missing or unreadable
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            Ok(Settings::default())
        }
    }
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            miss_check_secs: 30,
            window_days: 14,
            notifications: false,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_and_invalid_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        std::fs::write(&path, "{\"window_days\": 30}").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.window_days, 30);
        assert_eq!(settings.miss_check_secs, 60);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }
}
