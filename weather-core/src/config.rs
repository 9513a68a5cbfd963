use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const CREDENTIALS_FILE: &str = "credentials.json";
const FAVORITES_FILE: &str = "favorites.json";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// lang = "de"
/// data_dir = "/home/me/.weather"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the OpenWeather API, without a trailing endpoint.
    pub base_url: String,

    /// Unit system passed to the API. Output labels assume "metric".
    pub units: String,

    /// Language for condition descriptions, e.g. "en" or "de".
    pub lang: String,

    /// Where the credential and favorites files live. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            lang: "en".to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    pub fn credentials_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(CREDENTIALS_FILE))
    }

    pub fn favorites_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(FAVORITES_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.units, "metric");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "lang = \"de\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.lang, "de");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.data_dir.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "lang = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn data_dir_override_drives_file_paths() {
        let cfg = Config { data_dir: Some(PathBuf::from("/tmp/wx")), ..Config::default() };

        assert_eq!(cfg.credentials_path().unwrap(), PathBuf::from("/tmp/wx/credentials.json"));
        assert_eq!(cfg.favorites_path().unwrap(), PathBuf::from("/tmp/wx/favorites.json"));
    }
}
