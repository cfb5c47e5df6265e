use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "https://api.caiyunapp.com/";
pub const DEFAULT_TOKEN: &str = "mp4NiicGBHENZGKE";
pub const DEFAULT_LANG: &str = "zh_CN";

/// File name of the single-record place store inside the data directory.
pub const PLACE_STORE_FILE: &str = "sunny_weather.json";

/// Remote API settings handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host of the provider, e.g. "https://api.caiyunapp.com/".
    pub base_url: String,
    pub token: String,
    /// Locale sent with every request.
    pub lang: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: DEFAULT_TOKEN.to_string(),
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl ApiConfig {
    /// Base URL with exactly one trailing slash, ready for path joins.
    pub fn base(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [api]
/// token = "..."
/// lang = "en_US"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,

    /// Where the selected place is stored; platform data dir when absent.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the place store file.
    pub fn place_store_path(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()?.data_dir().to_path_buf(),
        };
        Ok(dir.join(PLACE_STORE_FILE))
    }

    /// Replace the provider token, keeping other settings.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.api.token = token.into();
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "sunnyweather", "sunny-weather")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_caiyun() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api.token, DEFAULT_TOKEN);
        assert_eq!(cfg.api.lang, "zh_CN");
        assert!(cfg.data_dir.is_none());
    }

    #[test]
    fn base_normalizes_trailing_slash() {
        let mut api = ApiConfig {
            base_url: "http://127.0.0.1:8080".into(),
            ..ApiConfig::default()
        };
        assert_eq!(api.base(), "http://127.0.0.1:8080/");

        api.base_url = "http://127.0.0.1:8080//".into();
        assert_eq!(api.base(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str("[api]\nlang = \"en_US\"\n").expect("partial config");
        assert_eq!(cfg.api.lang, "en_US");
        assert_eq!(cfg.api.token, DEFAULT_TOKEN);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("defaults");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_token("MY_TOKEN");
        cfg.data_dir = Some(dir.path().to_path_buf());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert_eq!(
            loaded.place_store_path().expect("store path"),
            dir.path().join(PLACE_STORE_FILE)
        );
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api = 3").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
