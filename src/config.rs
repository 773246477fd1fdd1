use crate::errors::{PlatformError, PlatformResult};
use once_cell::sync::Lazy;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

pub const ENV_CHATBOT_A_URL: &str = "CHATBOT_A_URL";
pub const ENV_CHATBOT_B_URL: &str = "CHATBOT_B_URL";
pub const ENV_ALBUM_SOURCE: &str = "ALBUM_SOURCE";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the project/tech-spec assistant (Target A).
    pub chatbot_a_url: String,
    /// Base URL of the general knowledge assistant (Target B).
    pub chatbot_b_url: String,
    /// `http(s)://` URL or local path of the solutions album document.
    pub album_source: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chatbot_a_url: "http://localhost:5000".to_string(),
            chatbot_b_url: "http://localhost:8000".to_string(),
            album_source: "assets/solutions.json".to_string(),
            log_level: "info".to_string(),
            log_dir: app_dir()
                .map(|dir| dir.join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub chatbot_a_url: Option<String>,
    pub chatbot_b_url: Option<String>,
    pub album_source: Option<String>,
    pub log_level: Option<String>,
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Builds the process-wide config from the config file, `.env`, the
/// environment and CLI overrides, in that order of increasing priority.
pub fn initialize_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> PlatformResult<Config> {
    let path = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => get_config_path(),
    };
    let config = load_config(path.as_deref(), |key| dotenv::var(key).ok(), overrides)?;

    let mut global = CONFIG
        .write()
        .map_err(|_| PlatformError::config_error("config lock poisoned"))?;
    *global = config.clone();
    Ok(config)
}

pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn load_config<F>(
    config_file: Option<&Path>,
    env: F,
    overrides: &ConfigOverrides,
) -> PlatformResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_file {
        Some(path) if path.exists() => read_config_file(path)?,
        _ => Config::default(),
    };

    apply_env(&mut config, env);
    apply_overrides(&mut config, overrides);
    normalize(&mut config);
    validate_config(&config)?;

    Ok(config)
}

fn read_config_file(path: &Path) -> PlatformResult<Config> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PlatformError::config_error(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        PlatformError::config_error(format!("Failed to parse {}: {}", path.display(), e))
    })
}

fn apply_env<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_CHATBOT_A_URL) {
        config.chatbot_a_url = url;
    }
    if let Some(url) = env(ENV_CHATBOT_B_URL) {
        config.chatbot_b_url = url;
    }
    if let Some(source) = env(ENV_ALBUM_SOURCE) {
        config.album_source = source;
    }
    if let Some(level) = env(ENV_LOG_LEVEL) {
        config.log_level = level;
    }
    if let Some(dir) = env(ENV_LOG_DIR) {
        config.log_dir = PathBuf::from(dir);
    }
}

fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(url) = &overrides.chatbot_a_url {
        config.chatbot_a_url = url.clone();
    }
    if let Some(url) = &overrides.chatbot_b_url {
        config.chatbot_b_url = url.clone();
    }
    if let Some(source) = &overrides.album_source {
        config.album_source = source.clone();
    }
    if let Some(level) = &overrides.log_level {
        config.log_level = level.clone();
    }
}

// Endpoints are joined as `{base}/api/chat`, so a trailing slash would double up.
fn normalize(config: &mut Config) {
    for url in [&mut config.chatbot_a_url, &mut config.chatbot_b_url] {
        let trimmed = url.trim().trim_end_matches('/').to_string();
        *url = trimmed;
    }
    config.album_source = config.album_source.trim().to_string();
}

fn validate_config(config: &Config) -> PlatformResult<()> {
    validate_base_url("chatbot_a_url", &config.chatbot_a_url)?;
    validate_base_url("chatbot_b_url", &config.chatbot_b_url)?;

    if config.album_source.is_empty() {
        return Err(PlatformError::config_error("album_source is required"));
    }

    flexi_logger::LogSpecification::parse(&config.log_level).map_err(|e| {
        PlatformError::config_error(format!("Invalid log_level '{}': {}", config.log_level, e))
    })?;

    Ok(())
}

fn validate_base_url(field: &str, value: &str) -> PlatformResult<()> {
    if value.is_empty() {
        return Err(PlatformError::config_error(format!("{} is required", field)));
    }
    let url = Url::parse(value).map_err(|e| {
        PlatformError::config_error(format!("{} '{}' is not a valid URL: {}", field, value, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PlatformError::config_error(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}

fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("unified-platform"))
}

fn get_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = load_config(None, no_env, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.chatbot_a_url, "http://localhost:5000");
        assert_eq!(config.chatbot_b_url, "http://localhost:8000");
        assert_eq!(config.album_source, "assets/solutions.json");
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "chatbot_a_url": "http://file-a:1", "chatbot_b_url": "http://file-b:2" }"#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_CHATBOT_A_URL, "http://env-a:3/"),
            (ENV_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();
        let overrides = ConfigOverrides {
            chatbot_b_url: Some("https://cli-b".to_string()),
            ..Default::default()
        };

        let config = load_config(
            Some(&path),
            |key| env.get(key).map(|v| v.to_string()),
            &overrides,
        )
        .unwrap();

        assert_eq!(config.chatbot_a_url, "http://env-a:3");
        assert_eq!(config.chatbot_b_url, "https://cli-b");
        assert_eq!(config.log_level, "debug");
        // untouched fields keep their defaults
        assert_eq!(config.album_source, "assets/solutions.json");
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(Some(&path), no_env, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, {
            let mut expected = Config::default();
            normalize(&mut expected);
            expected
        });
    }

    #[test]
    fn test_malformed_config_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(Some(&path), no_env, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }

    #[test]
    fn test_validate_config_rejects_bad_urls() {
        let mut config = Config::default();
        config.chatbot_a_url = "localhost:5000/not a url".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.chatbot_b_url = "ftp://files.example.com".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.chatbot_b_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_initialize_config_publishes_global() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "album_source": "https://cdn.example.com/solutions.json" }"#).unwrap();
        let overrides = ConfigOverrides {
            chatbot_a_url: Some("http://intake.local:5000/".to_string()),
            ..Default::default()
        };

        let config = initialize_config(Some(&path), &overrides).unwrap();

        assert_eq!(config.chatbot_a_url, "http://intake.local:5000");
        assert_eq!(get_config(), config);
    }

    #[test]
    fn test_validate_config_rejects_empty_album_source() {
        let overrides = ConfigOverrides {
            album_source: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(load_config(None, no_env, &overrides).is_err());
    }
}
