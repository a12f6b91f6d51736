//! Configuration file parser for ~/.config/feedline/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde and reported with a warning.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("HOME environment variable not set")]
    NoHome,
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subscription list location. Defaults to `channels` next to the config file.
    pub channels_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Retries for rate-limited, failing or truncated responses.
    pub max_retries: u32,

    /// Number of feeds fetched at the same time.
    pub concurrency: usize,

    /// Whether entries are printed with ANSI colors and styles.
    pub color: bool,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channels_file: None,
            request_timeout_secs: 30,
            max_retries: 3,
            concurrency: 4,
            color: true,
            user_agent: concat!("feedline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "channels_file",
        "request_timeout_secs",
        "max_retries",
        "concurrency",
        "color",
        "user_agent",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Channel file to use: `explicit` first, then `channels_file`, then
    /// `channels` inside the config dir.
    ///
    /// `config_dir` is only called when both overrides are absent.
    pub fn channels_path(
        &self,
        explicit: Option<PathBuf>,
        config_dir: impl FnOnce() -> Result<PathBuf, ConfigError>,
    ) -> Result<PathBuf, ConfigError> {
        match explicit.or_else(|| self.channels_file.clone()) {
            Some(path) => Ok(path),
            None => Ok(config_dir()?.join("channels")),
        }
    }
}

/// Config file to load: `explicit`, or `config.toml` inside the config dir.
///
/// `config_dir` is only called when no explicit path is given.
pub fn config_path(
    explicit: Option<PathBuf>,
    config_dir: impl FnOnce() -> Result<PathBuf, ConfigError>,
) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Get the config directory path (~/.config/feedline/)
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join("feedline"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("feedline_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.channels_file.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.concurrency, 4);
        assert!(config.color);
        assert!(config.user_agent.starts_with("feedline/"));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedline_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let (dir, path) = temp_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.max_retries, 3);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let (dir, path) = temp_config("partial", "color = false\n");
        let config = Config::load(&path).unwrap();
        assert!(!config.color);
        assert_eq!(config.concurrency, 4);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let content = r#"
channels_file = "/srv/feeds/channels"
request_timeout_secs = 10
max_retries = 0
concurrency = 8
color = false
user_agent = "custom-agent"
"#;
        let (dir, path) = temp_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.channels_file.as_deref(),
            Some(Path::new("/srv/feeds/channels"))
        );
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.concurrency, 8);
        assert!(!config.color);
        assert_eq!(config.user_agent, "custom-agent");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (dir, path) = temp_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let (dir, path) = temp_config("unknown", "color = true\ntheme = \"dark\"\n");
        assert!(Config::load(&path).unwrap().color);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let (dir, path) = temp_config("wrongtype", "concurrency = \"many\"\n");
        assert!(Config::load(&path).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = temp_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        std::fs::remove_dir_all(&dir).ok();
    }

    fn home_dir() -> Result<PathBuf, ConfigError> {
        Ok(PathBuf::from("/home/u/.config/feedline"))
    }

    fn no_home() -> Result<PathBuf, ConfigError> {
        Err(ConfigError::NoHome)
    }

    #[test]
    fn test_channels_path_default_and_override() {
        let config = Config::default();
        assert_eq!(
            config.channels_path(None, home_dir).unwrap(),
            PathBuf::from("/home/u/.config/feedline/channels")
        );

        let config = Config {
            channels_file: Some(PathBuf::from("/elsewhere/list")),
            ..Config::default()
        };
        assert_eq!(
            config.channels_path(None, home_dir).unwrap(),
            PathBuf::from("/elsewhere/list")
        );
        assert_eq!(
            config
                .channels_path(Some(PathBuf::from("/cli/list")), home_dir)
                .unwrap(),
            PathBuf::from("/cli/list")
        );
    }

    #[test]
    fn test_explicit_paths_do_not_need_home() {
        let config = Config::default();
        assert_eq!(
            config
                .channels_path(Some(PathBuf::from("/cli/list")), no_home)
                .unwrap(),
            PathBuf::from("/cli/list")
        );
        assert_eq!(
            config_path(Some(PathBuf::from("/cli/config.toml")), no_home).unwrap(),
            PathBuf::from("/cli/config.toml")
        );

        let configured = Config {
            channels_file: Some(PathBuf::from("/srv/list")),
            ..Config::default()
        };
        assert_eq!(
            configured.channels_path(None, no_home).unwrap(),
            PathBuf::from("/srv/list")
        );
    }

    #[test]
    fn test_default_paths_without_home_fail() {
        assert!(matches!(config_path(None, no_home), Err(ConfigError::NoHome)));
        assert!(matches!(
            Config::default().channels_path(None, no_home),
            Err(ConfigError::NoHome)
        ));
        assert_eq!(
            config_path(None, home_dir).unwrap(),
            PathBuf::from("/home/u/.config/feedline/config.toml")
        );
    }
}
