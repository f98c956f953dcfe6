use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_IMAGE_TIMEOUT;
use crate::fs::atomic_write;
use crate::paths;

/// Endpoint used when neither the CLI nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Default settings in the `[sxudo]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SxudoConfig {
    /// Base URL of the SXUDO server.
    pub endpoint: Option<String>,
    /// Seeds the stored username when none is set yet.
    pub username: Option<String>,
    /// Timeout for text requests. No timeout when absent.
    pub request_timeout_secs: Option<u64>,
    /// Timeout for image uploads.
    pub image_timeout_secs: Option<u64>,
}

/// External speech commands in the `[voice]` section.
///
/// Each is a program followed by its arguments. `{text}` and `{wpm}` are
/// substituted in synthesizer arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synthesizer: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognizer: Vec<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/sxudo/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub sxudo: SxudoConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The SXUDO server base URL, without a trailing slash.
    pub endpoint: String,
    /// Username to seed the session with.
    pub username: Option<String>,
    pub request_timeout: Option<Duration>,
    pub image_timeout: Duration,
    pub synthesizer: Vec<String>,
    pub recognizer: Vec<String>,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// Username override.
    pub username: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the endpoint is not an `http(s)` URL or a timeout
/// is zero.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.sxudo.endpoint.as_ref())
        .map_or(DEFAULT_ENDPOINT, String::as_str);
    let endpoint = validate_endpoint(endpoint)?;

    let username = options
        .username
        .as_ref()
        .or(config_file.sxudo.username.as_ref())
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let request_timeout = match config_file.sxudo.request_timeout_secs {
        Some(0) => bail!(
            "Invalid configuration: 'request_timeout_secs' must be greater than 0\n\n\
             Remove it from ~/.config/sxudo/config.toml to disable the timeout"
        ),
        secs => secs.map(Duration::from_secs),
    };

    let image_timeout = match config_file.sxudo.image_timeout_secs {
        Some(0) => bail!(
            "Invalid configuration: 'image_timeout_secs' must be greater than 0"
        ),
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_IMAGE_TIMEOUT,
    };

    Ok(ResolvedConfig {
        endpoint,
        username,
        request_timeout,
        image_timeout,
        synthesizer: config_file.voice.synthesizer.clone(),
        recognizer: config_file.voice.recognizer.clone(),
    })
}

fn validate_endpoint(endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint.trim()).with_context(|| {
        format!(
            "Invalid endpoint '{endpoint}'\n\n\
             Expected a URL such as {DEFAULT_ENDPOINT}"
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "Invalid endpoint '{endpoint}': scheme must be http or https\n\n\
             Expected a URL such as {DEFAULT_ENDPOINT}"
        );
    }

    Ok(endpoint.trim().trim_end_matches('/').to_string())
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/sxudo/config.toml`
    /// or `~/.config/sxudo/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    fn create_test_config() -> ConfigFile {
        ConfigFile {
            sxudo: SxudoConfig {
                endpoint: Some("http://192.168.1.20:8000".to_string()),
                username: Some("alice".to_string()),
                request_timeout_secs: Some(60),
                image_timeout_secs: Some(45),
            },
            voice: VoiceConfig {
                synthesizer: vec!["espeak".to_string(), "{text}".to_string()],
                recognizer: vec![],
            },
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        manager.save(&create_test_config()).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(
            loaded.sxudo.endpoint.as_deref(),
            Some("http://192.168.1.20:8000")
        );
        assert_eq!(loaded.sxudo.username.as_deref(), Some("alice"));
        assert_eq!(loaded.sxudo.image_timeout_secs, Some(45));
        assert_eq!(loaded.voice.synthesizer, vec!["espeak", "{text}"]);
        assert!(loaded.voice.recognizer.is_empty());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().sxudo.endpoint.is_none());
    }

    #[test]
    fn test_load_or_default_rejects_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[sxudo\nendpoint = ").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: ConfigFile = toml::from_str("[sxudo]\nusername = \"bob\"\n").unwrap();
        assert_eq!(config.sxudo.username.as_deref(), Some("bob"));
        assert!(config.voice.synthesizer.is_empty());
    }

    // resolve_config tests

    #[test]
    fn test_resolve_config_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert!(resolved.username.is_none());
        assert!(resolved.request_timeout.is_none());
        assert_eq!(resolved.image_timeout, DEFAULT_IMAGE_TIMEOUT);
    }

    #[test]
    fn test_resolve_config_falls_back_to_file() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.endpoint, "http://192.168.1.20:8000");
        assert_eq!(resolved.username.as_deref(), Some("alice"));
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(60)));
        assert_eq!(resolved.image_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_resolve_config_cli_overrides_file() {
        let options = ResolveOptions {
            endpoint: Some("https://sxudo.example.com/".to_string()),
            username: Some("carol".to_string()),
        };

        let resolved = resolve_config(&options, &create_test_config()).unwrap();

        assert_eq!(resolved.endpoint, "https://sxudo.example.com");
        assert_eq!(resolved.username.as_deref(), Some("carol"));
    }

    #[test]
    fn test_resolve_config_blank_username_is_none() {
        let options = ResolveOptions {
            endpoint: None,
            username: Some("   ".to_string()),
        };

        let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();
        assert!(resolved.username.is_none());
    }

    #[test]
    fn test_resolve_config_invalid_endpoint() {
        let options = ResolveOptions {
            endpoint: Some("not a url".to_string()),
            username: None,
        };

        let result = resolve_config(&options, &ConfigFile::default());
        assert!(result.unwrap_err().to_string().contains("Invalid endpoint"));
    }

    #[test]
    fn test_resolve_config_rejects_non_http_scheme() {
        let options = ResolveOptions {
            endpoint: Some("ftp://example.com".to_string()),
            username: None,
        };

        let result = resolve_config(&options, &ConfigFile::default());
        assert!(result.unwrap_err().to_string().contains("http or https"));
    }

    #[test]
    fn test_resolve_config_rejects_zero_timeout() {
        let mut config = ConfigFile::default();
        config.sxudo.image_timeout_secs = Some(0);

        let result = resolve_config(&ResolveOptions::default(), &config);
        assert!(result.unwrap_err().to_string().contains("image_timeout_secs"));
    }
}
