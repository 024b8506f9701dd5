//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Preferred scalable fonts.
    #[serde(default)]
    pub fonts: FontsConfig,

    /// Default values used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Google API key used for Drive folder listing and downloads.
    pub google: Option<String>,
    /// remove.bg API key.
    pub remove_bg: Option<String>,
}

/// Scalable font files. Relative names are searched in the working directory
/// and then in the usual system font directories.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Face used for the title, subtitle and field values.
    pub bold: String,
    /// Face used for the description paragraph.
    pub regular: String,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self { bold: "arialbd.ttf".to_string(), regular: "arial.ttf".to_string() }
    }
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Template image path.
    pub template: String,
    /// Background remover name (`remove-bg` or `none`).
    pub remover: String,
    /// Destination of the finished archive.
    pub archive: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            template: "Blank.png".to_string(),
            remover: "remove-bg".to_string(),
            archive: "nanny_profiles.zip".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Google API key, preferring environment variable.
    #[must_use]
    pub fn google_key(&self) -> Option<String> {
        std::env::var("GOOGLE_API_KEY").ok().or_else(|| self.keys.google.clone())
    }

    /// Get the remove.bg API key, preferring environment variable.
    #[must_use]
    pub fn remove_bg_key(&self) -> Option<String> {
        std::env::var("REMOVE_BG_API_KEY").ok().or_else(|| self.keys.remove_bg.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `NANNYCARD_CONFIG` environment variable
/// 3. `~/.config/nannycard/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("NANNYCARD_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/nannycard/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/nannycard/config.toml")
    } else {
        PathBuf::from("nannycard.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.google.is_none());
        assert!(config.keys.remove_bg.is_none());
        assert_eq!(config.fonts.bold, "arialbd.ttf");
        assert_eq!(config.fonts.regular, "arial.ttf");
        assert_eq!(config.defaults.template, "Blank.png");
        assert_eq!(config.defaults.remover, "remove-bg");
        assert_eq!(config.defaults.archive, "nanny_profiles.zip");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.defaults.template, "Blank.png");
    }

    #[test]
    fn load_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
google = "test-google-key"
remove_bg = "test-removebg-key"

[fonts]
bold = "/fonts/Inter-Bold.ttf"

[defaults]
template = "cards/Blank.png"
remover = "none"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.google.as_deref(), Some("test-google-key"));
        assert_eq!(config.keys.remove_bg.as_deref(), Some("test-removebg-key"));
        assert_eq!(config.fonts.bold, "/fonts/Inter-Bold.ttf");
        // Unset keys inside a present section keep their defaults
        assert_eq!(config.fonts.regular, "arial.ttf");
        assert_eq!(config.defaults.template, "cards/Blank.png");
        assert_eq!(config.defaults.remover, "none");
        assert_eq!(config.defaults.archive, "nanny_profiles.zip");
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn remove_bg_key_from_file() {
        let config = Config {
            keys: KeysConfig { google: None, remove_bg: Some("from-file".into()) },
            ..Config::default()
        };

        std::env::remove_var("REMOVE_BG_API_KEY");
        assert_eq!(config.remove_bg_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
