//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CAFE_*` environment variables, `__` between key segments
//!    (`CAFE_LOG__PATH=/tmp/log.txt`)
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use cafe_adapters::global::DEFAULT_LOG_PATH;

const ENV_PREFIX: &str = "CAFE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the activity log lives.
    pub log: LogConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Forum presentation.
    pub forum: ForumConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumConfig {
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: LogConfig {
                path: PathBuf::from(DEFAULT_LOG_PATH),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            forum: ForumConfig {
                name: "Coffee Community".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Self::load`], reading `CAFE_*` variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        config_file: Option<&PathBuf>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let settings = Config::builder()
            .set_default("log.path", defaults.log.path.display().to_string())?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .set_default("forum.name", defaults.forum.name)?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cafe.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "cafe", "cafe")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cafe.toml"))
    }

    /// Look up one value by its dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "log.path" => Some(self.log.path.display().to_string()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "forum.name" => Some(self.forum.name.clone()),
            _ => None,
        }
    }

    /// Every known dotted key, in display order.
    pub const KEYS: [&'static str; 4] = [
        "log.path",
        "output.no_color",
        "output.format",
        "forum.name",
    ];
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_log_path_matches_global() {
        assert_eq!(
            AppConfig::default().log.path,
            PathBuf::from("community_log.txt")
        );
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = toml_file("");
        let cfg = AppConfig::load_with_env(Some(&file.path().to_path_buf()), env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            "[forum]\nname = \"Bean Counters\"\n\n[log]\npath = \"/tmp/beans.txt\"\n",
        );
        let cfg = AppConfig::load_with_env(Some(&file.path().to_path_buf()), env(&[])).unwrap();
        assert_eq!(cfg.forum.name, "Bean Counters");
        assert_eq!(cfg.log.path, PathBuf::from("/tmp/beans.txt"));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[output]\nno_color = false\n");
        let cfg = AppConfig::load_with_env(
            Some(&file.path().to_path_buf()),
            env(&[
                ("CAFE_OUTPUT__NO_COLOR", "true"),
                ("CAFE_FORUM__NAME", "Env Cafe"),
            ]),
        )
        .unwrap();
        assert!(cfg.output.no_color);
        assert_eq!(cfg.forum.name, "Env Cafe");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_with_env(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key} should resolve");
        }
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
