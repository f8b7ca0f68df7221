use std::{
    env, fs,
    path::{Path, PathBuf},
};

use fluent_repository::models::OrderStatus;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FLUENT_CONFIG";

/// Application's configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// JSON file of orders used to seed `fetch`
    pub seed_path: Option<PathBuf>,

    /// Print the SQL rendering of composed queries
    /// Default: true
    pub show_sql: Option<bool>,

    /// Order status used by `fetch --status` without a value
    /// Default: "Submitted"
    pub default_status: Option<String>,
}

/// Location of the config file: the explicit path if given, else
/// `$FLUENT_CONFIG`, else `$XDG_CONFIG_HOME/fluent/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match env::var(CONFIG_ENV) {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("fluent").join("config.toml"),
    }
}

fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".config")
        })
}

impl Config {
    /// Loads the configuration file at `path`.
    /// A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;
        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        if let Some(status) = &self.default_status {
            status
                .parse::<OrderStatus>()
                .map_err(|_| ConfigError::InvalidDefaultStatus(status.clone()))?;
        }

        self.show_sql.get_or_insert(true);
        Ok(())
    }

    pub fn show_sql(&self) -> bool {
        self.show_sql.unwrap_or(true)
    }

    pub fn default_status(&self) -> OrderStatus {
        self.default_status
            .as_deref()
            .and_then(|status| status.parse().ok())
            .unwrap_or(OrderStatus::Submitted)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;

    fn with_env<F>(vars: Vec<(&str, Option<&str>)>, f: F)
    where
        F: FnOnce(),
    {
        let old_vars: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var(k).ok())).collect();

        for (key, value) in &vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        f();

        for (key, old_value) in old_vars {
            match old_value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.show_sql, Some(true));
        assert!(config.seed_path.is_none());
        assert_eq!(config.default_status(), OrderStatus::Submitted);
    }

    #[test]
    fn test_load_reads_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "seed_path = \"orders.json\"\nshow_sql = false\ndefault_status = \"shipped\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.seed_path, Some(PathBuf::from("orders.json")));
        assert!(!config.show_sql());
        assert_eq!(config.default_status(), OrderStatus::Shipped);
    }

    #[test]
    fn test_invalid_default_status() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_status = \"lost\"\n").unwrap();

        let result = Config::load(&path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDefaultStatus(status)) if status == "lost"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "show_sql = maybe\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::TomlDeError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_config_path_precedence() {
        let explicit = PathBuf::from("/tmp/explicit.toml");

        with_env(
            vec![("FLUENT_CONFIG", Some("/tmp/env.toml")), ("XDG_CONFIG_HOME", Some("/xdg"))],
            || {
                assert_eq!(config_path(Some(&explicit)), explicit);
                assert_eq!(config_path(None), PathBuf::from("/tmp/env.toml"));
            },
        );

        with_env(
            vec![("FLUENT_CONFIG", None), ("XDG_CONFIG_HOME", Some("/xdg"))],
            || {
                assert_eq!(
                    config_path(None),
                    PathBuf::from("/xdg/fluent/config.toml")
                );
            },
        );
    }

    #[test]
    fn test_to_toml_round_trips_settings() {
        let config = Config {
            show_sql: Some(false),
            default_status: Some("Draft".into()),
            ..Default::default()
        };

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("show_sql = false"));
        assert!(rendered.contains("default_status = \"Draft\""));
    }
}
