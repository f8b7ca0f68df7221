use std::path::Path;

use tracing::{info, warn};

use crate::{config::Config, error::Result};

/// Prints the effective configuration as TOML.
pub fn show(path: &Path, config: &Config) -> Result<String> {
    if !path.exists() {
        warn!("Config file {} not found, showing defaults", path.display());
    }

    let content = config.to_toml()?;
    info!(path = %path.display(), "{}", content);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_renders_defaults() {
        let mut config = Config::default();
        config.resolve().unwrap();

        let content = show(Path::new("/nonexistent/config.toml"), &config).unwrap();
        assert!(content.contains("show_sql = true"));
    }
}
