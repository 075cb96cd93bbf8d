use crate::error::{Result, TimelineError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON emitted by the CLI.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "timeline.log".to_string(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TimelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml` from the working directory, falling back to
    /// defaults when the file is absent so the CLI runs unconfigured.
    pub fn load_or_default() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Config::default();
        }
        match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: {}; using defaults", e);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_parses_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = false").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(!config.output.pretty);
        // Unspecified sections fall back to defaults
        assert_eq!(config.logging.directory, "logs");
    }

    #[test]
    fn load_from_missing_file_is_config_error() {
        let err = Config::load_from(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
    }
}
