//! Shared configuration loader for the WikiText transcoder.
//!
//! `defaults/wiki.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`WikiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use wiki_babel::ParseOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/wiki.default.toml");

/// Top-level configuration consumed by wiki applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiConfig {
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub tables: TablesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub promote_row_headers: bool,
}

impl From<&TablesConfig> for ParseOptions {
    fn from(config: &TablesConfig) -> Self {
        ParseOptions {
            promote_row_headers: config.promote_row_headers,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub trailing_newline: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WikiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WikiConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.convert.tables.promote_row_headers);
        assert!(config.convert.output.trailing_newline);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.tables.promote_row_headers", false)
            .expect("override to apply")
            .set_override("logging.level", "debug")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.convert.tables.promote_row_headers);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn tables_config_converts_to_parse_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: ParseOptions = (&config.convert.tables).into();
        assert!(options.promote_row_headers);
    }

    #[test]
    fn file_layers_over_defaults() {
        let dir = std::env::temp_dir().join(format!("wiki-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("wiki.toml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(file, "[convert.output]\ntrailing_newline = false").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert!(!config.convert.output.trailing_newline);
        // Keys absent from the file keep their defaults.
        assert!(config.convert.tables.promote_row_headers);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/wiki.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/wiki.toml")
            .build()
            .expect("config to build");
        assert!(config.convert.tables.promote_row_headers);
    }
}
