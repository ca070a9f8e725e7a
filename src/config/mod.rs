//! Load and validate the optional `codeguard.toml` configuration.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod conventions;
pub mod layout;
pub mod telemetry;

pub use conventions::{
    parse_conventions_section, Conventions, EntryPointDoc, NameException, RawConventionsSection,
    RawEntryPointSection,
};
pub use layout::{
    parse_layout_section, LayoutOverrides, LayoutSection, RawLayoutSection, DEFAULT_DOCS_DIR_NAME,
    DEFAULT_REF_DIR_NAME, DEFAULT_SRC_DIR_NAME, DEFAULT_TESTS_DIR_NAME,
};

pub const CONFIG_ENV_KEY: &str = "CODEGUARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "codeguard.toml";

/// Where the configuration file path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line; the file must exist.
    Cli(PathBuf),
    /// `CODEGUARD_CONFIG`; the file must exist.
    Env(PathBuf),
    /// `codeguard.toml` in the project directory; optional.
    ProjectDefault(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Cli(path) | Self::Env(path) | Self::ProjectDefault(path) => path,
        }
    }

    pub const fn is_required(&self) -> bool {
        !matches!(self, Self::ProjectDefault(_))
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeguardConfig {
    pub layout: LayoutSection,
    pub conventions: Conventions,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawCodeguardConfig {
    layout: Option<RawLayoutSection>,
    conventions: Option<RawConventionsSection>,
}

impl CodeguardConfig {
    /// Load from the resolved source, falling back to defaults for an absent optional file.
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        let path = source.path();
        telemetry::log_source(source);

        if !path.is_file() {
            if source.is_required() {
                let error = ConfigError::Missing {
                    path: path.to_path_buf(),
                };
                error!(
                    target: "codeguard::config",
                    path = %path.display(),
                    reason = %error,
                    "Configuration file not found"
                );
                return Err(error);
            }
            return Ok(Self::default());
        }

        Self::load_from_path(path.to_path_buf())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "codeguard::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(
            config::File::from(path.as_path()).format(config::FileFormat::Toml),
        );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "codeguard::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawCodeguardConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "codeguard::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "codeguard::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawCodeguardConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let layout = parse_layout_section(raw.layout, &path)?;
        let conventions = parse_conventions_section(raw.conventions, &path)?;

        Ok(Self {
            layout,
            conventions,
            source_path: Some(path),
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Reject empty values and values that would escape a single path segment.
pub(crate) fn validate_segment(
    path: &Path,
    field: &'static str,
    value: &str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "Value cannot be empty".into(),
        });
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: format!("Value must be a single path segment: {value}"),
        });
    }
    Ok(())
}
