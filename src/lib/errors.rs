use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors raised while resolving the project directories.
#[derive(Debug, Error)]
pub enum DirError {
    /// A required directory does not exist.
    #[error("Could not find {kind} directory {path}.")]
    NotFound { path: PathBuf, kind: &'static str },
    /// The modules directory could not be inferred from the source directory.
    #[error("Expected a single modules source directory in source directory {src_dir} (found {found}).")]
    AmbiguousModulesDir { src_dir: PathBuf, found: usize },
    /// The directory exists but its entries could not be listed.
    #[error("Could not list directory {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while building a module descriptor.
#[derive(Debug, Error)]
pub enum ModuleFileError {
    #[error("Could not find module file {path}.")]
    NotFound { path: PathBuf },
    #[error("Could not read module file {path}.")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Missing docstring in module file {path}.")]
    MissingDocstring { path: PathBuf },
    /// The module file does not live under the modules root.
    #[error("Module file {path} is outside of modules directory {modules_dir}.")]
    OutsideModulesDir { path: PathBuf, modules_dir: PathBuf },
}

/// Failures of a module's test file check.
#[derive(Debug, Error)]
pub enum TestFileError {
    #[error("Could not find test file {path}.")]
    NotFound { path: PathBuf },
    #[error("Could not read test file {path}.")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Missing docstring in test file {path}.\n  Expected: {expected}")]
    MissingDocstring { path: PathBuf, expected: String },
    #[error("Docstring mismatch in test file {path}.\n  Expected: {expected}\n  Found: {found}")]
    DocstringMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Failures of a module's API reference documentation file check.
#[derive(Debug, Error)]
pub enum RefFileError {
    #[error("Could not find API reference documentation file {path}.")]
    NotFound { path: PathBuf },
    #[error("Could not read API reference documentation file {path}.")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "Content mismatch in API reference documentation file {path}.\n  Expected:\n{expected}\n  Found:\n{found}"
    )]
    ContentMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Fatal errors that stop a run before any check executes.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Dir(#[from] DirError),
    #[error(transparent)]
    Module(#[from] ModuleFileError),
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file {path} does not exist")]
    Missing { path: PathBuf },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}
