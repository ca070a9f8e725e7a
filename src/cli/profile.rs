//! Check profiles and project directory resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use clap::ValueEnum;

use crate::{
    checker::{FixPolicy, ProjectRoots},
    config::{ConfigSource, LayoutOverrides, LayoutSection, CONFIG_ENV_KEY, DEFAULT_CONFIG_FILE},
    lib::{errors::DirError, fs::subdirectories, paths},
};

/// Report output format.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// Resolved inputs for a check run.
#[derive(Debug, Clone)]
pub struct CheckProfile {
    pub project_dir: PathBuf,
    pub config_source: ConfigSource,
    pub overrides: LayoutOverrides,
    pub policy: FixPolicy,
    pub format: OutputFormat,
}

/// Resolved inputs for printing the effective configuration.
#[derive(Debug, Clone)]
pub struct ConfigProfile {
    pub project_dir: PathBuf,
    pub config_source: ConfigSource,
    pub overrides: LayoutOverrides,
}

/// Resolve the project directory: the given path, or the current directory.
pub fn resolve_project_dir(project_dir: Option<PathBuf>) -> Result<PathBuf, DirError> {
    let Some(project_dir) = project_dir else {
        return env::current_dir().map_err(|source| DirError::Listing {
            path: PathBuf::from("."),
            source,
        });
    };

    let project_dir = paths::resolve(&project_dir);
    if !project_dir.is_dir() {
        return Err(DirError::NotFound {
            path: project_dir,
            kind: "project",
        });
    }
    Ok(project_dir)
}

/// Resolve the config source in the order: CLI override → env var → project default.
pub fn resolve_config_source(override_path: Option<PathBuf>, project_dir: &Path) -> ConfigSource {
    if let Some(path) = override_path {
        return ConfigSource::Cli(absolutize(path));
    }
    if let Some(path) = env::var_os(CONFIG_ENV_KEY).filter(|value| !value.is_empty()) {
        return ConfigSource::Env(absolutize(PathBuf::from(path)));
    }
    ConfigSource::ProjectDefault(project_dir.join(DEFAULT_CONFIG_FILE))
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    paths::resolve(&path)
}

/// Locate the modules, tests and reference roots of a project.
pub fn resolve_roots(project_dir: &Path, layout: &LayoutSection) -> Result<ProjectRoots, DirError> {
    Ok(ProjectRoots {
        modules: find_modules_dir(
            project_dir,
            &layout.src_dir_name,
            layout.modules_dir_name.as_deref(),
        )?,
        tests: find_tests_dir(project_dir, &layout.tests_dir_name)?,
        reference: find_ref_dir(project_dir, &layout.docs_dir_name, &layout.ref_dir_name)?,
    })
}

fn existing_dir(path: PathBuf, kind: &'static str) -> Result<PathBuf, DirError> {
    if path.is_dir() {
        Ok(path)
    } else {
        Err(DirError::NotFound { path, kind })
    }
}

fn find_modules_dir(
    project_dir: &Path,
    src_dir_name: &str,
    modules_dir_name: Option<&str>,
) -> Result<PathBuf, DirError> {
    let src_dir = existing_dir(project_dir.join(src_dir_name), "source")?;

    match modules_dir_name {
        Some(name) => existing_dir(src_dir.join(name), "modules source"),
        None => infer_modules_dir(&src_dir),
    }
}

/// The modules directory is the only subdirectory of the source directory.
fn infer_modules_dir(src_dir: &Path) -> Result<PathBuf, DirError> {
    let mut subdirs = subdirectories(src_dir).map_err(|source| DirError::Listing {
        path: src_dir.to_path_buf(),
        source,
    })?;
    if subdirs.len() != 1 {
        return Err(DirError::AmbiguousModulesDir {
            src_dir: src_dir.to_path_buf(),
            found: subdirs.len(),
        });
    }
    Ok(subdirs.remove(0))
}

fn find_tests_dir(project_dir: &Path, tests_dir_name: &str) -> Result<PathBuf, DirError> {
    existing_dir(project_dir.join(tests_dir_name), "test")
}

fn find_ref_dir(
    project_dir: &Path,
    docs_dir_name: &str,
    ref_dir_name: &str,
) -> Result<PathBuf, DirError> {
    let docs_dir = existing_dir(project_dir.join(docs_dir_name), "documentation")?;
    existing_dir(docs_dir.join(ref_dir_name), "API reference documentation")
}
