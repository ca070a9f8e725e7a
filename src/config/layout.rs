use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validate_segment;
use crate::lib::errors::ConfigError;

pub const DEFAULT_SRC_DIR_NAME: &str = "src";
pub const DEFAULT_TESTS_DIR_NAME: &str = "tests";
pub const DEFAULT_DOCS_DIR_NAME: &str = "docs";
pub const DEFAULT_REF_DIR_NAME: &str = "reference";

/// Directory names used to locate the three trees inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSection {
    pub src_dir_name: String,
    /// Name of the package directory under `src_dir_name`; inferred when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules_dir_name: Option<String>,
    pub tests_dir_name: String,
    pub docs_dir_name: String,
    pub ref_dir_name: String,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            src_dir_name: DEFAULT_SRC_DIR_NAME.to_string(),
            modules_dir_name: None,
            tests_dir_name: DEFAULT_TESTS_DIR_NAME.to_string(),
            docs_dir_name: DEFAULT_DOCS_DIR_NAME.to_string(),
            ref_dir_name: DEFAULT_REF_DIR_NAME.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLayoutSection {
    pub src_dir_name: Option<String>,
    pub modules_dir_name: Option<String>,
    pub tests_dir_name: Option<String>,
    pub docs_dir_name: Option<String>,
    pub ref_dir_name: Option<String>,
}

/// Overrides coming from the command line; each one wins over the file value.
#[derive(Debug, Clone, Default)]
pub struct LayoutOverrides {
    pub src_dir_name: Option<String>,
    pub modules_dir_name: Option<String>,
    pub tests_dir_name: Option<String>,
    pub docs_dir_name: Option<String>,
    pub ref_dir_name: Option<String>,
}

pub fn parse_layout_section(
    raw: Option<RawLayoutSection>,
    path: &Path,
) -> Result<LayoutSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = LayoutSection::default();

    let layout = LayoutSection {
        src_dir_name: raw.src_dir_name.unwrap_or(defaults.src_dir_name),
        modules_dir_name: raw.modules_dir_name,
        tests_dir_name: raw.tests_dir_name.unwrap_or(defaults.tests_dir_name),
        docs_dir_name: raw.docs_dir_name.unwrap_or(defaults.docs_dir_name),
        ref_dir_name: raw.ref_dir_name.unwrap_or(defaults.ref_dir_name),
    };
    validate_layout(&layout, path)?;
    Ok(layout)
}

impl LayoutSection {
    /// Apply command-line overrides and re-validate the result.
    pub fn with_overrides(
        self,
        overrides: LayoutOverrides,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let layout = Self {
            src_dir_name: overrides.src_dir_name.unwrap_or(self.src_dir_name),
            modules_dir_name: overrides.modules_dir_name.or(self.modules_dir_name),
            tests_dir_name: overrides.tests_dir_name.unwrap_or(self.tests_dir_name),
            docs_dir_name: overrides.docs_dir_name.unwrap_or(self.docs_dir_name),
            ref_dir_name: overrides.ref_dir_name.unwrap_or(self.ref_dir_name),
        };
        validate_layout(&layout, path)?;
        Ok(layout)
    }
}

fn validate_layout(layout: &LayoutSection, path: &Path) -> Result<(), ConfigError> {
    validate_segment(path, "layout.src_dir_name", &layout.src_dir_name)?;
    if let Some(name) = &layout.modules_dir_name {
        validate_segment(path, "layout.modules_dir_name", name)?;
    }
    validate_segment(path, "layout.tests_dir_name", &layout.tests_dir_name)?;
    validate_segment(path, "layout.docs_dir_name", &layout.docs_dir_name)?;
    validate_segment(path, "layout.ref_dir_name", &layout.ref_dir_name)
}
