//! Naming conventions that tie a module to its test file and reference page.
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validate_segment;
use crate::lib::errors::ConfigError;

pub const DEFAULT_MODULE_EXTENSION: &str = "py";
pub const DEFAULT_DOC_EXTENSION: &str = "md";
pub const DEFAULT_TEST_PREFIX: &str = "test_";
pub const DEFAULT_PRIVATE_PREFIX: &str = "_";
pub const DEFAULT_ENTRY_POINT_STEM: &str = "cli";
pub const DEFAULT_ENTRY_POINT_COMMAND: &str = "cli";
pub const DEFAULT_ENTRY_POINT_STYLE: &str = "table";
/// Display names that title-casing gets wrong.
pub const DEFAULT_NAME_EXCEPTIONS: &[(&str, &str)] = &[("Cli", "CLI"), ("Geotiff", "GeoTIFF")];

/// Opening markers accepted for a docstring line.
pub const DOCSTRING_MARKERS: [&str; 2] = ["\"\"\"", "'''"];

/// One entry of the display-name exception table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameException {
    pub name: String,
    pub display: String,
}

/// Parameters of the `mkdocs-click` block generated for the entry-point module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointDoc {
    /// Module path documented by the block; defaults to the entry point's qualified name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub command: String,
    /// Program name; defaults to the top-level package name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prog_name: Option<String>,
    pub style: String,
}

impl Default for EntryPointDoc {
    fn default() -> Self {
        Self {
            module: None,
            command: DEFAULT_ENTRY_POINT_COMMAND.to_string(),
            prog_name: None,
            style: DEFAULT_ENTRY_POINT_STYLE.to_string(),
        }
    }
}

impl EntryPointDoc {
    fn render(&self, name: &str, qualname: &str) -> String {
        let module = self.module.as_deref().unwrap_or(qualname);
        let prog_name = self
            .prog_name
            .as_deref()
            .unwrap_or_else(|| qualname.split('.').next().unwrap_or(qualname));
        format!(
            "# {name}\n\
             \n\
             ::: mkdocs-click\n    \
             :module: {module}\n    \
             :command: {command}\n    \
             :prog_name: {prog_name}\n    \
             :style: {style}",
            command = self.command,
            style = self.style,
        )
    }
}

/// Naming conventions for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conventions {
    pub module_extension: String,
    pub doc_extension: String,
    pub test_prefix: String,
    pub private_prefix: String,
    pub entry_point_stem: String,
    pub entry_point: EntryPointDoc,
    pub name_exceptions: Vec<NameException>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            module_extension: DEFAULT_MODULE_EXTENSION.to_string(),
            doc_extension: DEFAULT_DOC_EXTENSION.to_string(),
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
            private_prefix: DEFAULT_PRIVATE_PREFIX.to_string(),
            entry_point_stem: DEFAULT_ENTRY_POINT_STEM.to_string(),
            entry_point: EntryPointDoc::default(),
            name_exceptions: default_name_exceptions(),
        }
    }
}

fn default_name_exceptions() -> Vec<NameException> {
    DEFAULT_NAME_EXCEPTIONS
        .iter()
        .map(|(name, display)| NameException {
            name: (*name).to_string(),
            display: (*display).to_string(),
        })
        .collect()
}

impl Conventions {
    /// Whether `file_name` names a public module source file.
    pub fn is_module_file_name(&self, file_name: &str) -> bool {
        !file_name.starts_with(&self.private_prefix) && self.has_module_extension(file_name)
    }

    /// Whether `file_name` follows the test-file naming convention.
    pub fn is_test_file_name(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.test_prefix) && self.has_module_extension(file_name)
    }

    fn has_module_extension(&self, file_name: &str) -> bool {
        Path::new(file_name).extension().and_then(|ext| ext.to_str())
            == Some(self.module_extension.as_str())
    }

    pub fn test_file_name(&self, module_file_name: &str) -> String {
        format!("{}{module_file_name}", self.test_prefix)
    }

    /// Reverse of [`Conventions::test_file_name`].
    pub fn module_file_name_for_test<'a>(&self, test_file_name: &'a str) -> Option<&'a str> {
        test_file_name.strip_prefix(self.test_prefix.as_str())
    }

    pub fn is_entry_point(&self, stem: &str) -> bool {
        stem == self.entry_point_stem
    }

    /// Human-readable name for a module file stem.
    pub fn display_name(&self, stem: &str) -> String {
        let name = title_case(&stem.replace('_', " "));
        self.name_exceptions
            .iter()
            .find(|exception| exception.name == name)
            .map_or(name, |exception| exception.display.clone())
    }

    pub fn test_docstring(&self, module_docstring: &str) -> String {
        format!("\"\"\"Tests: {module_docstring}\"\"\"")
    }

    pub fn ref_content(&self, name: &str, qualname: &str, entry_point: bool) -> String {
        if entry_point {
            return self.entry_point.render(name, qualname);
        }
        format!("# {name}\n\n::: {qualname}")
    }
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Strip one layer of the opening docstring marker from both ends of a trimmed line.
///
/// Returns `None` when the line does not open with a docstring marker.
pub fn strip_docstring_markers(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let marker = DOCSTRING_MARKERS
        .iter()
        .find(|marker| trimmed.starts_with(*marker))?;
    let inner = &trimmed[marker.len()..];
    Some(inner.strip_suffix(*marker).unwrap_or(inner).trim())
}

/// Whether a trimmed line opens with a docstring marker.
pub fn starts_with_docstring_marker(line: &str) -> bool {
    DOCSTRING_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker))
}

#[derive(Debug, Deserialize, Default)]
pub struct RawConventionsSection {
    pub module_extension: Option<String>,
    pub doc_extension: Option<String>,
    pub test_prefix: Option<String>,
    pub private_prefix: Option<String>,
    pub entry_point_stem: Option<String>,
    pub entry_point: Option<RawEntryPointSection>,
    pub name_exceptions: Option<Vec<NameException>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawEntryPointSection {
    pub module: Option<String>,
    pub command: Option<String>,
    pub prog_name: Option<String>,
    pub style: Option<String>,
}

pub fn parse_conventions_section(
    raw: Option<RawConventionsSection>,
    path: &Path,
) -> Result<Conventions, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = Conventions::default();

    let module_extension = raw.module_extension.unwrap_or(defaults.module_extension);
    validate_extension(path, "conventions.module_extension", &module_extension)?;

    let doc_extension = raw.doc_extension.unwrap_or(defaults.doc_extension);
    validate_extension(path, "conventions.doc_extension", &doc_extension)?;

    let test_prefix = raw.test_prefix.unwrap_or(defaults.test_prefix);
    validate_segment(path, "conventions.test_prefix", &test_prefix)?;

    let private_prefix = raw.private_prefix.unwrap_or(defaults.private_prefix);
    validate_segment(path, "conventions.private_prefix", &private_prefix)?;

    let entry_point_stem = raw.entry_point_stem.unwrap_or(defaults.entry_point_stem);
    validate_segment(path, "conventions.entry_point_stem", &entry_point_stem)?;

    let entry_point = parse_entry_point_section(raw.entry_point, path)?;

    let mut name_exceptions = defaults.name_exceptions;
    for exception in raw.name_exceptions.unwrap_or_default() {
        if exception.name.trim().is_empty() || exception.display.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "conventions.name_exceptions",
                message: "Both `name` and `display` must be non-empty".into(),
            });
        }
        name_exceptions.retain(|existing| existing.name != exception.name);
        name_exceptions.push(exception);
    }

    Ok(Conventions {
        module_extension,
        doc_extension,
        test_prefix,
        private_prefix,
        entry_point_stem,
        entry_point,
        name_exceptions,
    })
}

fn parse_entry_point_section(
    raw: Option<RawEntryPointSection>,
    path: &Path,
) -> Result<EntryPointDoc, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = EntryPointDoc::default();
    let entry_point = EntryPointDoc {
        module: raw.module,
        command: raw.command.unwrap_or(defaults.command),
        prog_name: raw.prog_name,
        style: raw.style.unwrap_or(defaults.style),
    };

    for (field, value) in [
        ("conventions.entry_point.command", Some(&entry_point.command)),
        ("conventions.entry_point.style", Some(&entry_point.style)),
        ("conventions.entry_point.module", entry_point.module.as_ref()),
        (
            "conventions.entry_point.prog_name",
            entry_point.prog_name.as_ref(),
        ),
    ] {
        if value.is_some_and(|value| value.trim().is_empty() || value.contains('\n')) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field,
                message: "Provide a non-empty single-line value".into(),
            });
        }
    }
    Ok(entry_point)
}

fn validate_extension(path: &Path, field: &'static str, extension: &str) -> Result<(), ConfigError> {
    validate_segment(path, field, extension)?;
    if extension.contains('.') {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: format!("Give the extension without a dot: {extension}"),
        });
    }
    Ok(())
}
