//! Per-module descriptor: derived names, expected files, their checks and fixes.
use std::{
    fs,
    hash::{Hash, Hasher},
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::ProjectRoots;
use crate::{
    config::{
        conventions::{starts_with_docstring_marker, strip_docstring_markers},
        Conventions,
    },
    lib::{
        errors::{ModuleFileError, RefFileError, TestFileError},
        fs::{read_first_line, write_with_parents},
        paths,
    },
};

/// One discovered source module and everything derived from it.
///
/// Identity is the module file path; every other field is a pure function of
/// that path, the project roots, the conventions and the module's first line.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    module_file: PathBuf,
    name: String,
    qualname: String,
    is_entry_point: bool,
    expected_test_file: PathBuf,
    expected_ref_file: PathBuf,
    module_docstring: String,
    expected_test_docstring: String,
    expected_ref_content: String,
}

impl ModuleDescriptor {
    pub fn new(
        module_file: &Path,
        roots: &ProjectRoots,
        conventions: &Conventions,
    ) -> Result<Self, ModuleFileError> {
        let module_file = paths::resolve(module_file);
        if !module_file.is_file() {
            return Err(ModuleFileError::NotFound { path: module_file });
        }
        let roots = roots.resolved();

        let relative = module_file
            .strip_prefix(&roots.modules)
            .map_err(|_| ModuleFileError::OutsideModulesDir {
                path: module_file.clone(),
                modules_dir: roots.modules.clone(),
            })?
            .to_path_buf();
        let package_relative = roots
            .modules
            .parent()
            .and_then(|parent| module_file.strip_prefix(parent).ok())
            .unwrap_or(relative.as_path());

        let stem = module_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = module_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = conventions.display_name(&stem);
        let qualname = paths::dotted_name(package_relative);
        let is_entry_point = conventions.is_entry_point(&stem);
        let expected_test_file = paths::rerooted_with_name(
            &roots.tests,
            &relative,
            &conventions.test_file_name(&file_name),
        );
        let expected_ref_file =
            paths::rerooted_with_extension(&roots.reference, &relative, &conventions.doc_extension);

        let module_docstring = Self::read_module_docstring(&module_file)?;
        let expected_test_docstring = conventions.test_docstring(&module_docstring);
        let expected_ref_content = conventions.ref_content(&name, &qualname, is_entry_point);

        debug!(
            target: "codeguard::module",
            module_file = %module_file.display(),
            qualname = %qualname,
            entry_point = is_entry_point,
            "Derived module descriptor"
        );

        Ok(Self {
            module_file,
            name,
            qualname,
            is_entry_point,
            expected_test_file,
            expected_ref_file,
            module_docstring,
            expected_test_docstring,
            expected_ref_content,
        })
    }

    /// Read the docstring line of a module file, stripped of its quotes.
    pub fn read_module_docstring(module_file: &Path) -> Result<String, ModuleFileError> {
        let line = read_first_line(module_file).map_err(|source| ModuleFileError::Read {
            path: module_file.to_path_buf(),
            source,
        })?;

        strip_docstring_markers(&line)
            .map(str::to_string)
            .ok_or_else(|| ModuleFileError::MissingDocstring {
                path: module_file.to_path_buf(),
            })
    }

    pub fn module_file(&self) -> &Path {
        &self.module_file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    pub fn is_entry_point(&self) -> bool {
        self.is_entry_point
    }

    pub fn expected_test_file(&self) -> &Path {
        &self.expected_test_file
    }

    pub fn expected_ref_file(&self) -> &Path {
        &self.expected_ref_file
    }

    pub fn module_docstring(&self) -> &str {
        &self.module_docstring
    }

    pub fn expected_test_docstring(&self) -> &str {
        &self.expected_test_docstring
    }

    pub fn expected_ref_content(&self) -> &str {
        &self.expected_ref_content
    }

    /// Check that the test file exists and opens with the expected docstring.
    ///
    /// Entry-point modules are exempt. Only the first line is inspected.
    pub fn check_test_file(&self) -> Result<(), TestFileError> {
        if self.is_entry_point {
            return Ok(());
        }

        let path = &self.expected_test_file;
        if !path.is_file() {
            return Err(TestFileError::NotFound { path: path.clone() });
        }

        let line = read_first_line(path).map_err(|source| TestFileError::Read {
            path: path.clone(),
            source,
        })?;

        let found = line.trim();
        if !starts_with_docstring_marker(found) {
            return Err(TestFileError::MissingDocstring {
                path: path.clone(),
                expected: self.expected_test_docstring.clone(),
            });
        }
        if found != self.expected_test_docstring {
            return Err(TestFileError::DocstringMismatch {
                path: path.clone(),
                expected: self.expected_test_docstring.clone(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Check that the reference file exists and its trimmed content is exactly the expected one.
    pub fn check_ref_file(&self) -> Result<(), RefFileError> {
        let path = &self.expected_ref_file;
        if !path.is_file() {
            return Err(RefFileError::NotFound { path: path.clone() });
        }

        let text = fs::read_to_string(path).map_err(|source| RefFileError::Read {
            path: path.clone(),
            source,
        })?;

        let found = text.trim();
        if found != self.expected_ref_content {
            return Err(RefFileError::ContentMismatch {
                path: path.clone(),
                expected: self.expected_ref_content.clone(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Create the test file holding only the expected docstring.
    pub fn fix_missing_test_file(&self) -> io::Result<()> {
        write_with_parents(
            &self.expected_test_file,
            &format!("{}\n", self.expected_test_docstring),
        )
    }

    /// Replace the first line of the test file with the expected docstring, keeping the rest.
    pub fn fix_test_docstring(&self) -> io::Result<()> {
        let content = fs::read_to_string(&self.expected_test_file)?;

        let mut lines = content.lines().collect::<Vec<_>>();
        let new_content = match lines.first_mut() {
            Some(first) => {
                *first = self.expected_test_docstring.as_str();
                lines.join("\n")
            }
            None => self.expected_test_docstring.clone(),
        };

        fs::write(&self.expected_test_file, format!("{new_content}\n"))
    }

    /// Create the reference file with the expected content.
    pub fn fix_missing_ref_file(&self) -> io::Result<()> {
        write_with_parents(
            &self.expected_ref_file,
            &format!("{}\n", self.expected_ref_content),
        )
    }

    /// Overwrite the reference file with the expected content.
    pub fn fix_ref_content(&self) -> io::Result<()> {
        fs::write(
            &self.expected_ref_file,
            format!("{}\n", self.expected_ref_content),
        )
    }
}

impl PartialEq for ModuleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.module_file == other.module_file
    }
}

impl Eq for ModuleDescriptor {}

impl Hash for ModuleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module_file.hash(state);
    }
}
