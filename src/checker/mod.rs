//! Project checker: validates every module's test file and API reference page,
//! optionally repairs them, and finds test/reference files without a module.
use std::{
    collections::HashSet,
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    config::Conventions,
    lib::{
        errors::{DirError, RefFileError, SetupError, TestFileError},
        fs::{file_name_str, has_extension, walk_files},
        paths, telemetry,
    },
};

pub mod module;
pub mod outcome;

pub use module::ModuleDescriptor;
pub use outcome::{CheckReport, ModuleReport, Outcome};

/// The three directory trees a project is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoots {
    /// Package directory holding the module sources.
    pub modules: PathBuf,
    pub tests: PathBuf,
    /// API reference documentation directory.
    pub reference: PathBuf,
}

impl ProjectRoots {
    /// Same roots in absolute, canonical form.
    pub fn resolved(&self) -> Self {
        Self {
            modules: paths::resolve(&self.modules),
            tests: paths::resolve(&self.tests),
            reference: paths::resolve(&self.reference),
        }
    }

    fn ensure_dirs(&self) -> Result<(), DirError> {
        for (path, kind) in [
            (&self.modules, "modules source"),
            (&self.tests, "test"),
            (&self.reference, "API reference documentation"),
        ] {
            if !path.is_dir() {
                return Err(DirError::NotFound {
                    path: path.clone(),
                    kind,
                });
            }
        }
        Ok(())
    }
}

/// Which repairs the checker may perform on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixPolicy {
    /// Create or repair test and reference files.
    pub auto_fix: bool,
    /// Delete test and reference files without a module.
    pub auto_remove: bool,
}

type FixFn = fn(&ModuleDescriptor) -> io::Result<()>;
type RemoveFn = fn(&Path) -> io::Result<()>;

/// Project checker over a fixed set of modules.
#[derive(Debug, Clone)]
pub struct Checker {
    roots: ProjectRoots,
    conventions: Conventions,
    policy: FixPolicy,
    modules: Vec<ModuleDescriptor>,
}

impl Checker {
    /// Resolve the roots and collect a descriptor for every public module.
    ///
    /// Any module that cannot be described aborts construction.
    pub fn new(
        roots: ProjectRoots,
        conventions: Conventions,
        policy: FixPolicy,
    ) -> Result<Self, SetupError> {
        let roots = roots.resolved();
        roots.ensure_dirs()?;

        let module_files = walk_files(&roots.modules, |path| {
            file_name_str(path).is_some_and(|name| conventions.is_module_file_name(name))
        })
        .map_err(|source| DirError::Listing {
            path: roots.modules.clone(),
            source,
        })?;

        let mut modules = module_files
            .iter()
            .map(|path| ModuleDescriptor::new(path, &roots, &conventions))
            .collect::<Result<Vec<_>, _>>()?;

        // Symlinked sources resolve to their target; keep one descriptor per file.
        let mut seen = HashSet::new();
        modules.retain(|module| {
            let first = seen.insert(module.module_file().to_path_buf());
            if !first {
                debug!(
                    target: "codeguard::checker",
                    module_file = %module.module_file().display(),
                    "Skipped duplicate module file"
                );
            }
            first
        });

        telemetry::log_roots(&roots.modules, &roots.tests, &roots.reference, modules.len());

        Ok(Self {
            roots,
            conventions,
            policy,
            modules,
        })
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    fn check_module_test_file(&self, module: &ModuleDescriptor) -> Option<Outcome> {
        let error = module.check_test_file().err()?;
        let fix: Option<FixFn> = match error {
            TestFileError::NotFound { .. } => Some(ModuleDescriptor::fix_missing_test_file),
            TestFileError::MissingDocstring { .. } | TestFileError::DocstringMismatch { .. } => {
                Some(ModuleDescriptor::fix_test_docstring)
            }
            TestFileError::Read { .. } => None,
        };
        Some(self.handle_failure(module, &error, fix))
    }

    fn check_module_ref_file(&self, module: &ModuleDescriptor) -> Option<Outcome> {
        let error = module.check_ref_file().err()?;
        let fix: Option<FixFn> = match error {
            RefFileError::NotFound { .. } => Some(ModuleDescriptor::fix_missing_ref_file),
            RefFileError::ContentMismatch { .. } => Some(ModuleDescriptor::fix_ref_content),
            RefFileError::Read { .. } => None,
        };
        Some(self.handle_failure(module, &error, fix))
    }

    fn handle_failure(
        &self,
        module: &ModuleDescriptor,
        error: &dyn Display,
        fix: Option<FixFn>,
    ) -> Outcome {
        let message = error.to_string();
        let Some(fix) = fix.filter(|_| self.policy.auto_fix) else {
            debug!(
                target: "codeguard::checker",
                qualname = module.qualname(),
                reason = %message,
                "Recorded unresolved issue"
            );
            return Outcome::Unresolved { message };
        };

        match fix(module) {
            Ok(()) => {
                info!(
                    target: "codeguard::checker",
                    qualname = module.qualname(),
                    reason = %message,
                    "Applied fix"
                );
                Outcome::Fixed { message }
            }
            Err(err) => {
                warn!(
                    target: "codeguard::checker",
                    qualname = module.qualname(),
                    reason = %message,
                    error = %err,
                    "Failed to apply fix"
                );
                Outcome::FixFailed {
                    message,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Check one module's test file then its reference file, independently.
    pub fn check_module(&self, module: &ModuleDescriptor) -> Vec<Outcome> {
        let test_outcome = self.check_module_test_file(module);
        let ref_outcome = self.check_module_ref_file(module);
        test_outcome.into_iter().chain(ref_outcome).collect()
    }

    /// Check every module, keeping only those with at least one outcome.
    pub fn check_all_modules(&self) -> Vec<ModuleReport> {
        self.modules
            .iter()
            .filter_map(|module| {
                let outcomes = self.check_module(module);
                (!outcomes.is_empty()).then(|| ModuleReport {
                    qualname: module.qualname().to_string(),
                    module_file: module.module_file().to_path_buf(),
                    outcomes,
                })
            })
            .collect()
    }

    /// Find test and reference files that map to no known module.
    ///
    /// The tests tree is scanned before the reference tree.
    pub fn check_unexpected_files(&self) -> Vec<Outcome> {
        self.scan_unexpected_files(|path| fs::remove_file(path))
    }

    fn scan_unexpected_files(&self, remove: RemoveFn) -> Vec<Outcome> {
        let known = self
            .modules
            .iter()
            .map(ModuleDescriptor::module_file)
            .collect::<HashSet<_>>();
        let mut outcomes = Vec::new();

        let test_files = walk_files(&self.roots.tests, |path| {
            file_name_str(path).is_some_and(|name| self.conventions.is_test_file_name(name))
        });
        match test_files {
            Ok(files) => {
                for test_file in files {
                    let module_file = self.module_file_for_test(&test_file);
                    if !module_file.is_some_and(|path| known.contains(path.as_path())) {
                        let message = format!("Unexpected test file {}.", test_file.display());
                        outcomes.push(self.handle_unexpected(&test_file, message, remove));
                    }
                }
            }
            Err(err) => outcomes.push(scan_failure(&self.roots.tests, "test", &err)),
        }

        let ref_files = walk_files(&self.roots.reference, |path| {
            has_extension(path, &self.conventions.doc_extension)
        });
        match ref_files {
            Ok(files) => {
                for ref_file in files {
                    let module_file = self.module_file_for_ref(&ref_file);
                    if !module_file.is_some_and(|path| known.contains(path.as_path())) {
                        let message = format!(
                            "Unexpected API reference documentation file {}.",
                            ref_file.display()
                        );
                        outcomes.push(self.handle_unexpected(&ref_file, message, remove));
                    }
                }
            }
            Err(err) => outcomes.push(scan_failure(
                &self.roots.reference,
                "API reference documentation",
                &err,
            )),
        }

        outcomes
    }

    fn module_file_for_test(&self, test_file: &Path) -> Option<PathBuf> {
        let relative = test_file.strip_prefix(&self.roots.tests).ok()?;
        let module_name = self
            .conventions
            .module_file_name_for_test(file_name_str(test_file)?)?;
        Some(paths::rerooted_with_name(
            &self.roots.modules,
            relative,
            module_name,
        ))
    }

    fn module_file_for_ref(&self, ref_file: &Path) -> Option<PathBuf> {
        let relative = ref_file.strip_prefix(&self.roots.reference).ok()?;
        Some(paths::rerooted_with_extension(
            &self.roots.modules,
            relative,
            &self.conventions.module_extension,
        ))
    }

    fn handle_unexpected(&self, path: &Path, message: String, remove: RemoveFn) -> Outcome {
        if !self.policy.auto_remove {
            debug!(
                target: "codeguard::checker",
                path = %path.display(),
                "Found unexpected file"
            );
            return Outcome::Unresolved { message };
        }

        match remove(path) {
            Ok(()) => {
                info!(
                    target: "codeguard::checker",
                    path = %path.display(),
                    "Removed unexpected file"
                );
                Outcome::Removed { message }
            }
            Err(err) => {
                warn!(
                    target: "codeguard::checker",
                    path = %path.display(),
                    error = %err,
                    "Failed to remove unexpected file"
                );
                Outcome::RemovalFailed {
                    message,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Run both phases and collect every outcome.
    pub fn run(&self) -> CheckReport {
        let report = CheckReport {
            modules: self.check_all_modules(),
            unexpected_files: self.check_unexpected_files(),
        };
        telemetry::log_summary(
            report.modules.len(),
            report.unexpected_files.len(),
            report.had_issues(),
        );
        report
    }
}

fn scan_failure(dir: &Path, kind: &str, err: &io::Error) -> Outcome {
    warn!(
        target: "codeguard::checker",
        path = %dir.display(),
        error = %err,
        "Failed to scan directory"
    );
    Outcome::Unresolved {
        message: format!("Could not scan {kind} directory {}: {err}", dir.display()),
    }
}
