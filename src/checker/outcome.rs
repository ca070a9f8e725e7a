//! Outcome records produced by a check run.
use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Result of a single check that found something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Issue left in place.
    Unresolved { message: String },
    /// Issue repaired by an auto-fix.
    Fixed { message: String },
    /// Auto-fix was attempted but the write failed.
    FixFailed { message: String, reason: String },
    /// Unexpected file deleted.
    Removed { message: String },
    /// Unexpected file could not be deleted.
    RemovalFailed { message: String, reason: String },
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Unresolved { message }
            | Self::Fixed { message }
            | Self::FixFailed { message, .. }
            | Self::Removed { message }
            | Self::RemovalFailed { message, .. } => message,
        }
    }

    /// True when the run took an action that resolved the issue.
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Fixed { .. } | Self::Removed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { message } => f.write_str(message),
            Self::Fixed { message } => write!(f, "Fixed: {}", indent(message)),
            Self::FixFailed { message, reason } => {
                write!(f, "Error fixing: {}\n  {reason}", indent(message))
            }
            Self::Removed { message } => write!(f, "Removed: {message}"),
            Self::RemovalFailed { message, reason } => {
                write!(f, "Error removing: {message}\n  {reason}")
            }
        }
    }
}

fn indent(message: &str) -> String {
    message.replace('\n', "\n  ")
}

/// Outcomes recorded for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub qualname: String,
    pub module_file: PathBuf,
    pub outcomes: Vec<Outcome>,
}

/// Everything a run found, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub modules: Vec<ModuleReport>,
    pub unexpected_files: Vec<Outcome>,
}

impl CheckReport {
    /// True when any module or unexpected-file outcome was recorded, fixed ones included.
    pub fn had_issues(&self) -> bool {
        !self.modules.is_empty() || !self.unexpected_files.is_empty()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.modules
            .iter()
            .flat_map(|module| module.outcomes.iter())
            .chain(self.unexpected_files.iter())
    }

    /// Number of outcomes that are still open after the run.
    pub fn unresolved_count(&self) -> usize {
        self.outcomes().filter(|outcome| !outcome.is_resolved()).count()
    }
}
