//! Tracing initialization and structured log helpers for a check run.

use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Map the number of `-v` flags to a default filter directive.
pub const fn verbosity_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize `tracing` and format developer logs on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity-derived default.
pub fn init_tracing(verbose: u8) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbose)));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Emit the resolved project roots once the checker is constructed.
pub fn log_roots(modules: &Path, tests: &Path, reference: &Path, module_count: usize) {
    info!(
        target: "codeguard::checker",
        modules_dir = %modules.display(),
        tests_dir = %tests.display(),
        ref_dir = %reference.display(),
        module_count,
        "Collected modules"
    );
}

/// Emit the summary of a completed run.
pub fn log_summary(modules_with_issues: usize, unexpected_files: usize, had_issues: bool) {
    info!(
        target: "codeguard::runtime",
        modules_with_issues,
        unexpected_files,
        had_issues,
        "Completed check run"
    );
}
