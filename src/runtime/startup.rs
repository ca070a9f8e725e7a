use std::process::ExitCode;

use anyhow::{Context, Error};
use tracing::info;

use super::report::render_report;
use crate::{
    checker::Checker,
    cli::{resolve_roots, CheckProfile, ConfigProfile},
    config::{CodeguardConfig, ConfigSource, LayoutOverrides},
};

/// Exit code for a fatal setup or configuration error.
const SETUP_FAILURE: u8 = 2;

/// Outcome of a completed run, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    IssuesFound,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Clean => ExitCode::SUCCESS,
            RunStatus::IssuesFound => ExitCode::FAILURE,
        }
    }
}

/// Bundles a fatal error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:#}"),
            exit_code: ExitCode::from(SETUP_FAILURE),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}

fn load_config(
    config_source: &ConfigSource,
    overrides: LayoutOverrides,
) -> Result<CodeguardConfig, RuntimeExit> {
    let mut config = CodeguardConfig::load(config_source).map_err(RuntimeExit::from_error)?;
    config.layout = config
        .layout
        .with_overrides(overrides, config_source.path())
        .map_err(RuntimeExit::from_error)?;
    Ok(config)
}

/// Run every check for the profile's project and print the report.
pub fn run_check(profile: CheckProfile) -> Result<RunStatus, RuntimeExit> {
    let config = load_config(&profile.config_source, profile.overrides)?;
    let roots = resolve_roots(&profile.project_dir, &config.layout)
        .with_context(|| format!("failed to resolve project {}", profile.project_dir.display()))
        .map_err(RuntimeExit::from_error)?;

    info!(
        target: "codeguard::runtime",
        project_dir = %profile.project_dir.display(),
        auto_fix = profile.policy.auto_fix,
        auto_remove = profile.policy.auto_remove,
        format = profile.format.as_str(),
        "Starting check run"
    );

    let checker = Checker::new(roots, config.conventions, profile.policy)
        .map_err(RuntimeExit::from_error)?;
    let report = checker.run();

    let rendered = render_report(&report, profile.format).map_err(RuntimeExit::from_error)?;
    println!("{rendered}");

    Ok(if report.had_issues() {
        RunStatus::IssuesFound
    } else {
        RunStatus::Clean
    })
}

/// Print the effective configuration as TOML.
pub fn show_config(profile: ConfigProfile) -> Result<RunStatus, RuntimeExit> {
    let config = load_config(&profile.config_source, profile.overrides)?;
    let rendered = config
        .to_toml()
        .context("failed to render configuration as TOML")
        .map_err(RuntimeExit::from_error)?;
    print!("{rendered}");
    Ok(RunStatus::Clean)
}
