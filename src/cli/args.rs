//! CLI argument definitions and profile construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

use super::{resolve_config_source, resolve_project_dir, CheckProfile, ConfigProfile, OutputFormat};
use crate::{checker::FixPolicy, config::LayoutOverrides};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    Check(CheckProfile),
    ShowConfig(ConfigProfile),
}

/// Optional CLI commands besides the default check.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the effective configuration as TOML.
    #[command(about = "Print the effective configuration (defaults, file, flags) as TOML")]
    Config(ConfigArgs),
}

/// Arguments for `config`.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments locating the project and its directories.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Project directory (defaults to the current directory).
    ///
    /// A directory named `config` must be given as `./config`; the bare word selects the subcommand.
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
    /// Modules directory name under the source directory (inferred when omitted).
    #[arg(value_name = "MODULES_DIR_NAME")]
    pub modules_dir_name: Option<String>,
    /// Source directory name [default: src].
    #[arg(long)]
    pub src_dir_name: Option<String>,
    /// Tests directory name [default: tests].
    #[arg(long)]
    pub tests_dir_name: Option<String>,
    /// Documentation directory name [default: docs].
    #[arg(long)]
    pub docs_dir_name: Option<String>,
    /// API reference directory name under the documentation directory [default: reference].
    #[arg(long)]
    pub ref_dir_name: Option<String>,
    /// Path to codeguard.toml (overrides CODEGUARD_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config_override: Option<PathBuf>,
}

impl ProjectArgs {
    fn overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            src_dir_name: self.src_dir_name.clone(),
            modules_dir_name: self.modules_dir_name.clone(),
            tests_dir_name: self.tests_dir_name.clone(),
            docs_dir_name: self.docs_dir_name.clone(),
            ref_dir_name: self.ref_dir_name.clone(),
        }
    }

    fn into_config_profile(self) -> Result<ConfigProfile> {
        let project_dir = resolve_project_dir(self.project_dir.clone())?;
        let config_source = resolve_config_source(self.config_override.clone(), &project_dir);
        Ok(ConfigProfile {
            overrides: self.overrides(),
            project_dir,
            config_source,
        })
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "codeguard",
    author,
    version,
    about = "Check that every module has a matching test file and API reference page",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    /// Create missing files and repair mismatched docstrings and reference pages.
    #[arg(long, default_value_t = false)]
    pub fix: bool,
    /// Remove test and reference files that match no module.
    #[arg(long, default_value_t = false)]
    pub rm: bool,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl CheckArgs {
    /// Build a `CheckProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<CheckProfile> {
        let policy = FixPolicy {
            auto_fix: self.fix,
            auto_remove: self.rm,
        };
        let config = self.project.into_config_profile()?;

        Ok(CheckProfile {
            project_dir: config.project_dir,
            config_source: config.config_source,
            overrides: config.overrides,
            policy,
            format: self.format,
        })
    }

    /// Parse CLI args into either check mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(CliCommand::Config(args)) => Ok(ParsedCommand::ShowConfig(
                args.project.into_config_profile()?,
            )),
            None => Ok(ParsedCommand::Check(self.build()?)),
        }
    }
}
