//! CLI entrypoint module structure.
pub mod args;
pub mod profile;

pub use args::{CheckArgs, CliCommand, ConfigArgs, ParsedCommand, ProjectArgs};
pub use profile::{
    resolve_config_source, resolve_project_dir, resolve_roots, CheckProfile, ConfigProfile,
    OutputFormat,
};
