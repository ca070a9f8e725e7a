//! Entry point for codeguard.
use std::process::ExitCode;

use clap::Parser;
use codeguard::{
    cli::{CheckArgs, ParsedCommand},
    lib::telemetry,
    runtime::{self, RunStatus, RuntimeExit},
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(status) => status.exit_code(),
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<RunStatus, RuntimeExit> {
    let args = CheckArgs::parse();
    telemetry::init_tracing(args.verbose).map_err(RuntimeExit::from_error)?;
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::Check(profile) => runtime::run_check(profile),
        ParsedCommand::ShowConfig(profile) => runtime::show_config(profile),
    }
}
