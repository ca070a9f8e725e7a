//! Check-run orchestration, report rendering and exit status mapping.
mod report;
mod startup;

pub use report::{render_json, render_report, render_text};
pub use startup::{run_check, show_config, RunStatus, RuntimeExit};
