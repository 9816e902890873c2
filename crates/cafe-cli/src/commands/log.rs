//! `cafe log` - print the activity log.

use tracing::debug;

use cafe_adapters::global;
use cafe_core::application::LogSnapshot;
use cafe_core::domain::{Severity, TIMESTAMP_FORMAT};

use crate::{cli::LogArgs, error::CliResult, output::OutputManager};

pub fn execute(args: LogArgs, output: OutputManager) -> CliResult<()> {
    let snapshot = global::activity_log().read_log();
    debug!(entries = snapshot.entries().len(), "Read activity log");
    render(&snapshot, args.raw, &output)
}

fn render(snapshot: &LogSnapshot, raw: bool, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(&snapshot.entries());
    }
    // Raw mode, and any empty log, print exactly the stored text or the sentinel.
    if raw || snapshot.is_empty() {
        output.print(&snapshot.to_string())?;
        return Ok(());
    }

    for entry in snapshot.entries() {
        let line = format!("{} {}", entry.timestamp.format(TIMESTAMP_FORMAT), entry.message);
        match entry.severity {
            Severity::Success => output.success(&line)?,
            Severity::Warning => output.warning(&line)?,
            Severity::Error => output.error(&line)?,
        }
    }
    Ok(())
}
