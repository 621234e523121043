use std::path::Path;
use std::process;

use super::report_compile_error;
use crate::OutputFormat;

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let chart = match chartc_core::elaborate_path(file) {
        Ok(c) => c,
        Err(e) => {
            report_compile_error(&e, output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    let transitions = chart.transitions().count();
    match output {
        OutputFormat::Text => {
            println!(
                "{}: ok ({} states, {} triggers, {} transitions)",
                chart.name,
                chart.states.len(),
                chart.triggers.len(),
                transitions
            );
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "valid": true,
                "name": chart.name,
                "states": chart.states.len(),
                "triggers": chart.triggers.len(),
                "transitions": transitions,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).unwrap_or_default()
            );
        }
    }
}
