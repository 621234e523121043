use std::path::Path;
use std::process;

use super::report_compile_error;
use crate::OutputFormat;

pub(crate) fn cmd_elaborate(file: &Path, output: OutputFormat, quiet: bool) {
    match chartc_core::elaborate_path(file) {
        Ok(chart) => {
            let bundle = chartc_core::serialize(&chart);
            let pretty = serde_json::to_string_pretty(&bundle)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => {
            report_compile_error(&e, output, quiet);
            process::exit(1);
        }
    }
}
