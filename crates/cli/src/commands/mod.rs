pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod elaborate;
pub(crate) mod lex;
pub(crate) mod validate;

use crate::OutputFormat;
use chartc_core::CompileError;

/// Print a pipeline error: the `{"stage", "message"}` object in JSON mode,
/// the message alone in text mode.
pub(crate) fn report_compile_error(e: &CompileError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}
