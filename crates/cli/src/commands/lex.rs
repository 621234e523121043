use std::path::Path;
use std::process;

use chartc_core::Token;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_lex(file: &Path, output: OutputFormat, quiet: bool) {
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let scanned = chartc_core::scan(&src);

    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&scanned.to_json_value()).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if !quiet {
                for token in &scanned.tokens {
                    println!("{}", format_token(token));
                }
            }
            for err in &scanned.errors {
                eprintln!("{}: {}", file.display(), err);
            }
        }
    }

    if !scanned.is_clean() {
        process::exit(1);
    }
}

/// `line:column Kind "lexeme"`, lexeme omitted when empty.
fn format_token(token: &Token) -> String {
    let pos = format!("{}:{}", token.line, token.column);
    if token.lexeme.is_empty() {
        format!("{:<8} {}", pos, token.kind.name())
    } else {
        format!("{:<8} {:<13} {:?}", pos, token.kind.name(), token.lexeme)
    }
}
