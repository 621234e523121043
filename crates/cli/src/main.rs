mod commands;
mod config;
mod runner;
mod tap;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Statechart description compiler.
#[derive(Parser)]
#[command(name = "chartc", version, about = "Statechart description compiler")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log pipeline progress to stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a chart description file and print its tokens
    Lex {
        /// Path to the description file
        file: PathBuf,
    },

    /// Elaborate a YAML statechart to interchange JSON
    Elaborate {
        /// Path to the YAML statechart
        file: PathBuf,
    },

    /// Resolve and validate a YAML statechart without printing it
    Check {
        /// Path to the YAML statechart
        file: PathBuf,
    },

    /// Compile every statechart listed in a project file
    Build {
        /// Path to the project file
        #[arg(long, default_value = "chartc.toml")]
        config: PathBuf,
    },

    /// Validate interchange JSON against the statechart JSON Schema
    Validate {
        /// Path to the interchange JSON bundle file
        bundle: PathBuf,
    },

    /// Run the conformance test suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lex { file } => {
            commands::lex::cmd_lex(&file, cli.output, cli.quiet);
        }
        Commands::Elaborate { file } => {
            commands::elaborate::cmd_elaborate(&file, cli.output, cli.quiet);
        }
        Commands::Check { file } => {
            commands::check::cmd_check(&file, cli.output, cli.quiet);
        }
        Commands::Build { config } => {
            commands::build::cmd_build(&config, cli.output, cli.quiet);
        }
        Commands::Validate { bundle } => {
            commands::validate::cmd_validate(&bundle, cli.output, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            commands::test::cmd_test(&suite_dir, cli.quiet);
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
