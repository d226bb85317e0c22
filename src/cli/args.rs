use crate::config::DatabaseEngine;
use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for paramgen.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Parameters template, e.g. `app/config/parameters.yml.dist`.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Generated parameters file. Defaults to TEMPLATE without `.dist`.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of an existing output file.
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Predefined answers as JSON string or `-` to read from stdin.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Database driver (`pdo_sqlite`, `pdo_mysql`, `pdo_pgsql`). Asked for when omitted.
    #[arg(short, long, value_name = "DRIVER")]
    pub engine: Option<DatabaseEngine>,

    /// Answer every remaining prompt with its default.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Print the generated document without writing it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
