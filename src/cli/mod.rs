//! Command-line interface for props-writer
//!
//! Parses the three positional paths plus optional settings flags, runs the
//! pipeline, and turns any failure into one stderr line and a stable exit code.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_settings, merge_cli_with_config, CliOverrides};
use crate::error::PropsError;
use crate::pipeline::build_properties_with;
use crate::resolve::ProcessEnv;
use crate::template::{KeyMode, LineEnding};

/// Materialize a properties file from a template, a defaults file and the environment
#[derive(Parser)]
#[command(name = "props-writer")]
#[command(
    author,
    version,
    about = "Materialize a properties file from a template, a defaults file and the environment",
    long_about = None
)]
pub struct Cli {
    /// Properties file holding default values
    #[arg(value_name = "DEFAULTS")]
    pub defaults: PathBuf,

    /// Template whose `$key` lines are resolved
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Properties file to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Settings file (TOML or YAML); defaults to props-writer.toml next to the template
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Placeholder delimiter character
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// How the key is extracted after the delimiter
    #[arg(long, value_enum, value_name = "MODE")]
    pub key_mode: Option<KeyMode>,

    /// Write an extra blank line after the last line (the default)
    #[arg(long, overrides_with = "no_trailing_blank_line")]
    pub trailing_blank_line: bool,

    /// Do not write the extra blank line after the last line
    #[arg(long, overrides_with = "trailing_blank_line")]
    pub no_trailing_blank_line: bool,

    /// Line ending for the output
    #[arg(long, value_enum, value_name = "EOL")]
    pub line_ending: Option<LineEnding>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            delimiter: self.delimiter,
            key_mode: self.key_mode,
            trailing_blank_line: self.trailing_blank_line_override(),
            line_ending: self.line_ending,
        }
    }

    /// The last of `--trailing-blank-line` / `--no-trailing-blank-line` wins.
    fn trailing_blank_line_override(&self) -> Option<bool> {
        match (self.trailing_blank_line, self.no_trailing_blank_line) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err),
    };

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn execute(cli: &Cli) -> Result<(), PropsError> {
    let settings = load_settings(settings_dir(&cli.template), cli.config.as_deref())
        .map_err(|e| PropsError::Settings(format!("{e:#}")))?;
    let settings = merge_cli_with_config(settings, &cli.overrides());

    build_properties_with(&cli.defaults, &cli.template, &cli.output, &settings, ProcessEnv)?;
    Ok(())
}

/// Directory searched for a settings file: the template's own directory.
fn settings_dir(template: &Path) -> &Path {
    match template.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn handle_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        kind => {
            let reason = kind.as_str().unwrap_or("invalid arguments");
            report(&PropsError::Usage(reason.to_string()))
        }
    }
}

fn report(err: &PropsError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::from(err.exit_code())
}
