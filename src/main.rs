//! props-writer: materialize properties files from a template, a defaults
//! file and the environment.

use std::process::ExitCode;

fn main() -> ExitCode {
    props_writer::cli::run()
}
