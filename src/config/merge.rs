//! CLI flag overrides on top of file settings

use super::Settings;
use crate::template::{KeyMode, LineEnding};

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub delimiter: Option<char>,
    pub key_mode: Option<KeyMode>,
    pub trailing_blank_line: Option<bool>,
    pub line_ending: Option<LineEnding>,
}

pub fn merge_cli_with_config(settings: Settings, cli: &CliOverrides) -> Settings {
    Settings {
        delimiter: cli.delimiter.unwrap_or(settings.delimiter),
        key_mode: cli.key_mode.unwrap_or(settings.key_mode),
        trailing_blank_line: cli.trailing_blank_line.unwrap_or(settings.trailing_blank_line),
        line_ending: cli.line_ending.unwrap_or(settings.line_ending),
    }
}
