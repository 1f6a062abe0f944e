//! Settings loading and merging
//!
//! Handles loading from a settings file and CLI flags with proper
//! precedence (CLI > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::load_settings;
pub use merge::{merge_cli_with_config, CliOverrides};

use crate::template::{KeyMode, LineEnding, DEFAULT_DELIMITER};
use serde::Deserialize;

/// How a template is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Character that marks a placeholder.
    pub delimiter: char,
    pub key_mode: KeyMode,
    /// Write one extra line ending after the last line.
    pub trailing_blank_line: bool,
    pub line_ending: LineEnding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            key_mode: KeyMode::RestOfLine,
            trailing_blank_line: true,
            line_ending: LineEnding::Native,
        }
    }
}
