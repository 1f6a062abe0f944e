//! Placeholder detection and key extraction

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

pub const DEFAULT_DELIMITER: char = '$';

static IDENTIFIER_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+").expect("valid regex"));

/// How the key is cut out of a templated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyMode {
    /// Everything after the first delimiter up to end of line is the key.
    /// Trailing spaces and punctuation are part of it.
    #[default]
    RestOfLine,
    /// The key is the run of `[A-Za-z0-9_.-]` right after the delimiter and
    /// only the `$key` token is replaced.
    Identifier,
}

/// A detected placeholder within one template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub key: &'a str,
    /// Byte offset of the delimiter in the line.
    pub offset: usize,
    delimiter: char,
    mode: KeyMode,
}

/// Find the placeholder driven by the first `delimiter` in `line`.
///
/// In identifier mode a delimiter that is not followed by an identifier
/// character is not a placeholder.
pub fn find_placeholder(line: &str, delimiter: char, mode: KeyMode) -> Option<Placeholder<'_>> {
    let offset = line.find(delimiter)?;
    let after = &line[offset + delimiter.len_utf8()..];

    let key = match mode {
        KeyMode::RestOfLine => after,
        KeyMode::Identifier => IDENTIFIER_KEY.find(after)?.as_str(),
    };

    Some(Placeholder { key, offset, delimiter, mode })
}

impl Placeholder<'_> {
    /// Build the output line with `value` in place of the placeholder.
    ///
    /// Rest-of-line mode removes every delimiter from the line and then
    /// replaces every occurrence of the key text, so text before the
    /// delimiter that equals the key is replaced too.
    pub fn apply(&self, line: &str, value: &str) -> String {
        match self.mode {
            KeyMode::RestOfLine => line.replace(self.delimiter, "").replace(self.key, value),
            KeyMode::Identifier => {
                let end = self.offset + self.delimiter.len_utf8() + self.key.len();
                let mut out = String::with_capacity(line.len() + value.len());
                out.push_str(&line[..self.offset]);
                out.push_str(value);
                out.push_str(&line[end..]);
                out
            }
        }
    }
}
