//! Streaming template substitution.

use super::placeholder::{find_placeholder, KeyMode, DEFAULT_DELIMITER};
use crate::config::Settings;
use crate::error::PropsError;
use crate::resolve::{EnvSource, Resolver, ValueSource};
use clap::ValueEnum;
use serde::Deserialize;
use std::borrow::Cow;
use std::io::{BufRead, Write};

/// Line terminator written after each output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// The platform's own terminator
    #[default]
    Native,
    Lf,
    #[value(name = "crlf")]
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Counters for one substitution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionStats {
    /// Template lines read (and written).
    pub lines: usize,
    /// Lines that carried a placeholder.
    pub substituted: usize,
    /// Placeholders whose value came from the environment.
    pub from_environment: usize,
}

/// Rewrites template lines into output lines, one placeholder per line.
pub struct Substitutor {
    delimiter: char,
    key_mode: KeyMode,
    trailing_blank_line: bool,
    line_ending: LineEnding,
}

impl Default for Substitutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Substitutor {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            key_mode: KeyMode::RestOfLine,
            trailing_blank_line: true,
            line_ending: LineEnding::Native,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .delimiter(settings.delimiter)
            .key_mode(settings.key_mode)
            .trailing_blank_line(settings.trailing_blank_line)
            .line_ending(settings.line_ending)
    }

    /// Set the placeholder delimiter character
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set how keys are extracted
    pub fn key_mode(mut self, mode: KeyMode) -> Self {
        self.key_mode = mode;
        self
    }

    /// Set whether one extra line ending is written after the last line
    pub fn trailing_blank_line(mut self, enabled: bool) -> Self {
        self.trailing_blank_line = enabled;
        self
    }

    /// Set the output line ending
    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = ending;
        self
    }

    /// Stream `reader` through the resolver into `writer`.
    ///
    /// Input lines may end in `\n`, `\r\n` or a lone `\r`. Output order and
    /// count match the input. Stops at the first unresolved key or I/O
    /// error; whatever was already written is left to the caller.
    pub fn run<E, R, W>(
        &self,
        resolver: &Resolver<E>,
        mut reader: R,
        writer: &mut W,
    ) -> Result<SubstitutionStats, PropsError>
    where
        E: EnvSource,
        R: BufRead,
        W: Write,
    {
        let eol = self.line_ending.as_str().as_bytes();
        let mut stats = SubstitutionStats::default();
        let mut buf = String::new();

        loop {
            buf.clear();
            let read = reader
                .read_line(&mut buf)
                .map_err(|source| PropsError::TemplateRead { line: stats.lines + 1, source })?;
            if read == 0 {
                break;
            }

            for line in split_lines(&buf) {
                stats.lines += 1;
                let line_no = stats.lines;
                let rendered = self.render_line(resolver, line, line_no, &mut stats)?;
                writer
                    .write_all(rendered.as_bytes())
                    .and_then(|()| writer.write_all(eol))
                    .map_err(|source| PropsError::OutputWrite { line: line_no, source })?;
            }
        }

        if self.trailing_blank_line {
            writer
                .write_all(eol)
                .map_err(|source| PropsError::OutputWrite { line: stats.lines + 1, source })?;
        }
        writer
            .flush()
            .map_err(|source| PropsError::OutputWrite { line: stats.lines, source })?;

        Ok(stats)
    }

    /// Render a single template line.
    pub fn render_line<'a, E: EnvSource>(
        &self,
        resolver: &Resolver<E>,
        line: &'a str,
        line_no: usize,
        stats: &mut SubstitutionStats,
    ) -> Result<Cow<'a, str>, PropsError> {
        let Some(placeholder) = find_placeholder(line, self.delimiter, self.key_mode) else {
            return Ok(Cow::Borrowed(line));
        };

        let resolved = resolver
            .lookup(placeholder.key)
            .ok_or_else(|| PropsError::Unresolved { key: placeholder.key.to_string(), line: line_no })?;

        stats.substituted += 1;
        if resolved.source == ValueSource::Environment {
            stats.from_environment += 1;
        }
        tracing::debug!(line = line_no, key = placeholder.key, source = ?resolved.source, "resolved placeholder");

        Ok(Cow::Owned(placeholder.apply(line, &resolved.value)))
    }
}

/// Split one `read_line` chunk into template lines.
///
/// The chunk's own terminator is dropped; a lone `\r` inside it also ends a
/// line.
fn split_lines(chunk: &str) -> std::str::Split<'_, char> {
    let body = chunk
        .strip_suffix("\r\n")
        .or_else(|| chunk.strip_suffix('\n'))
        .or_else(|| chunk.strip_suffix('\r'))
        .unwrap_or(chunk);
    body.split('\r')
}
