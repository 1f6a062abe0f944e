//! Error types for a props-writer run.
//!
//! Every failure the library can hit is a `PropsError` variant. Library code
//! never terminates the process; the binary maps each variant to a stable
//! exit code via [`PropsError::exit_code`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes, one per error kind.
pub mod exit_codes {
    pub const USAGE_ERROR: u8 = 101;
    pub const DOESNT_EXIST_ERROR: u8 = 102;
    pub const NOT_READABLE_ERROR: u8 = 103;
    /// The defaults source exists but cannot be opened or parsed.
    pub const DEFAULTS_LOAD_ERROR: u8 = 104;
    pub const DEFAULTS_READ_ERROR: u8 = 105;
    pub const FILE_OPEN_ERROR: u8 = 106;
    pub const STREAM_IO_ERROR: u8 = 107;
    pub const UNRESOLVED_KEY_ERROR: u8 = 108;
    pub const SETTINGS_ERROR: u8 = 109;
}

#[derive(Error, Debug)]
pub enum PropsError {
    #[error("usage: props-writer [OPTIONS] <DEFAULTS> <TEMPLATE> <OUTPUT> ({0})")]
    Usage(String),

    #[error("File must exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("File must be readable: {}", path.display())]
    NotReadable { path: PathBuf },

    #[error("Props file must exist and be openable: {}: {source}", path.display())]
    DefaultsOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Props file cannot be parsed {}: {message}", path.display())]
    DefaultsParse { path: PathBuf, message: String },

    #[error("Failed to read props file {}: {source}", path.display())]
    DefaultsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open template {}: {source}", path.display())]
    TemplateOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read template at line {line}: {source}")]
    TemplateRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output at line {line}: {source}")]
    OutputWrite {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A template key has no value in the environment or the defaults.
    #[error("No value for key '{key}' (template line {line}): not set in the environment or the defaults")]
    Unresolved { key: String, line: usize },

    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl PropsError {
    pub fn exit_code(&self) -> u8 {
        use exit_codes::*;
        match self {
            PropsError::Usage(_) => USAGE_ERROR,
            PropsError::NotFound { .. } => DOESNT_EXIST_ERROR,
            PropsError::NotReadable { .. } => NOT_READABLE_ERROR,
            PropsError::DefaultsOpen { .. } | PropsError::DefaultsParse { .. } => DEFAULTS_LOAD_ERROR,
            PropsError::DefaultsRead { .. } => DEFAULTS_READ_ERROR,
            PropsError::TemplateOpen { .. } | PropsError::OutputOpen { .. } => FILE_OPEN_ERROR,
            PropsError::TemplateRead { .. } | PropsError::OutputWrite { .. } => STREAM_IO_ERROR,
            PropsError::Unresolved { .. } => UNRESOLVED_KEY_ERROR,
            PropsError::Settings(_) => SETTINGS_ERROR,
        }
    }

    /// True for failures caused by file I/O rather than by content.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PropsError::DefaultsOpen { .. }
                | PropsError::DefaultsRead { .. }
                | PropsError::TemplateOpen { .. }
                | PropsError::OutputOpen { .. }
                | PropsError::TemplateRead { .. }
                | PropsError::OutputWrite { .. }
        )
    }
}
