//! Defaults loading
//!
//! Reads a properties source into a [`DefaultsMapping`], the fallback value
//! provider for template resolution.

pub mod parser;

pub use parser::{parse_properties, PropertiesParseError};

use crate::error::PropsError;
use crate::utils::decode_properties;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Key/value defaults loaded from a properties source.
///
/// Built once per run and immutable afterwards. When a key appears more than
/// once the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsMapping {
    entries: HashMap<String, String>,
}

impl DefaultsMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text.
    pub fn parse(text: &str) -> Result<Self, PropertiesParseError> {
        Ok(parse_properties(text)?.into_iter().collect())
    }

    /// Load and parse a properties file.
    ///
    /// Open failures map to [`PropsError::DefaultsOpen`], I/O failures while
    /// reading to [`PropsError::DefaultsRead`] and malformed content to
    /// [`PropsError::DefaultsParse`]. Nothing is returned unless the whole
    /// file parsed.
    pub fn load(path: &Path) -> Result<Self, PropsError> {
        let mut file = File::open(path)
            .map_err(|source| PropsError::DefaultsOpen { path: path.to_path_buf(), source })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| PropsError::DefaultsRead { path: path.to_path_buf(), source })?;

        let (text, encoding) = decode_properties(&bytes);
        let mapping = Self::parse(&text).map_err(|e| PropsError::DefaultsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            encoding,
            entries = mapping.len(),
            "loaded defaults"
        );
        Ok(mapping)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DefaultsMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (key, value) in iter {
            entries.insert(key.into(), value.into());
        }
        Self { entries }
    }
}
