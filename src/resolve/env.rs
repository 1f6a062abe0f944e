//! Environment access for value resolution.
//!
//! Resolution reads the environment through [`EnvSource`] so that embedders
//! and tests can supply a snapshot instead of the live process environment.

use std::collections::HashMap;

/// A source of environment variables.
pub trait EnvSource {
    /// Value of `key` if the variable is set. An empty value still counts as set.
    fn var(&self, key: &str) -> Option<String>;
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Whether `key` can name an environment variable at all.
pub fn is_env_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        if !is_env_name(key) {
            return None;
        }
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// An in-memory environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        if !is_env_name(key) {
            return None;
        }
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |env, (k, v)| env.with(k, v))
    }
}
