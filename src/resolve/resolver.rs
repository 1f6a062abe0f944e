//! Environment-then-defaults value resolution

use super::env::{EnvSource, ProcessEnv};
use crate::props::DefaultsMapping;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Environment,
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: ValueSource,
}

/// Resolves template keys for a single run.
///
/// Owns the defaults for the run; the environment is consulted on every
/// lookup and nothing is cached.
pub struct Resolver<E = ProcessEnv> {
    defaults: DefaultsMapping,
    env: E,
}

impl Resolver<ProcessEnv> {
    pub fn new(defaults: DefaultsMapping) -> Self {
        Self::with_env(defaults, ProcessEnv)
    }
}

impl<E: EnvSource> Resolver<E> {
    pub fn with_env(defaults: DefaultsMapping, env: E) -> Self {
        Self { defaults, env }
    }

    /// Resolve `key`, reporting the source of the value.
    ///
    /// A set environment variable wins even when empty; otherwise the
    /// defaults are used. `None` when neither has the key.
    pub fn lookup(&self, key: &str) -> Option<Resolved> {
        if let Some(value) = self.env.var(key) {
            return Some(Resolved { value, source: ValueSource::Environment });
        }
        self.defaults
            .get(key)
            .map(|value| Resolved { value: value.to_string(), source: ValueSource::Defaults })
    }

    pub fn resolve(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|resolved| resolved.value)
    }

    pub fn defaults(&self) -> &DefaultsMapping {
        &self.defaults
    }
}
