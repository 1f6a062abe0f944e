//! Value resolution (environment first, then defaults)

pub mod env;
pub mod resolver;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use resolver::{Resolved, Resolver, ValueSource};
