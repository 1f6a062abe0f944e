//! props-writer: materialize properties files from templates
//!
//! Reads a defaults properties file, then rewrites a template line by line,
//! replacing each `$key` placeholder with the value of the `key` environment
//! variable when it is set, or with the default otherwise.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod props;
pub mod resolve;
pub mod template;
pub mod utils;

pub use error::PropsError;
pub use pipeline::{build_properties, build_properties_with};
