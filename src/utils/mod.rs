//! Shared helpers

pub mod encoding;

pub use encoding::decode_properties;
