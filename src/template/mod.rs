//! Template placeholder detection and line substitution

pub mod placeholder;
pub mod substitutor;

pub use placeholder::{find_placeholder, KeyMode, Placeholder, DEFAULT_DELIMITER};
pub use substitutor::{LineEnding, SubstitutionStats, Substitutor};
