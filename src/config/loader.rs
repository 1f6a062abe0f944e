//! Settings file loading

use super::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SECTION: &str = "props-writer";

/// Load settings from `config_path`, or from a settings file discovered in
/// `search_dir` when no path is given.
///
/// An explicitly given file must parse. A discovered file that fails to parse
/// is reported with a warning and the defaults are used instead.
pub fn load_settings(search_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_settings(search_dir),
    };

    let Some(settings_file) = discovered else {
        return Ok(Settings::default());
    };

    let parsed = read_settings(&settings_file);
    match parsed {
        Ok(settings) => {
            tracing::debug!(path = %settings_file.display(), ?settings, "loaded settings");
            Ok(settings)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered settings {}: {:#}",
                settings_file.display(),
                e
            );
            Ok(Settings::default())
        }
    }
}

fn read_settings(settings_file: &Path) -> Result<Settings> {
    let content = fs::read_to_string(settings_file)
        .with_context(|| format!("Failed reading settings file: {}", settings_file.display()))?;

    let ext = settings_file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "toml" => parse_toml_settings(&content, settings_file),
        "yaml" | "yml" => parse_yaml_settings(&content, settings_file),
        other => anyhow::bail!(
            "Unsupported settings extension '.{}' for file {}",
            other,
            settings_file.display()
        ),
    }
}

/// Parse TOML settings, supporting a nested [props-writer] section.
fn parse_toml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", settings_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    value
        .try_into()
        .with_context(|| format!("Invalid TOML settings: {}", settings_file.display()))
}

/// Parse YAML settings, supporting a nested props-writer section.
fn parse_yaml_settings(content: &str, settings_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", settings_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    // An empty document means "no settings".
    if value.is_null() {
        return Ok(Settings::default());
    }

    serde_yaml::from_value(value)
        .with_context(|| format!("Invalid YAML settings: {}", settings_file.display()))
}

fn discover_settings(search_dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["props-writer.toml", ".props-writer.toml", "props-writer.yaml", "props-writer.yml"];

    candidates.iter().map(|candidate| search_dir.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{KeyMode, LineEnding};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delimiter, '$');
        assert!(settings.trailing_blank_line);
    }

    #[test]
    fn test_discovered_toml() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("props-writer.toml"),
            "delimiter = '@'\nkey_mode = 'identifier'\ntrailing_blank_line = false\n",
        )
        .expect("write");

        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.delimiter, '@');
        assert_eq!(settings.key_mode, KeyMode::Identifier);
        assert!(!settings.trailing_blank_line);
        assert_eq!(settings.line_ending, LineEnding::Native);
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[props-writer]\nline_ending = 'crlf'\n").expect("write");

        let settings = load_settings(tmp.path(), Some(&path)).expect("settings");
        assert_eq!(settings.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_yaml_settings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("props-writer.yaml");
        fs::write(&path, "key_mode: rest-of-line\nline_ending: lf\n").expect("write");

        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.key_mode, KeyMode::RestOfLine);
        assert_eq!(settings.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_explicit_invalid_settings_return_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        // delimiter must be a single character
        fs::write(&path, "delimiter = '$$'\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_unknown_field_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "delimeter = '@'\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "delimiter=@\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("props-writer.toml"), "key_mode = 42\n").expect("write");

        let settings = load_settings(tmp.path(), None).expect("should not error on discovery");
        assert_eq!(settings, Settings::default());
    }
}
