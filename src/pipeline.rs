//! End-to-end run: verify inputs, load defaults, substitute the template.

use crate::config::Settings;
use crate::error::PropsError;
use crate::props::DefaultsMapping;
use crate::resolve::{EnvSource, ProcessEnv, Resolver};
use crate::template::{SubstitutionStats, Substitutor};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Fail with [`PropsError::NotFound`] unless `path` exists.
pub fn check_exists(path: &Path) -> Result<(), PropsError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PropsError::NotFound { path: path.to_path_buf() })
    }
}

/// Fail with [`PropsError::NotReadable`] unless `path` is a regular file that
/// can be opened for reading.
pub fn check_readable(path: &Path) -> Result<(), PropsError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "not a regular file");
        return Err(PropsError::NotReadable { path: path.to_path_buf() });
    }
    match File::open(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "open for read failed");
            Err(PropsError::NotReadable { path: path.to_path_buf() })
        }
    }
}

/// Check both inputs, defaults first.
pub fn verify_inputs(defaults: &Path, template: &Path) -> Result<(), PropsError> {
    check_exists(defaults)?;
    check_readable(defaults)?;
    check_exists(template)?;
    check_readable(template)?;
    Ok(())
}

/// Materialize `output` from `template` using default settings and the
/// process environment.
pub fn build_properties(
    defaults: impl AsRef<Path>,
    template: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<SubstitutionStats, PropsError> {
    build_properties_with(
        defaults.as_ref(),
        template.as_ref(),
        output.as_ref(),
        &Settings::default(),
        ProcessEnv,
    )
}

/// Materialize `output` from `template` with explicit settings and
/// environment.
///
/// On a failure during substitution the output written so far is flushed and
/// left in place.
pub fn build_properties_with<E: EnvSource>(
    defaults: &Path,
    template: &Path,
    output: &Path,
    settings: &Settings,
    env: E,
) -> Result<SubstitutionStats, PropsError> {
    verify_inputs(defaults, template)?;

    let mapping = DefaultsMapping::load(defaults)?;
    let resolver = Resolver::with_env(mapping, env);

    let reader = File::open(template)
        .map(BufReader::new)
        .map_err(|source| PropsError::TemplateOpen { path: template.to_path_buf(), source })?;
    let file = File::create(output)
        .map_err(|source| PropsError::OutputOpen { path: output.to_path_buf(), source })?;
    let mut writer = BufWriter::new(file);

    let substitutor = Substitutor::from_settings(settings);
    match substitutor.run(&resolver, reader, &mut writer) {
        Ok(stats) => {
            tracing::info!(
                output = %output.display(),
                lines = stats.lines,
                substituted = stats.substituted,
                from_environment = stats.from_environment,
                "wrote properties"
            );
            Ok(stats)
        }
        Err(e) => {
            let _ = writer.flush();
            Err(e)
        }
    }
}
