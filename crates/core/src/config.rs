use crate::error::{Result, TelQrErrorExt};
use config::{Config, Environment, File};
use std::path::Path;
use telqr_domain::{TelQrConfig, TelQrConfigOverrides};
use tracing::info;

/// Environment prefix for overrides (`TELQR__BUTTON_TEXT`, `TELQR__QR_CODE__WIDTH`).
pub const ENV_PREFIX: &str = "TELQR";

/// Loads configuration overrides from an optional file plus the environment.
///
/// Layers, lowest precedence first:
/// 1. **File**: `path`, when given (format inferred from the extension:
///    TOML, JSON, YAML, ...). The file must exist.
/// 2. **Environment**: variables prefixed with `TELQR__`, nested keys joined
///    by `__` (`TELQR__STYLING__BACKDROP__BACKGROUND`).
///
/// Keys may be written in camelCase (as in the browser) or snake_case.
///
/// # Errors
/// Returns [`crate::TelQrError::Config`] if the file is missing or unreadable.
/// Values of the wrong shape are ignored rather than reported.
///
/// # Example
/// ```rust,no_run
/// use telqr::config::load_overrides;
/// use telqr::domain::TelQrConfig;
///
/// let overrides = load_overrides(Some("telqr.toml")).unwrap_or_default();
/// let config = TelQrConfig::from_overrides(overrides);
/// ```
pub fn load_overrides(path: Option<impl AsRef<Path>>) -> Result<TelQrConfigOverrides> {
    let path: Option<&Path> = path.as_ref().map(AsRef::as_ref);
    build_overrides(path, Environment::with_prefix(ENV_PREFIX))
}

fn build_overrides(path: Option<&Path>, env: Environment) -> Result<TelQrConfigOverrides> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        info!("Loading TelQr config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(env.separator("__").try_parsing(true));

    let overrides = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<TelQrConfigOverrides>()
        .context("Failed to deserialize config")?;

    Ok(overrides)
}

/// [`load_overrides`] merged onto the defaults.
///
/// # Errors
/// See [`load_overrides`].
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<TelQrConfig> {
    load_overrides(path).map(TelQrConfig::from_overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use telqr_domain::CorrectLevel;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn environment_overrides_file_values() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let path = dir.path().join("telqr.toml");
        fs::write(&path, "button_text = \"From file\"\nscan_to_call_text = \"Scan\"\n")
            .map_err(|e| e.to_string())?;

        let overrides = build_overrides(
            Some(&path),
            env(&[("TELQR__BUTTON_TEXT", "From env"), ("TELQR__QR_CODE__CORRECT_LEVEL", "h")]),
        )?;
        let config = TelQrConfig::from_overrides(overrides);

        assert_eq!(config.button_text, "From env");
        assert_eq!(config.scan_to_call_text, "Scan");
        assert_eq!(config.qr_code.correct_level, CorrectLevel::H);
        Ok(())
    }

    #[test]
    fn numeric_environment_values_are_parsed() -> Result<()> {
        let overrides = build_overrides(None, env(&[("TELQR__QR_CODE__WIDTH", "320")]))?;
        let config = TelQrConfig::from_overrides(overrides);

        assert_eq!(config.qr_code.width, 320);
        assert_eq!(config.qr_code.height, 180);
        Ok(())
    }

    #[test]
    fn unrelated_variables_are_ignored() -> Result<()> {
        let overrides = build_overrides(None, env(&[("HOME", "/root"), ("RUST_LOG", "debug")]))?;
        assert_eq!(TelQrConfig::from_overrides(overrides), TelQrConfig::default());
        Ok(())
    }
}
