//! Locale and catalog setup for the lingo CLI.
//!
//! Language resolution order:
//! 1. `--locale` CLI flag (highest priority)
//! 2. `locale` from `.lingo.toml`
//! 3. Auto-detection: `LINGO_LOCALE`, `LC_ALL`, `LANG`, then the system
//!    locale via `sys-locale` (skipped when `detect = false`)
//! 4. Fallback to "en" (English)
//!
//! An explicitly requested language (steps 1 and 2) that is malformed or
//! unsupported is an error rather than a silent fallback.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lingo_core::{DirectoryResources, LingoConfig, Translator};

/// Load the configuration from `--config`, or `.lingo.toml` in the working directory.
pub fn load_config(path: Option<&Path>) -> Result<LingoConfig> {
    let config = match path {
        Some(path) => LingoConfig::load(path)?,
        None => LingoConfig::discover(Path::new("."))?,
    };
    Ok(config)
}

/// Where locale files come from: `--locales-dir`, config `locales_dir`, or the bundled set.
pub fn locales_dir(cli_dir: Option<&Path>, config: &LingoConfig) -> Option<PathBuf> {
    cli_dir
        .map(Path::to_path_buf)
        .or_else(|| config.locales_dir.clone())
}

/// Build the translator for this invocation.
pub fn init(cli_locale: Option<&str>, cli_dir: Option<&Path>, config: &LingoConfig) -> Result<Translator> {
    let explicit = cli_locale.or(config.locale.as_deref());

    let mut builder = Translator::builder().detect_from_env(explicit.is_none() && config.detect);
    if let Some(dir) = locales_dir(cli_dir, config) {
        tracing::debug!(dir = %dir.display(), "loading locales from directory");
        builder = builder.resources(DirectoryResources::new(dir));
    }

    let mut translator = builder.build().context("failed to initialize translations")?;

    if let Some(locale) = explicit {
        translator
            .set_language(locale)
            .with_context(|| format!("cannot use locale '{locale}'"))?;
    }

    tracing::debug!(locale = %translator.language(), "active locale");
    Ok(translator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::I18nError;
    use tempfile::TempDir;

    fn no_detect() -> LingoConfig {
        LingoConfig {
            detect: false,
            ..LingoConfig::default()
        }
    }

    #[test]
    fn test_cli_locale_wins_over_config() {
        let config = LingoConfig {
            locale: Some("es".into()),
            ..no_detect()
        };
        let translator = init(Some("fr"), None, &config).unwrap();
        assert_eq!(translator.language().to_string(), "fr");
    }

    #[test]
    fn test_config_locale_used() {
        let config = LingoConfig {
            locale: Some("es-MX".into()),
            ..no_detect()
        };
        let translator = init(None, None, &config).unwrap();
        assert_eq!(translator.language().to_string(), "es");
    }

    #[test]
    fn test_fallback_to_english() {
        let translator = init(None, None, &no_detect()).unwrap();
        assert_eq!(translator.language().to_string(), "en");
    }

    #[test]
    fn test_unsupported_explicit_locale_is_error() {
        let err = init(Some("de"), None, &no_detect()).unwrap_err();
        assert!(err.to_string().contains("cannot use locale 'de'"));
        assert!(matches!(
            err.downcast_ref::<I18nError>(),
            Some(I18nError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_locales_dir_from_cli() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("en.json"), r#"{"hello": "Howdy"}"#).unwrap();
        std::fs::write(temp.path().join("it.json"), r#"{"hello": "Ciao"}"#).unwrap();

        let translator = init(Some("it"), Some(temp.path()), &no_detect()).unwrap();
        assert_eq!(translator.translate("hello"), "Ciao");
    }

    #[test]
    fn test_locales_dir_precedence() {
        let config = LingoConfig {
            locales_dir: Some(PathBuf::from("/from/config")),
            ..LingoConfig::default()
        };
        assert_eq!(
            locales_dir(Some(Path::new("/from/cli")), &config),
            Some(PathBuf::from("/from/cli"))
        );
        assert_eq!(locales_dir(None, &config), Some(PathBuf::from("/from/config")));
        assert_eq!(locales_dir(None, &LingoConfig::default()), None);
    }
}
