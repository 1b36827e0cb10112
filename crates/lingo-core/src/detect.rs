//! Locale detection from the environment.
//!
//! Resolution order:
//! 1. `LINGO_LOCALE` environment variable
//! 2. `LC_ALL` environment variable
//! 3. `LANG` environment variable
//! 4. System locale via `sys-locale` (only when no variable is usable)
//!
//! Unset, empty, `C` and `POSIX` values are skipped. The first usable value
//! decides: a malformed value is an error, an unsupported one detects
//! nothing. Auto-detection only accepts matches of [`Confidence::Low`] or
//! better.

use crate::error::I18nResult;
use crate::matcher::{Confidence, match_identifier};
use crate::tag::{LocaleIdentifier, is_neutral_locale, parse_posix_locale};

/// Environment variables consulted, highest priority first.
pub const LOCALE_ENV_VARS: &[&str] = &["LINGO_LOCALE", "LC_ALL", "LANG"];

/// Minimum confidence accepted by auto-detection.
pub const DETECT_THRESHOLD: Confidence = Confidence::Low;

/// Detect the preferred supported language from the process environment.
pub fn detect_language(supported: &[LocaleIdentifier]) -> I18nResult<Option<LocaleIdentifier>> {
    detect_language_with(|name| std::env::var(name).ok(), true, supported)
}

/// Detect the preferred supported language using `lookup` for variables.
///
/// `use_system` enables the `sys-locale` fallback.
pub fn detect_language_with<F>(
    lookup: F,
    use_system: bool,
    supported: &[LocaleIdentifier],
) -> I18nResult<Option<LocaleIdentifier>>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.trim().is_empty() && !is_neutral_locale(value))
        .or_else(|| {
            use_system
                .then(sys_locale::get_locale)
                .flatten()
                .filter(|value| !value.trim().is_empty() && !is_neutral_locale(value))
        });

    let Some(raw) = raw else {
        return Ok(None);
    };

    let requested = parse_posix_locale(&raw)?;

    if supported.is_empty() {
        return Ok(None);
    }

    let result = match_identifier(&requested, supported);
    let detected = result.accepted(DETECT_THRESHOLD).cloned();
    tracing::debug!(
        requested = %requested,
        confidence = ?result.confidence,
        detected = ?detected.as_ref().map(ToString::to_string),
        "detected locale from environment"
    );
    Ok(detected)
}
