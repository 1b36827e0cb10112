//! Normalized language identifiers.
//!
//! A [`LocaleIdentifier`] is always a well-formed BCP-47 style tag in
//! canonical form: lowercase language, Titlecase script, uppercase region,
//! `-` separators. Malformed input is an error, never a silent fallback.
//!
//! Examples:
//! - "en" -> "en"
//! - "FR_ca" -> "fr-CA"
//! - "zh_hant_tw" -> "zh-Hant-TW"
//! - "fr_CA.UTF-8" -> "fr-CA" (via [`parse_posix_locale`])

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use unic_langid::LanguageIdentifier;

use crate::error::{I18nError, I18nResult};

/// Primary language subtag of the undetermined tag.
const UNDETERMINED: &str = "und";

/// A normalized language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleIdentifier {
    langid: LanguageIdentifier,
}

impl LocaleIdentifier {
    /// Parse a language tag, accepting `-` or `_` separators in any case.
    pub fn parse(input: &str) -> I18nResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(I18nError::EmptyTag {
                tag: input.to_string(),
            });
        }

        let langid = trimmed
            .replace('_', "-")
            .parse::<LanguageIdentifier>()
            .map_err(|source| I18nError::InvalidTag {
                tag: input.to_string(),
                source,
            })?;

        Ok(Self { langid })
    }

    /// Primary language subtag, e.g. `fr` for `fr-CA`.
    pub fn language(&self) -> String {
        self.langid.language.to_string()
    }

    /// Whether the primary subtag is the undetermined language (`und`).
    pub fn is_undetermined(&self) -> bool {
        self.language() == UNDETERMINED
    }

    /// Whether both identifiers share the same primary language subtag.
    pub fn same_language(&self, other: &LocaleIdentifier) -> bool {
        !self.is_undetermined() && self.langid.language == other.langid.language
    }
}

impl fmt::Display for LocaleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.langid, f)
    }
}

impl FromStr for LocaleIdentifier {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LocaleIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a POSIX-style locale string such as `fr_CA.UTF-8` or `de_DE@euro`.
///
/// The codeset (after `.`) and modifier (after `@`) are dropped before the
/// remainder is parsed as a language tag.
pub fn parse_posix_locale(input: &str) -> I18nResult<LocaleIdentifier> {
    let trimmed = input.trim();
    let base = trimmed
        .split(['.', '@'])
        .next()
        .unwrap_or(trimmed);
    if base.is_empty() {
        return Err(I18nError::EmptyTag {
            tag: input.to_string(),
        });
    }
    LocaleIdentifier::parse(base).map_err(|err| match err {
        I18nError::InvalidTag { source, .. } => I18nError::InvalidTag {
            tag: base.to_string(),
            source,
        },
        other => other,
    })
}

/// Whether a locale environment value means "no preference" (`C`, `POSIX`).
pub fn is_neutral_locale(value: &str) -> bool {
    let base = value.trim().split(['.', '@']).next().unwrap_or("");
    base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX")
}
