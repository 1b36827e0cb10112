//! Error types for catalog loading, language matching and the translator.

use thiserror::Error;
use unic_langid::LanguageIdentifierError;

/// Result alias used across the crate.
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors surfaced by the public API.
#[derive(Error, Debug)]
pub enum I18nError {
    /// The input is not a well-formed language tag.
    #[error("failed to parse language tag '{tag}': {source}")]
    InvalidTag {
        tag: String,
        #[source]
        source: LanguageIdentifierError,
    },

    /// The input is empty after trimming whitespace and encoding suffixes.
    #[error("failed to parse language tag '{tag}': tag is empty")]
    EmptyTag { tag: String },

    /// The tag is well-formed but nothing in the catalog matches it.
    #[error("unsupported language: {tag}")]
    UnsupportedLanguage { tag: String },

    /// The catalog could not be built. Fatal at construction time.
    #[error("failed to load locale catalog")]
    CatalogLoad(#[from] LoadError),

    /// The default language is not available in the catalog.
    #[error("default language '{tag}' is not available in the catalog")]
    DefaultLanguageMissing { tag: String },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration in {path}: {message}")]
    Config { path: String, message: String },
}

impl I18nError {
    /// Whether this error comes from a malformed tag rather than a missing language.
    pub fn is_invalid_tag(&self) -> bool {
        matches!(self, Self::InvalidTag { .. } | Self::EmptyTag { .. })
    }
}

/// Failures while listing, reading or parsing locale resources.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to list locale resources")]
    List {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read locale resource: {resource}")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locale resource {resource}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid message '{key}' in {resource}: {message}")]
    InvalidMessage {
        resource: String,
        key: String,
        message: String,
    },

    #[error("locale resource {resource} is not named after a language tag")]
    InvalidIdentifier {
        resource: String,
        #[source]
        source: Box<I18nError>,
    },

    #[error("duplicate locale '{identifier}': {first} and {second}")]
    DuplicateLocale {
        identifier: String,
        first: String,
        second: String,
    },
}
