//! # lingo-core
//!
//! Locale catalogs, language negotiation and message translation.
//!
//! Provides:
//! - Normalized BCP-47 language identifiers
//! - Matching of a requested tag against the available languages, with a
//!   confidence level (exact, base-language fallback, none)
//! - Locale detection from the environment
//! - JSON message catalogs loaded from embedded, on-disk or in-memory resources
//! - A [`Translator`] that resolves message keys with named-argument
//!   substitution, echoing the key back when no translation exists

pub mod catalog;
pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod resources;
pub mod service;
pub mod tag;
pub mod template;

pub use catalog::{Catalog, MessageTable};
pub use config::{LingoConfig, ServerConfig};
pub use detect::{detect_language, detect_language_with};
pub use diagnostics::{DiagnosticSink, RecordingSink, TracingSink, TranslationDiagnostic};
pub use error::{I18nError, I18nResult, LoadError};
pub use matcher::{
    Confidence, EXPLICIT_THRESHOLD, MatchResult, match_identifier, match_language,
    negotiate_accept_language,
};
#[cfg(feature = "embedded")]
pub use resources::EmbeddedResources;
pub use resources::{DirectoryResources, MemoryResources, ResourceProvider};
pub use service::{DEFAULT_LANGUAGE, Localizer, Translator, TranslatorBuilder};
pub use tag::{LocaleIdentifier, parse_posix_locale};
pub use template::{BraceFormatter, MessageFormatter, Rendered};
