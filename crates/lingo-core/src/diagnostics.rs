//! Non-fatal translation diagnostics and the sinks that receive them.

use std::fmt;
use std::sync::Mutex;

use crate::tag::LocaleIdentifier;

/// Something noteworthy that happened while translating.
///
/// Translation never fails; these are reported on the side instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationDiagnostic {
    /// No message exists for `key` in the active language.
    MissingMessage { locale: LocaleIdentifier, key: String },
    /// The template references `name` but no such argument was given.
    MissingArgument {
        locale: LocaleIdentifier,
        key: String,
        name: String,
    },
    /// An argument was given that the template never references.
    UnusedArgument {
        locale: LocaleIdentifier,
        key: String,
        name: String,
    },
}

impl TranslationDiagnostic {
    pub fn key(&self) -> &str {
        match self {
            Self::MissingMessage { key, .. }
            | Self::MissingArgument { key, .. }
            | Self::UnusedArgument { key, .. } => key,
        }
    }
}

impl fmt::Display for TranslationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMessage { locale, key } => {
                write!(f, "translation for key \"{key}\" not found ({locale})")
            }
            Self::MissingArgument { locale, key, name } => {
                write!(f, "message \"{key}\" ({locale}) expects argument \"{name}\"")
            }
            Self::UnusedArgument { locale, key, name } => {
                write!(f, "message \"{key}\" ({locale}) does not use argument \"{name}\"")
            }
        }
    }
}

/// Receives translation diagnostics.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    fn report(&self, diagnostic: &TranslationDiagnostic);
}

/// Default sink: forwards diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &TranslationDiagnostic) {
        tracing::warn!(key = diagnostic.key(), "i18n: {diagnostic}");
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    diagnostics: Mutex<Vec<TranslationDiagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> Vec<TranslationDiagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn clear(&self) {
        match self.diagnostics.lock() {
            Ok(mut d) => d.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &TranslationDiagnostic) {
        match self.diagnostics.lock() {
            Ok(mut d) => d.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
