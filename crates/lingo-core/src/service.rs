//! The translation service.
//!
//! A [`Translator`] holds the immutable [`Catalog`] and one active language.
//! It starts out in `en` (or the configured default) and only changes
//! language through [`Translator::set_language`]; a failed call leaves the
//! active language untouched.
//!
//! Clones share the catalog and carry their own active language, so a server
//! can hand each request its own clone. [`Translator::localizer`] is the
//! stateless alternative: it resolves a language for one lookup without
//! touching the translator.
//!
//! ```
//! use lingo_core::{Catalog, MemoryResources, Translator};
//!
//! let resources = MemoryResources::new()
//!     .with("en.json", r#"{"welcome": "Welcome {{.Name}}"}"#)
//!     .with("fr.json", r#"{"welcome": "Bienvenue {{.Name}}"}"#);
//! let mut translator = Translator::builder()
//!     .catalog(Catalog::load(&resources).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(translator.translate_with("welcome", &[("Name", "John")]), "Welcome John");
//! translator.set_language("fr-CA").unwrap();
//! assert_eq!(translator.translate_with("welcome", &[("Name", "John")]), "Bienvenue John");
//! assert_eq!(translator.translate("nonexistent.key"), "nonexistent.key");
//! ```

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::detect::{detect_language, detect_language_with};
use crate::diagnostics::{DiagnosticSink, TracingSink, TranslationDiagnostic};
use crate::error::{I18nError, I18nResult};
use crate::matcher::{EXPLICIT_THRESHOLD, match_language};
use crate::resources::ResourceProvider;
use crate::tag::LocaleIdentifier;
use crate::template::{BraceFormatter, MessageFormatter};

/// Language used when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Translates message keys in one active language.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    active: LocaleIdentifier,
    formatter: Arc<dyn MessageFormatter>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Translator {
    /// Load the bundled locales and activate `en`.
    #[cfg(feature = "embedded")]
    pub fn new() -> I18nResult<Self> {
        Self::builder().build()
    }

    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::default()
    }

    /// Switch the active language to the best match for `tag`.
    ///
    /// Exact, region-fallback and shared-language matches are all accepted.
    /// Returns the identifier that became active.
    pub fn set_language(&mut self, tag: &str) -> I18nResult<&LocaleIdentifier> {
        let matched = resolve(&self.catalog, tag)?;
        if matched != self.active {
            tracing::debug!(requested = tag, from = %self.active, to = %matched, "switching language");
        }
        self.active = matched;
        Ok(&self.active)
    }

    /// The active language.
    pub fn language(&self) -> &LocaleIdentifier {
        &self.active
    }

    pub fn available_languages(&self) -> &[LocaleIdentifier] {
        self.catalog.available()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the active language defines `key`.
    pub fn has_message(&self, key: &str) -> bool {
        self.current().has_message(key)
    }

    /// Translate `key`, or return it verbatim if it has no translation.
    pub fn translate(&self, key: &str) -> String {
        self.current().translate(key)
    }

    /// Translate `key`, substituting named arguments.
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.current().translate_with(key, args)
    }

    /// A view bound to the best match for `tag`, leaving `self` unchanged.
    pub fn localizer(&self, tag: &str) -> I18nResult<Localizer<'_>> {
        let locale = resolve(&self.catalog, tag)?;
        Ok(self.localizer_for(locale))
    }

    /// A view bound to the active language.
    pub fn current(&self) -> Localizer<'_> {
        self.localizer_for(self.active.clone())
    }

    fn localizer_for(&self, locale: LocaleIdentifier) -> Localizer<'_> {
        Localizer {
            catalog: self.catalog.as_ref(),
            locale,
            formatter: self.formatter.as_ref(),
            sink: self.sink.as_ref(),
        }
    }
}

fn resolve(catalog: &Catalog, tag: &str) -> I18nResult<LocaleIdentifier> {
    let result = match_language(tag, catalog.available())?;
    result
        .accepted(EXPLICIT_THRESHOLD)
        .cloned()
        .ok_or_else(|| I18nError::UnsupportedLanguage {
            tag: tag.to_string(),
        })
}

/// Translation bound to a single language.
#[derive(Debug, Clone)]
pub struct Localizer<'a> {
    catalog: &'a Catalog,
    locale: LocaleIdentifier,
    formatter: &'a dyn MessageFormatter,
    sink: &'a dyn DiagnosticSink,
}

impl Localizer<'_> {
    pub fn locale(&self) -> &LocaleIdentifier {
        &self.locale
    }

    pub fn has_message(&self, key: &str) -> bool {
        self.template(key).is_some()
    }

    pub fn translate(&self, key: &str) -> String {
        self.translate_with(key, &[])
    }

    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.template(key) else {
            self.sink.report(&TranslationDiagnostic::MissingMessage {
                locale: self.locale.clone(),
                key: key.to_string(),
            });
            return key.to_string();
        };

        let rendered = self.formatter.format(template, args);
        for name in rendered.missing {
            self.sink.report(&TranslationDiagnostic::MissingArgument {
                locale: self.locale.clone(),
                key: key.to_string(),
                name,
            });
        }
        for name in rendered.unused {
            self.sink.report(&TranslationDiagnostic::UnusedArgument {
                locale: self.locale.clone(),
                key: key.to_string(),
                name,
            });
        }
        rendered.text
    }

    fn template(&self, key: &str) -> Option<&str> {
        self.catalog.table(&self.locale).and_then(|t| t.get(key))
    }
}

enum CatalogSource {
    Provider(Box<dyn ResourceProvider>),
    Catalog(Catalog),
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

enum Detection {
    Off,
    Environment,
    Custom(EnvLookup),
}

/// Configures and builds a [`Translator`].
pub struct TranslatorBuilder {
    source: Option<CatalogSource>,
    default_language: String,
    formatter: Arc<dyn MessageFormatter>,
    sink: Arc<dyn DiagnosticSink>,
    detection: Detection,
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self {
            source: None,
            default_language: DEFAULT_LANGUAGE.to_string(),
            formatter: Arc::new(BraceFormatter),
            sink: Arc::new(TracingSink),
            detection: Detection::Off,
        }
    }
}

impl TranslatorBuilder {
    /// Load locales from `provider` instead of the bundled set.
    pub fn resources(mut self, provider: impl ResourceProvider + 'static) -> Self {
        self.source = Some(CatalogSource::Provider(Box::new(provider)));
        self
    }

    /// Use an already loaded catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.source = Some(CatalogSource::Catalog(catalog));
        self
    }

    /// Language activated at construction. Construction fails if it has no match.
    pub fn default_language(mut self, tag: impl Into<String>) -> Self {
        self.default_language = tag.into();
        self
    }

    pub fn formatter(mut self, formatter: impl MessageFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// After activating the default, switch to the language detected from
    /// `LINGO_LOCALE`, `LC_ALL`, `LANG` or the system locale.
    pub fn detect_from_env(mut self, enabled: bool) -> Self {
        self.detection = if enabled {
            Detection::Environment
        } else {
            Detection::Off
        };
        self
    }

    /// Like [`TranslatorBuilder::detect_from_env`] but reading variables through `lookup`.
    pub fn detect_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.detection = Detection::Custom(Box::new(lookup));
        self
    }

    pub fn build(self) -> I18nResult<Translator> {
        let catalog = match self.source {
            Some(CatalogSource::Catalog(catalog)) => catalog,
            Some(CatalogSource::Provider(provider)) => Catalog::load(provider.as_ref())?,
            None => default_catalog()?,
        };

        let mut active = match resolve(&catalog, &self.default_language) {
            Ok(active) => active,
            Err(I18nError::UnsupportedLanguage { tag }) => {
                return Err(I18nError::DefaultLanguageMissing { tag });
            }
            Err(err) => return Err(err),
        };

        let detected = match &self.detection {
            Detection::Off => Ok(None),
            Detection::Environment => detect_language(catalog.available()),
            Detection::Custom(lookup) => detect_language_with(lookup, false, catalog.available()),
        };
        match detected {
            Ok(Some(locale)) => active = locale,
            Ok(None) => {}
            Err(err) => tracing::warn!("ignoring locale from environment: {err}"),
        }

        tracing::debug!(
            locale = %active,
            available = catalog.len(),
            "translator ready"
        );

        Ok(Translator {
            catalog: Arc::new(catalog),
            active,
            formatter: self.formatter,
            sink: self.sink,
        })
    }
}

#[cfg(feature = "embedded")]
fn default_catalog() -> I18nResult<Catalog> {
    Catalog::load(&crate::resources::EmbeddedResources)
}

#[cfg(not(feature = "embedded"))]
fn default_catalog() -> I18nResult<Catalog> {
    Ok(Catalog::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::resources::MemoryResources;

    fn test_resources() -> MemoryResources {
        MemoryResources::new()
            .with("en.json", r#"{"hello": "Hello", "welcome": "Welcome {{.Name}}"}"#)
            .with("fr.json", r#"{"hello": "Bonjour", "welcome": "Bienvenue {{.Name}}"}"#)
            .with("es.json", r#"{"hello": "Hola"}"#)
    }

    fn translator() -> Translator {
        Translator::builder().resources(test_resources()).build().unwrap()
    }

    fn recording() -> (Translator, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let translator = Translator::builder()
            .resources(test_resources())
            .diagnostic_sink(sink.clone())
            .build()
            .unwrap();
        (translator, sink)
    }

    #[test]
    fn test_starts_in_english() {
        let t = translator();
        assert_eq!(t.language().to_string(), "en");
        assert_eq!(t.translate("hello"), "Hello");
    }

    #[test]
    fn test_set_language() {
        let mut t = translator();
        t.set_language("fr").unwrap();
        assert_eq!(t.translate("hello"), "Bonjour");
        t.set_language("en").unwrap();
        assert_eq!(t.translate("hello"), "Hello");
    }

    #[test]
    fn test_set_language_region_fallback() {
        let mut t = translator();
        let active = t.set_language("fr-CA").unwrap().to_string();
        assert_eq!(active, "fr");
        assert_eq!(t.translate("hello"), "Bonjour");
    }

    #[test]
    fn test_set_language_unsupported_keeps_previous() {
        let mut t = translator();
        t.set_language("fr").unwrap();
        let err = t.set_language("de").unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedLanguage { .. }));
        assert_eq!(t.language().to_string(), "fr");
    }

    #[test]
    fn test_set_language_invalid_keeps_previous() {
        let mut t = translator();
        t.set_language("es").unwrap();
        let err = t.set_language("invalid-lang-tag").unwrap_err();
        assert!(err.is_invalid_tag());
        assert_eq!(t.language().to_string(), "es");
    }

    #[test]
    fn test_set_language_is_idempotent() {
        let mut t = translator();
        t.set_language("en").unwrap();
        t.set_language("en").unwrap();
        assert_eq!(t.language().to_string(), "en");
    }

    #[test]
    fn test_translate_with_args() {
        let mut t = translator();
        assert_eq!(t.translate_with("welcome", &[("Name", "John")]), "Welcome John");
        t.set_language("fr").unwrap();
        assert_eq!(t.translate_with("welcome", &[("Name", "John")]), "Bienvenue John");
    }

    #[test]
    fn test_missing_key_returns_key_and_reports() {
        let (t, sink) = recording();
        assert_eq!(t.translate("nonexistent.key"), "nonexistent.key");
        assert_eq!(
            sink.diagnostics(),
            vec![TranslationDiagnostic::MissingMessage {
                locale: LocaleIdentifier::parse("en").unwrap(),
                key: "nonexistent.key".into(),
            }]
        );
    }

    #[test]
    fn test_empty_key_returns_empty() {
        let t = translator();
        assert_eq!(t.translate(""), "");
    }

    #[test]
    fn test_empty_template_is_a_miss() {
        let sink = Arc::new(RecordingSink::new());
        let resources = MemoryResources::new()
            .with("en.json", r#"{"hello": "", "cats": {"one": "One cat"}}"#);
        let t = Translator::builder()
            .resources(resources)
            .diagnostic_sink(sink.clone())
            .build()
            .unwrap();

        assert_eq!(t.translate("hello"), "hello");
        assert_eq!(t.translate("cats"), "cats");
        assert!(!t.has_message("hello"));
        assert_eq!(
            sink.diagnostics(),
            vec![
                TranslationDiagnostic::MissingMessage {
                    locale: LocaleIdentifier::parse("en").unwrap(),
                    key: "hello".into(),
                },
                TranslationDiagnostic::MissingMessage {
                    locale: LocaleIdentifier::parse("en").unwrap(),
                    key: "cats".into(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_key_in_active_language_only() {
        let (mut t, sink) = recording();
        t.set_language("es").unwrap();
        assert_eq!(t.translate("welcome"), "welcome");
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn test_argument_diagnostics() {
        let (t, sink) = recording();
        assert_eq!(t.translate("welcome"), "Welcome {{.Name}}");
        assert_eq!(t.translate_with("hello", &[("Name", "x")]), "Hello");

        let diags = sink.diagnostics();
        assert!(matches!(&diags[0], TranslationDiagnostic::MissingArgument { name, .. } if name == "Name"));
        assert!(matches!(&diags[1], TranslationDiagnostic::UnusedArgument { name, .. } if name == "Name"));
    }

    #[test]
    fn test_missing_default_language_is_fatal() {
        let resources = MemoryResources::new().with("fr.json", r#"{"hello": "Bonjour"}"#);
        let err = Translator::builder().resources(resources).build().unwrap_err();
        assert!(matches!(err, I18nError::DefaultLanguageMissing { ref tag } if tag == "en"));
    }

    #[test]
    fn test_catalog_failure_is_fatal() {
        let resources = MemoryResources::new().with("en.json", "{");
        let err = Translator::builder().resources(resources).build().unwrap_err();
        assert!(matches!(err, I18nError::CatalogLoad(_)));
    }

    #[test]
    fn test_custom_default_language() {
        let t = Translator::builder()
            .resources(test_resources())
            .default_language("es")
            .build()
            .unwrap();
        assert_eq!(t.translate("hello"), "Hola");
    }

    #[test]
    fn test_detection_overrides_default() {
        let t = Translator::builder()
            .resources(test_resources())
            .detect_with(|name| (name == "LANG").then(|| "fr_CA.UTF-8".to_string()))
            .build()
            .unwrap();
        assert_eq!(t.language().to_string(), "fr");
    }

    #[test]
    fn test_detection_failure_keeps_default() {
        let t = Translator::builder()
            .resources(test_resources())
            .detect_with(|name| (name == "LANG").then(|| "invalid-lang-tag".to_string()))
            .build()
            .unwrap();
        assert_eq!(t.language().to_string(), "en");

        let t = Translator::builder()
            .resources(test_resources())
            .detect_with(|name| (name == "LANG").then(|| "de_DE".to_string()))
            .build()
            .unwrap();
        assert_eq!(t.language().to_string(), "en");
    }

    #[test]
    fn test_localizer_does_not_mutate() {
        let t = translator();
        let fr = t.localizer("fr-FR").unwrap();
        assert_eq!(fr.locale().to_string(), "fr");
        assert_eq!(fr.translate("hello"), "Bonjour");
        assert_eq!(t.translate("hello"), "Hello");
        assert!(t.localizer("de").is_err());
    }

    #[test]
    fn test_clones_have_independent_languages() {
        let base = translator();
        let mut other = base.clone();
        other.set_language("es").unwrap();
        assert_eq!(base.translate("hello"), "Hello");
        assert_eq!(other.translate("hello"), "Hola");
    }

    #[test]
    fn test_has_message() {
        let t = translator();
        assert!(t.has_message("hello"));
        assert!(!t.has_message("nope"));
    }

    #[cfg(feature = "embedded")]
    #[test]
    fn test_new_uses_bundled_locales() {
        let mut t = Translator::new().unwrap();
        assert_eq!(t.translate("hello"), "Hello");
        t.set_language("es").unwrap();
        assert_eq!(t.translate("app.ui.search"), "Buscar");
    }
}
