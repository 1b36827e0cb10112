//! Behavior of the translator over the locales bundled with the crate.

use lingo_core::{Confidence, I18nError, Translator, match_language};

#[test]
fn bundled_catalog_has_expected_languages() {
    let translator = Translator::new().unwrap();
    let tags: Vec<String> = translator
        .available_languages()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(tags, vec!["en", "es", "fr"]);
}

#[test]
fn every_bundled_language_defines_every_english_key() {
    let translator = Translator::new().unwrap();
    let catalog = translator.catalog();
    let english = catalog
        .table(&"en".parse().unwrap())
        .expect("english table");

    for locale in catalog.available() {
        let table = catalog.table(locale).unwrap();
        for key in english.keys() {
            assert!(table.contains(key), "{locale} is missing {key}");
        }
    }
}

#[test]
fn translate_across_languages() {
    let mut translator = Translator::new().unwrap();
    assert_eq!(translator.translate("hello"), "Hello");

    translator.set_language("fr").unwrap();
    assert_eq!(translator.translate("app.ui.search"), "Rechercher");
    assert_eq!(
        translator.translate_with("greeting", &[("Name", "World")]),
        "Bonjour World"
    );

    translator.set_language("es").unwrap();
    assert_eq!(translator.translate("app.ui.search"), "Buscar");
}

#[test]
fn welcome_with_name() {
    let mut translator = Translator::new().unwrap();
    assert_eq!(
        translator.translate_with("welcome", &[("Name", "John")]),
        "Welcome John"
    );
    translator.set_language("fr").unwrap();
    assert_eq!(
        translator.translate_with("welcome", &[("Name", "John")]),
        "Bienvenue John"
    );
}

#[test]
fn unsupported_and_invalid_requests() {
    let mut translator = Translator::new().unwrap();

    let err = translator.set_language("de").unwrap_err();
    assert!(matches!(err, I18nError::UnsupportedLanguage { .. }));
    assert_eq!(translator.language().to_string(), "en");

    let err = translator.set_language("invalid-lang-tag").unwrap_err();
    assert!(matches!(err, I18nError::InvalidTag { .. }));
    assert_eq!(translator.language().to_string(), "en");
}

#[test]
fn region_tag_matches_base_language() {
    let translator = Translator::new().unwrap();
    let result = match_language("fr-CA", translator.available_languages()).unwrap();
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.best.unwrap().to_string(), "fr");
}

#[test]
fn missing_key_is_echoed() {
    let translator = Translator::new().unwrap();
    assert_eq!(translator.translate("nonexistent.key"), "nonexistent.key");
}
