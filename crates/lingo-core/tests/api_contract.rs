//! API contract tests for lingo-core.
//!
//! These tests catch accidental public API breakage by verifying that the
//! documented public types and functions remain importable and keep their
//! expected shape.

// ============================================================================
// Public type importability
// ============================================================================

#[test]
fn public_types_are_importable() {
    let _ = std::any::type_name::<lingo_core::Translator>();
    let _ = std::any::type_name::<lingo_core::TranslatorBuilder>();
    let _ = std::any::type_name::<lingo_core::Localizer<'static>>();
    let _ = std::any::type_name::<lingo_core::Catalog>();
    let _ = std::any::type_name::<lingo_core::MessageTable>();
    let _ = std::any::type_name::<lingo_core::LocaleIdentifier>();
    let _ = std::any::type_name::<lingo_core::Confidence>();
    let _ = std::any::type_name::<lingo_core::MatchResult>();
    let _ = std::any::type_name::<lingo_core::I18nError>();
    let _ = std::any::type_name::<lingo_core::LoadError>();
    let _ = std::any::type_name::<lingo_core::LingoConfig>();
    let _ = std::any::type_name::<lingo_core::TranslationDiagnostic>();
    let _ = std::any::type_name::<lingo_core::I18nResult<()>>();

    // Trait objects
    fn _assert_provider_trait(_: &dyn lingo_core::ResourceProvider) {}
    fn _assert_formatter_trait(_: &dyn lingo_core::MessageFormatter) {}
    fn _assert_sink_trait(_: &dyn lingo_core::DiagnosticSink) {}

    // Implementations
    let _ = std::any::type_name::<lingo_core::EmbeddedResources>();
    let _ = std::any::type_name::<lingo_core::DirectoryResources>();
    let _ = std::any::type_name::<lingo_core::MemoryResources>();
    let _ = std::any::type_name::<lingo_core::BraceFormatter>();
    let _ = std::any::type_name::<lingo_core::TracingSink>();
    let _ = std::any::type_name::<lingo_core::RecordingSink>();
}

// ============================================================================
// Public function signatures
// ============================================================================

#[test]
fn public_functions_compile_with_expected_signatures() {
    use lingo_core::{I18nResult, LocaleIdentifier, MatchResult};

    // match_language(tag, supported) -> I18nResult<MatchResult>
    let _: fn(&str, &[LocaleIdentifier]) -> I18nResult<MatchResult> = lingo_core::match_language;

    // detect_language(supported) -> I18nResult<Option<LocaleIdentifier>>
    let _: fn(&[LocaleIdentifier]) -> I18nResult<Option<LocaleIdentifier>> =
        lingo_core::detect_language;

    // negotiate_accept_language(header, supported) -> Option<LocaleIdentifier>
    let _: fn(&str, &[LocaleIdentifier]) -> Option<LocaleIdentifier> =
        lingo_core::negotiate_accept_language;

    // Catalog::load(provider) -> I18nResult<Catalog>
    let _: fn(&dyn lingo_core::ResourceProvider) -> I18nResult<lingo_core::Catalog> =
        lingo_core::Catalog::load;
}

#[test]
fn translator_methods_have_expected_shape() {
    let mut translator = lingo_core::Translator::new().unwrap();
    let _: &LocaleIdentifierAlias = translator.language();
    let _: &[LocaleIdentifierAlias] = translator.available_languages();
    let _: String = translator.translate("hello");
    let _: String = translator.translate_with("welcome", &[("Name", "x")]);
    let _: lingo_core::I18nResult<&LocaleIdentifierAlias> = translator.set_language("en");
}

type LocaleIdentifierAlias = lingo_core::LocaleIdentifier;

#[test]
fn confidence_is_ordered() {
    use lingo_core::Confidence;
    let mut levels = vec![
        Confidence::Exact,
        Confidence::None,
        Confidence::High,
        Confidence::Low,
    ];
    levels.sort();
    assert_eq!(
        levels,
        vec![
            Confidence::None,
            Confidence::Low,
            Confidence::High,
            Confidence::Exact
        ]
    );
}
