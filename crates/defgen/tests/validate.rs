//! Integration tests for cross-locale validation and coverage.

use defgen::{DefinitionValue, Definitions, LoadWarning, LocaleRegistry};

fn store() -> Definitions {
    let defs = Definitions::new();
    defs.insert("en", "color", DefinitionValue::pool(["red"]));
    defs.insert("en", "name.first", DefinitionValue::pool(["Sam"]));
    defs.insert("en", "name.last", DefinitionValue::pool(["Lee"]));
    defs.insert("en", "greeting", DefinitionValue::pool(["Hello {{ . }}"]));
    defs
}

// =========================================================================
// validate_locale
// =========================================================================

#[test]
fn matching_locales_have_no_warnings() {
    let defs = store();
    defs.insert("fr", "color", DefinitionValue::pool(["rouge"]));
    assert_eq!(defs.validate_locale("en", "fr"), vec![]);
}

#[test]
fn target_only_names_are_unknown() {
    let defs = store();
    defs.insert("fr", "colour", DefinitionValue::pool(["rouge"]));
    defs.insert("fr", "name.middle", DefinitionValue::pool(["Jean"]));

    assert_eq!(
        defs.validate_locale("en", "fr"),
        vec![
            LoadWarning::UnknownDefinition {
                name: "colour".to_string(),
                locale: "fr".to_string(),
            },
            LoadWarning::UnknownDefinition {
                name: "name.middle".to_string(),
                locale: "fr".to_string(),
            },
        ]
    );
}

#[test]
fn kind_mismatch_is_reported() {
    let defs = store();
    defs.insert_formatter("de", "greeting", |value| format!("Hallo {value}"));

    assert_eq!(
        defs.validate_locale("en", "de"),
        vec![LoadWarning::KindMismatch {
            name: "greeting".to_string(),
            locale: "de".to_string(),
            source_kind: "pool".to_string(),
            target_kind: "formatter".to_string(),
        }]
    );
}

#[test]
fn unregistered_bucket_is_reported() {
    let defs = Definitions::builder()
        .registry(LocaleRegistry::new(["en", "fr"]))
        .build();
    defs.insert("en", "color", DefinitionValue::pool(["red"]));
    defs.insert("tlh", "color", DefinitionValue::pool(["Doq"]));

    assert_eq!(
        defs.validate_locale("en", "tlh"),
        vec![LoadWarning::UnsupportedBucket {
            locale: "tlh".to_string(),
        }]
    );
}

#[test]
fn hyphenated_registry_tag_covers_its_bucket() {
    let defs = Definitions::builder()
        .registry(LocaleRegistry::new(["en", "pt-BR"]))
        .build();
    defs.insert("en", "color", DefinitionValue::pool(["red"]));
    defs.insert("pt_BR", "color", DefinitionValue::pool(["vermelho"]));

    assert!(defs.validate_locale("en", "pt-BR").is_empty());
}

#[test]
fn empty_source_produces_no_definition_warnings() {
    let defs = Definitions::new();
    defs.insert("fr", "color", DefinitionValue::pool(["rouge"]));
    assert!(defs.validate_locale("en", "fr").is_empty());
}

// =========================================================================
// coverage
// =========================================================================

#[test]
fn coverage_counts_translated_names() {
    let defs = store();
    defs.insert("fr", "color", DefinitionValue::pool(["rouge"]));
    defs.insert("fr", "name.first", DefinitionValue::pool(["Jean"]));
    defs.insert("fr", "extra", DefinitionValue::pool(["x"]));

    let coverage = defs.coverage("en", "fr");
    assert_eq!(coverage.locale, "fr");
    assert_eq!(coverage.translated, 2);
    assert_eq!(coverage.total, 4);
    assert_eq!(coverage.missing, vec!["greeting", "name.last"]);
    assert!(!coverage.is_complete());
}

#[test]
fn coverage_of_missing_bucket_is_empty() {
    let defs = store();
    let coverage = defs.coverage("en", "de-AT");
    assert_eq!(coverage.locale, "de_AT");
    assert_eq!(coverage.translated, 0);
    assert_eq!(coverage.missing.len(), 4);
}

#[test]
fn full_coverage_is_complete() {
    let defs = store();
    for name in defs.names("en") {
        defs.insert("es", &name, DefinitionValue::pool(["x"]));
    }
    let coverage = defs.coverage("en", "es");
    assert!(coverage.is_complete());
    assert_eq!(coverage.translated, coverage.total);
}
