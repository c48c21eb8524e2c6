//! Integration tests for loading JSON data tables.

use std::fs::write;
use std::sync::Arc;

use defgen::{DefinitionValue, Definitions, LoadError, PoolEntry, Value};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

const TABLE: &str = r#"{
    "en": {
        "color": ["red", "green"],
        "name": {
            "first": ["Sam", "Alex"],
            "last": ["Lee"]
        },
        "plate": [{ "pattern": "[A-Z]{3}-[0-9]{3}" }],
        "mixed": [1, 2.5, true, null, { "x": "Sam" }]
    },
    "pt-BR": {
        "color": ["vermelho"]
    }
}"#;

fn pool_of(value: Option<DefinitionValue>) -> Vec<PoolEntry> {
    match value {
        Some(DefinitionValue::Pool(entries)) => entries,
        other => panic!("expected a pool, got {other:?}"),
    }
}

// =========================================================================
// JSON strings
// =========================================================================

#[test]
fn load_counts_definitions() {
    let defs = Definitions::new();
    assert_eq!(defs.load_json_str(TABLE).unwrap(), 6);
    assert_eq!(defs.locales(), vec!["en", "pt_BR"]);
    assert_eq!(
        defs.names("en"),
        vec!["color", "mixed", "name.first", "name.last", "plate"]
    );
}

#[test]
fn from_json_str_builds_a_store() {
    let defs = Definitions::from_json_str(TABLE).unwrap();
    let pool = pool_of(defs.get("color", "pt-BR").unwrap());
    assert_eq!(pool, vec![PoolEntry::literal("vermelho")]);
}

#[test]
fn literal_values_keep_their_shape() {
    let defs = Definitions::from_json_str(TABLE).unwrap();
    let pool = pool_of(defs.get("mixed", "en").unwrap());
    assert_eq!(
        pool,
        vec![
            PoolEntry::literal(1),
            PoolEntry::literal(2.5),
            PoolEntry::literal(true),
            PoolEntry::Literal(Value::Null),
            PoolEntry::literal(Value::map([("x", "Sam")])),
        ]
    );
}

#[test]
fn pattern_objects_become_patterns() {
    let defs = Arc::new(Definitions::from_json_str(TABLE).unwrap());
    let pool = pool_of(defs.get("plate", "en").unwrap());
    assert!(matches!(pool.as_slice(), [PoolEntry::Pattern(_)]));

    let mut engine = StdRng::seed_from_u64(10);
    let plate = defs.arbitrary("plate").generate(&mut engine, "en").unwrap();
    let text = plate.as_str().unwrap();
    assert_eq!(text.len(), 7);
    assert_eq!(&text[3..4], "-");
}

#[test]
fn objects_with_extra_keys_are_literals() {
    let defs = Definitions::from_json_str(
        r#"{ "en": { "odd": [{ "pattern": "a", "note": "x" }] } }"#,
    )
    .unwrap();
    let pool = pool_of(defs.get("odd", "en").unwrap());
    assert!(matches!(pool.as_slice(), [PoolEntry::Literal(Value::Map(_))]));
}

#[test]
fn reloading_a_locale_replaces_only_that_bucket() {
    let defs = Definitions::from_json_str(TABLE).unwrap();
    defs.load_json_str(r#"{ "en": { "color": ["blue"] } }"#).unwrap();

    assert_eq!(defs.names("en"), vec!["color"]);
    assert_eq!(defs.names("pt_BR"), vec!["color"]);
}

#[test]
fn load_single_locale_bucket() {
    let defs = Definitions::new();
    let count = defs
        .load_locale_json_str("fr-CA", r#"{ "color": ["rouge"], "size": { "big": ["grand"] } }"#)
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(defs.locales(), vec!["fr_CA"]);
    assert!(defs.get("size.big", "fr-CA").unwrap().is_some());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn malformed_json_reports_position() {
    let defs = Definitions::new();
    let err = defs.load_json_str("{\n  \"en\": [1,]\n}").unwrap_err();
    match err {
        LoadError::Json { origin, line, .. } => {
            assert_eq!(origin, "<string>");
            assert_eq!(line, 2);
        }
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn wrong_shape_is_a_json_error() {
    let defs = Definitions::new();
    // A locale must map to an object of definitions.
    assert!(matches!(
        defs.load_json_str(r#"{ "en": ["red"] }"#),
        Err(LoadError::Json { .. })
    ));
    // A definition must be a list or a group.
    assert!(matches!(
        defs.load_json_str(r#"{ "en": { "color": "red" } }"#),
        Err(LoadError::Json { .. })
    ));
}

#[test]
fn invalid_pattern_names_its_definition() {
    let defs = Definitions::new();
    let err = defs
        .load_json_str(r#"{ "de": { "car": { "plate": [{ "pattern": "[A-Z" }] } } }"#)
        .unwrap_err();
    match err {
        LoadError::Pattern {
            locale,
            name,
            source_text,
            ..
        } => {
            assert_eq!(locale, "de");
            assert_eq!(name, "car.plate");
            assert_eq!(source_text, "[A-Z");
        }
        other => panic!("expected a pattern error, got {other:?}"),
    }
}

#[test]
fn failed_load_leaves_data_untouched() {
    let defs = Definitions::from_json_str(TABLE).unwrap();
    assert!(defs.load_json_str(r#"{ "en": { "x": [{ "pattern": "(" }] } }"#).is_err());
    assert_eq!(defs.names("en").len(), 5);
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn load_file_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    write(&path, r#"{ "en": { "color": ["red"] } }"#).unwrap();

    let defs = Definitions::new();
    assert_eq!(defs.load_file(&path).unwrap(), 1);

    write(&path, r#"{ "en": { "color": ["blue"], "size": ["big"] } }"#).unwrap();
    assert_eq!(defs.reload_file().unwrap(), 2);
    let pool = pool_of(defs.get("color", "en").unwrap());
    assert_eq!(pool, vec![PoolEntry::literal("blue")]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let defs = Definitions::new();
    let err = defs.load_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn file_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    write(&path, "{").unwrap();

    let defs = Definitions::new();
    match defs.load_file(&path).unwrap_err() {
        LoadError::Json { origin, .. } => assert!(origin.ends_with("broken.json")),
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn reload_without_file_fails() {
    let defs = Definitions::new();
    assert!(matches!(defs.reload_file(), Err(LoadError::NoPathForReload)));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    write(&path, r#"{ "en": {} }"#).unwrap();
    defs.load_file(&path).unwrap();
    // Loading from a string forgets the file.
    defs.load_json_str(r#"{ "en": {} }"#).unwrap();
    assert!(matches!(defs.reload_file(), Err(LoadError::NoPathForReload)));
}
