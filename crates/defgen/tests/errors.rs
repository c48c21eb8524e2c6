//! Error message snapshots.

use std::sync::Arc;

use defgen::parser::parse_pattern;
use defgen::{DefinitionValue, Definitions, GenError, LoadError, LoadWarning, Value, record};
use insta::assert_snapshot;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn store() -> Arc<Definitions> {
    let defs = Definitions::new();
    defs.insert("en", "color", DefinitionValue::pool(["red"]));
    defs.insert("en", "empty", DefinitionValue::Pool(Vec::new()));
    defs.insert_formatter("en", "shout", |value| value.to_string().to_uppercase());
    defs.insert("en", "greeting", DefinitionValue::pool(["Hello {{ who.name }}"]));
    defs.insert("en", "numbers", DefinitionValue::pool([1, 2]));
    Arc::new(defs)
}

fn generate_err(name: &str, locale: &str) -> GenError {
    let mut engine = StdRng::seed_from_u64(0);
    store()
        .arbitrary(name)
        .generate(&mut engine, locale)
        .unwrap_err()
}

fn format_err(name: &str, value: &Value) -> GenError {
    let mut engine = StdRng::seed_from_u64(0);
    store()
        .formater(name)
        .format(value, "en", &mut engine)
        .unwrap_err()
}

// =========================================================================
// Generation errors
// =========================================================================

#[test]
fn unsupported_locale_message() {
    assert_snapshot!(generate_err("color", "klingon"), @"locale 'klingon' is not supported");
}

#[test]
fn missing_definition_message() {
    assert_snapshot!(generate_err("size", "en"), @"definition 'size' in 'en' is empty");
}

#[test]
fn missing_definition_with_suggestion_message() {
    assert_snapshot!(
        generate_err("colour", "en"),
        @"definition 'colour' in 'en' is empty; did you mean: color?"
    );
}

#[test]
fn empty_pool_message() {
    assert_snapshot!(generate_err("empty", "en"), @"cannot choose from an empty pool");
}

#[test]
fn not_a_pool_message() {
    assert_snapshot!(
        generate_err("shout", "en"),
        @"definition 'shout' in 'en' is a formatter, not a pool"
    );
}

// =========================================================================
// Formatting errors
// =========================================================================

#[test]
fn missing_formatter_message() {
    assert_snapshot!(
        format_err("nope", &Value::Null),
        @"definition 'nope' in 'en' cannot format: definition not found"
    );
}

#[test]
fn non_template_entries_message() {
    assert_snapshot!(
        format_err("numbers", &Value::Null),
        @"definition 'numbers' in 'en' cannot format: entries must be template strings"
    );
}

#[test]
fn missing_field_message() {
    assert_snapshot!(
        format_err("greeting", &record! { "who" => record! { "age" => 3 } }),
        @"template field 'who.name' is missing from the value"
    );
}

#[test]
fn invalid_template_message() {
    let defs = Arc::new(Definitions::new());
    defs.insert("en", "broken", DefinitionValue::pool(["Hello {{ x"]));
    let mut engine = StdRng::seed_from_u64(0);
    let err = defs
        .formater("broken")
        .format(&Value::Null, "en", &mut engine)
        .unwrap_err();
    assert!(
        err.to_string().starts_with("invalid template 'Hello {{ x': "),
        "{err}"
    );
}

// =========================================================================
// Load errors and warnings
// =========================================================================

#[test]
fn pattern_load_error_message() {
    let err = Definitions::new()
        .load_json_str(r#"{ "en": { "code": [{ "pattern": "ab)" }] } }"#)
        .unwrap_err();
    assert_snapshot!(
        err,
        @"invalid pattern /ab)/ in 'code' (en): syntax error at 1:3: unexpected character: ')'"
    );
}

#[test]
fn empty_class_message() {
    assert_snapshot!(
        parse_pattern("[z-a]").unwrap_err(),
        @"syntax error at 1:1: character class matches nothing"
    );
}

#[test]
fn json_load_error_message() {
    let err = Definitions::new().load_json_str("{").unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().starts_with("<string>:1:1: "), "{err}");
}

#[test]
fn reload_error_message() {
    assert_snapshot!(
        LoadError::NoPathForReload,
        @"cannot reload: definitions were not loaded from a file"
    );
}

#[test]
fn warning_messages() {
    assert_snapshot!(
        LoadWarning::UnknownDefinition {
            name: "colour".to_string(),
            locale: "fr".to_string(),
        },
        @"definition 'colour' in 'fr' does not exist in the source locale"
    );
    assert_snapshot!(
        LoadWarning::KindMismatch {
            name: "greeting".to_string(),
            locale: "de".to_string(),
            source_kind: "pool".to_string(),
            target_kind: "formatter".to_string(),
        },
        @"definition 'greeting' is a pool in the source locale but a formatter in 'de'"
    );
    assert_snapshot!(
        LoadWarning::UnsupportedBucket {
            locale: "tlh".to_string(),
        },
        @"locale bucket 'tlh' is not a supported locale"
    );
}
