//! Error types for the definition store and the binders.

use std::io::Error as IoError;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while loading definition data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a data table.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The data table is not valid JSON or has the wrong shape.
    #[error("{origin}:{line}:{column}: {message}")]
    Json {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A pattern entry failed to parse.
    #[error("invalid pattern /{source_text}/ in '{name}' ({locale}): {error}")]
    Pattern {
        locale: String,
        name: String,
        source_text: String,
        error: ParseError,
    },

    /// Attempted to reload data that was not loaded from a file.
    #[error("cannot reload: definitions were not loaded from a file")]
    NoPathForReload,
}

/// An error raised while resolving, generating or formatting a definition.
///
/// Every variant is fatal to the call that raised it.
#[derive(Debug, Error)]
pub enum GenError {
    /// The locale tag is not in the supported-locale registry.
    #[error("locale '{locale}' is not supported")]
    UnsupportedLocale { locale: String },

    /// No definition exists for the name in the effective locale bucket.
    #[error("definition '{name}' in '{locale}' is empty{}", format_suggestions(suggestions))]
    MissingDefinition {
        name: String,
        locale: String,
        suggestions: Vec<String>,
    },

    /// A uniform choice was requested over a pool with no elements.
    #[error("cannot choose from an empty pool")]
    EmptyPool,

    /// The definition is a formatting function, not a pool of values.
    #[error("definition '{name}' in '{locale}' is a formatter, not a pool")]
    NotAPool { name: String, locale: String },

    /// The formatting payload is neither a list of templates nor callable.
    #[error("definition '{name}' in '{locale}' cannot format: {reason}")]
    MalformedFormat {
        name: String,
        locale: String,
        reason: String,
    },

    /// A template failed to compile.
    #[error("invalid template '{template}': {error}")]
    Template { template: String, error: ParseError },

    /// A template placeholder names a field the value does not have.
    #[error("template field '{field}' is missing from the value")]
    MissingField { field: String },
}

/// Warnings produced when comparing locale buckets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// The target locale defines a name the source locale does not.
    #[error("definition '{name}' in '{locale}' does not exist in the source locale")]
    UnknownDefinition { name: String, locale: String },

    /// The two locales disagree on whether a name is a pool or a formatter.
    #[error("definition '{name}' is a {source_kind} in the source locale but a {target_kind} in '{locale}'")]
    KindMismatch {
        name: String,
        locale: String,
        source_kind: String,
        target_kind: String,
    },

    /// A bucket key that no registered locale tag normalizes to.
    #[error("locale bucket '{locale}' is not a supported locale")]
    UnsupportedBucket { locale: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute up to three names within a small edit distance of `key`,
/// closest first.
///
/// ```
/// use defgen::compute_suggestions;
///
/// let names = vec!["name.first".to_string(), "name.last".to_string()];
/// assert_eq!(compute_suggestions("name.frist", &names), vec!["name.first"]);
/// ```
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}
