//! Miette diagnostic wrapper for data table load errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use defgen::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a data table that failed to load.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(defgen::data))]
pub struct DataDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl DataDiagnostic {
    /// Create a diagnostic from a load error with source context.
    ///
    /// I/O errors carry no source position and yield `None`.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Option<Self> {
        let (offset, length, message, help) = match err {
            LoadError::Json {
                line,
                column,
                message,
                ..
            } => (
                line_column_offset(content, *line, *column),
                1,
                format!("invalid data table: {message}"),
                Some("definitions are arrays; groups are objects of definitions".to_string()),
            ),
            LoadError::Pattern {
                locale,
                name,
                source_text,
                error,
            } => {
                let (offset, length) = locate_string(content, source_text);
                (
                    offset,
                    length,
                    format!("invalid pattern /{source_text}/: {error}"),
                    Some(format!("in definition '{name}' ({locale})")),
                )
            }
            LoadError::Io { .. } | LoadError::NoPathForReload => return None,
        };

        // Clamp to content length to avoid a miette panic on out-of-bounds spans.
        let offset = offset.min(content.len());
        let length = length.min(content.len() - offset);

        Some(DataDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message,
            help,
        })
    }
}

/// Convert a 1-based line and column into a byte offset.
fn line_column_offset(content: &str, line: usize, column: usize) -> usize {
    content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        + column.saturating_sub(1)
}

/// Find the JSON-encoded form of `text` in `content`.
fn locate_string(content: &str, text: &str) -> (usize, usize) {
    serde_json::to_string(text)
        .ok()
        .and_then(|encoded| content.find(&encoded).map(|offset| (offset, encoded.len())))
        .unwrap_or((0, 0))
}
