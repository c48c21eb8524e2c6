//! Interpolation template parser using winnow.
//!
//! Parses template strings into an AST. Handles:
//! - Literal text segments
//! - Placeholders `{{ name }}` with dotted field paths
//! - The whole-value placeholder `{{ . }}`
//! - Lone `{` characters, which stay literal

use super::ast::{Segment, Template};
use super::error::{ParseError, leftover_error};
use winnow::combinator::{alt, cut_err, delimited, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a template string into an AST.
///
/// ```
/// use defgen::parser::{Segment, parse_template};
///
/// let t = parse_template("Hello {{ name }}!").unwrap();
/// assert_eq!(t.segments[1], Segment::Field(vec!["name".to_string()]));
/// ```
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => Ok(t),
        Ok(_) => Err(leftover_error(
            input,
            remaining,
            format!(
                "unexpected character: '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        )),
        Err(e) => Err(leftover_error(
            input,
            remaining,
            format!("unclosed placeholder: {e}"),
        )),
    }
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder, literal run, or lone brace).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((
        field,
        literal_run,
        '{'.map(|_| Segment::Literal("{".to_string())),
    ))
    .parse_next(input)
}

/// Parse a run of text up to the next `{`.
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '{')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// Parse a placeholder. Once `{{` is seen the placeholder must close.
fn field(input: &mut &str) -> ModalResult<Segment> {
    preceded(
        "{{",
        cut_err(terminated(delimited(ws, field_path, ws), "}}")),
    )
    .map(Segment::Field)
    .parse_next(input)
}

/// Parse `.` (whole value) or a dotted path of identifiers.
fn field_path(input: &mut &str) -> ModalResult<Vec<String>> {
    alt((
        '.'.map(|_| Vec::new()),
        separated(1.., identifier.map(str::to_string), '.'),
    ))
    .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a field identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-').parse_next(input)
}
