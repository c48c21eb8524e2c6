//! Pattern expression parser using winnow.
//!
//! Accepts the subset of regular-expression syntax that can be synthesized
//! into strings: literals, `.`, escapes, character classes, groups,
//! alternation and quantifiers. Anchors are accepted and ignored.

use super::ast::{Pattern, PatternNode};
use super::error::{ParseError, leftover_error};
use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, opt, peek, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of};

/// Extra repetitions allowed above the minimum for `*`, `+` and `{n,}`.
pub const UNBOUNDED_EXTRA: u32 = 8;

/// Largest count accepted inside `{...}`.
pub const MAX_REPEAT: u32 = 1000;

/// Parse a pattern expression.
///
/// ```
/// use defgen::parser::parse_pattern;
///
/// let p = parse_pattern("a|b").unwrap();
/// assert_eq!(p.alternatives.len(), 2);
/// assert!(parse_pattern("[a-").is_err());
/// ```
pub fn parse_pattern(input: &str) -> Result<Pattern, ParseError> {
    let mut remaining = input;
    match alternation(&mut remaining) {
        Ok(alternatives) if remaining.is_empty() => {
            let pattern = Pattern {
                source: input.to_string(),
                alternatives,
            };
            if pattern.can_match() {
                Ok(pattern)
            } else {
                Err(ParseError::Syntax {
                    line: 1,
                    column: 1,
                    message: "character class matches nothing".to_string(),
                })
            }
        }
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
            format!("parse error: {e}"),
        )),
    }
}

/// `seq ('|' seq)*`
fn alternation(input: &mut &str) -> ModalResult<Vec<Vec<PatternNode>>> {
    separated(1.., sequence, '|').parse_next(input)
}

fn sequence(input: &mut &str) -> ModalResult<Vec<PatternNode>> {
    repeat(0.., quantified).parse_next(input)
}

/// An atom with an optional quantifier.
fn quantified(input: &mut &str) -> ModalResult<PatternNode> {
    let node = atom(input)?;
    let bounds = opt(quantifier).parse_next(input)?;
    Ok(match bounds {
        Some((min, max)) => PatternNode::Repeat {
            node: Box::new(node),
            min,
            max,
        },
        None => node,
    })
}

/// `*`, `+`, `?` or a braced count, optionally followed by a lazy `?`.
fn quantifier(input: &mut &str) -> ModalResult<(u32, u32)> {
    let bounds = alt((
        '*'.value((0, UNBOUNDED_EXTRA)),
        '+'.value((1, 1 + UNBOUNDED_EXTRA)),
        '?'.value((0, 1)),
        braced_count,
    ))
    .parse_next(input)?;
    opt('?').void().parse_next(input)?;
    Ok(bounds)
}

/// `{n}`, `{n,}` or `{n,m}` with `n <= m <= MAX_REPEAT`.
///
/// A `{` not followed by a digit is left for the literal parser. Once digits
/// follow, the count must be well formed.
fn braced_count(input: &mut &str) -> ModalResult<(u32, u32)> {
    preceded(
        ('{', peek(digit1)),
        cut_err(
            terminated((count, opt(preceded(',', opt(count)))), '}').verify_map(
                |(min, tail)| {
                    let max = match tail {
                        None => min,
                        Some(None) => min + UNBOUNDED_EXTRA,
                        Some(Some(max)) => max,
                    };
                    (min <= max).then_some((min, max))
                },
            ),
        ),
    )
    .parse_next(input)
}

fn count(input: &mut &str) -> ModalResult<u32> {
    digit1
        .parse_to()
        .verify(|n: &u32| *n <= MAX_REPEAT)
        .parse_next(input)
}

fn atom(input: &mut &str) -> ModalResult<PatternNode> {
    alt((
        group,
        class,
        escape,
        '.'.map(|_| PatternNode::Set(printable_ascii().collect())),
        one_of(['^', '$']).value(PatternNode::Anchor),
        literal,
    ))
    .parse_next(input)
}

/// `( ... )` or `(?: ... )`.
fn group(input: &mut &str) -> ModalResult<PatternNode> {
    preceded(
        ('(', opt("?:")),
        cut_err(terminated(alternation, ')')),
    )
    .map(PatternNode::Group)
    .parse_next(input)
}

/// `[...]` or `[^...]`.
fn class(input: &mut &str) -> ModalResult<PatternNode> {
    preceded(
        '[',
        cut_err(terminated((opt('^'), repeat(1.., class_item)), ']')),
    )
    .map(|(negated, items): (Option<char>, Vec<Vec<char>>)| {
        let mut chars: Vec<char> = items.into_iter().flatten().collect();
        chars.sort_unstable();
        chars.dedup();
        if negated.is_some() {
            PatternNode::Set(printable_ascii().filter(|c| !chars.contains(c)).collect())
        } else {
            PatternNode::Set(chars)
        }
    })
    .parse_next(input)
}

fn class_item(input: &mut &str) -> ModalResult<Vec<char>> {
    alt((preceded('\\', any).verify_map(shorthand_set), class_range)).parse_next(input)
}

/// `a` or `a-z`. A reversed range yields no characters.
fn class_range(input: &mut &str) -> ModalResult<Vec<char>> {
    (class_char, opt(preceded('-', class_char)))
        .map(|(lo, hi)| match hi {
            Some(hi) => (lo..=hi).collect(),
            None => vec![lo],
        })
        .parse_next(input)
}

fn class_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', any).map(unescape), none_of([']', '\\']))).parse_next(input)
}

fn escape(input: &mut &str) -> ModalResult<PatternNode> {
    preceded('\\', any)
        .map(|c| {
            shorthand_set(c).map_or_else(|| PatternNode::Literal(unescape(c)), PatternNode::Set)
        })
        .parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<PatternNode> {
    none_of(['(', ')', '[', '|', '\\', '.', '*', '+', '?', '^', '$'])
        .map(PatternNode::Literal)
        .parse_next(input)
}

/// Characters for `\d`, `\w`, `\s` and their negations.
fn shorthand_set(c: char) -> Option<Vec<char>> {
    let digit = |ch: &char| ch.is_ascii_digit();
    let word = |ch: &char| ch.is_ascii_alphanumeric() || *ch == '_';
    let space = |ch: &char| *ch == ' ' || *ch == '\t';
    let set = match c {
        'd' => printable_ascii().filter(digit).collect(),
        'w' => printable_ascii().filter(word).collect(),
        's' => vec![' ', '\t'],
        'D' => printable_ascii().filter(|ch| !digit(ch)).collect(),
        'W' => printable_ascii().filter(|ch| !word(ch)).collect(),
        'S' => printable_ascii().filter(|ch| !space(ch)).collect(),
        _ => return None,
    };
    Some(set)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

/// The universe for `.` and negated sets.
fn printable_ascii() -> impl Iterator<Item = char> {
    ' '..='~'
}
