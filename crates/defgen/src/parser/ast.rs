//! Public AST types for interpolation templates and pattern expressions.
//!
//! These types are public so tooling can inspect compiled definitions.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A compiled interpolation template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text (no interpolation).
    Literal(String),
    /// A placeholder: `{{ name }}`, `{{ address.city }}`, or `{{ . }}`.
    ///
    /// The path is empty for `{{ . }}`, which renders the whole value.
    Field(Vec<String>),
}

/// A parsed pattern expression.
///
/// Keeps the source text alongside the tree so a pattern can be displayed
/// and compared the way it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub source: String,
    /// Top-level alternatives; one is chosen uniformly per draw.
    pub alternatives: Vec<Vec<PatternNode>>,
}

impl Pattern {
    /// Returns true if at least one top-level alternative can produce a string.
    pub fn can_match(&self) -> bool {
        self.alternatives.iter().any(|sequence| sequence_can_match(sequence))
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "/{}/", self.source)
    }
}

/// A single element of a pattern sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternNode {
    /// A literal character.
    Literal(char),
    /// A set of candidate characters (`.`, `[a-z]`, `\d`, ...).
    Set(Vec<char>),
    /// A parenthesized group of alternatives.
    Group(Vec<Vec<PatternNode>>),
    /// A quantified node, repeated between `min` and `max` times inclusive.
    Repeat {
        node: Box<PatternNode>,
        min: u32,
        max: u32,
    },
    /// `^` or `$`. Produces no output.
    Anchor,
}

impl PatternNode {
    /// Returns false if no string can match this node, as with an empty
    /// character class that must appear at least once.
    pub fn can_match(&self) -> bool {
        match self {
            PatternNode::Set(chars) => !chars.is_empty(),
            PatternNode::Group(alternatives) => alternatives
                .iter()
                .any(|sequence| sequence_can_match(sequence)),
            PatternNode::Repeat { node, min, .. } => *min == 0 || node.can_match(),
            PatternNode::Literal(_) | PatternNode::Anchor => true,
        }
    }
}

/// A sequence matches only if every node in it can.
pub(crate) fn sequence_can_match(sequence: &[PatternNode]) -> bool {
    sequence.iter().all(PatternNode::can_match)
}
