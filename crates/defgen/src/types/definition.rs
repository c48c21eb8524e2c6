use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::parser::{ParseError, Pattern, parse_pattern};
use crate::types::Value;

/// A custom formatting function: takes a generated value, returns its text.
pub type FormatFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// One element of a definition pool.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolEntry {
    /// A value used as-is.
    Literal(Value),
    /// A pattern synthesized into a fresh string on every draw.
    Pattern(Pattern),
}

impl PoolEntry {
    /// Create a pattern entry, parsing `source` now.
    pub fn pattern(source: &str) -> Result<Self, ParseError> {
        parse_pattern(source).map(PoolEntry::Pattern)
    }

    /// Create a literal entry.
    pub fn literal(value: impl Into<Value>) -> Self {
        PoolEntry::Literal(value.into())
    }

    /// Returns the literal template text of this entry, if it is a string.
    pub fn as_template(&self) -> Option<&str> {
        match self {
            PoolEntry::Literal(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for PoolEntry {
    fn from(value: Value) -> Self {
        PoolEntry::Literal(value)
    }
}

impl From<Pattern> for PoolEntry {
    fn from(pattern: Pattern) -> Self {
        PoolEntry::Pattern(pattern)
    }
}

impl From<&str> for PoolEntry {
    fn from(s: &str) -> Self {
        PoolEntry::Literal(s.into())
    }
}

impl From<String> for PoolEntry {
    fn from(s: String) -> Self {
        PoolEntry::Literal(s.into())
    }
}

impl From<i32> for PoolEntry {
    fn from(n: i32) -> Self {
        PoolEntry::Literal(n.into())
    }
}

impl From<i64> for PoolEntry {
    fn from(n: i64) -> Self {
        PoolEntry::Literal(n.into())
    }
}

/// The value a definition name resolves to within one locale bucket.
///
/// A pool doubles as a list of templates when it is consumed by a
/// formatter; the consumer decides how to read it.
#[derive(Clone)]
pub enum DefinitionValue {
    /// An ordered pool of literals and patterns.
    Pool(Vec<PoolEntry>),
    /// A callable formatting payload.
    Format(FormatFn),
}

impl DefinitionValue {
    /// Build a pool from anything convertible to entries.
    pub fn pool<E: Into<PoolEntry>>(entries: impl IntoIterator<Item = E>) -> Self {
        DefinitionValue::Pool(entries.into_iter().map(Into::into).collect())
    }

    /// Wrap a formatting closure.
    pub fn format(f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        DefinitionValue::Format(Arc::new(f))
    }

    /// Short label for messages and validation.
    pub fn kind(&self) -> &'static str {
        match self {
            DefinitionValue::Pool(_) => "pool",
            DefinitionValue::Format(_) => "formatter",
        }
    }
}

impl Debug for DefinitionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DefinitionValue::Pool(entries) => f.debug_tuple("Pool").field(entries).finish(),
            DefinitionValue::Format(_) => f.write_str("Format(<fn>)"),
        }
    }
}

/// A node in a locale bucket: either a named group or a definition.
#[derive(Debug, Clone)]
pub enum DefinitionNode {
    Group(BTreeMap<String, DefinitionNode>),
    Value(DefinitionValue),
}

impl DefinitionNode {
    /// An empty group, the shape of a fresh locale bucket.
    pub fn group() -> Self {
        DefinitionNode::Group(BTreeMap::new())
    }

    /// Follow a dotted path. Any missing segment yields `None`, as does a
    /// path that runs through a definition or stops at a group.
    pub fn lookup(&self, name: &str) -> Option<&DefinitionValue> {
        let node = name.split('.').try_fold(self, |node, segment| match node {
            DefinitionNode::Group(children) => children.get(segment),
            DefinitionNode::Value(_) => None,
        })?;
        match node {
            DefinitionNode::Value(value) => Some(value),
            DefinitionNode::Group(_) => None,
        }
    }

    /// Place `value` at a dotted path, replacing whatever was there and
    /// creating groups on the way.
    pub fn insert(&mut self, name: &str, value: DefinitionValue) {
        if let DefinitionNode::Value(_) = self {
            *self = DefinitionNode::group();
        }
        let DefinitionNode::Group(children) = self else {
            return;
        };
        match name.split_once('.') {
            Some((head, rest)) => children
                .entry(head.to_string())
                .or_insert_with(DefinitionNode::group)
                .insert(rest, value),
            None => {
                children.insert(name.to_string(), DefinitionNode::Value(value));
            }
        }
    }

    /// All definition names below this node, dotted and sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }

    /// Flattened `(name, value)` pairs below this node, sorted by name.
    pub fn entries(&self) -> Vec<(String, &DefinitionValue)> {
        let mut entries = self.entries_with_prefix("");
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Number of definitions below this node.
    pub fn len(&self) -> usize {
        match self {
            DefinitionNode::Group(children) => children.values().map(DefinitionNode::len).sum(),
            DefinitionNode::Value(_) => 1,
        }
    }

    /// Returns true if no definitions live below this node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries_with_prefix<'a>(&'a self, prefix: &str) -> Vec<(String, &'a DefinitionValue)> {
        match self {
            DefinitionNode::Value(value) => vec![(prefix.to_string(), value)],
            DefinitionNode::Group(children) => children
                .iter()
                .flat_map(|(key, child)| {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.entries_with_prefix(&path)
                })
                .collect(),
        }
    }
}
