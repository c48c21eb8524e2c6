//! JSON data-table loading.
//!
//! A data table maps locale tags to definition trees. Arrays are pools;
//! objects are groups; inside a pool, an object with a single `pattern` key
//! is a pattern expression and anything else is a literal value.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::parser::parse_pattern;
use crate::store::error::LoadError;
use crate::types::{DefinitionNode, DefinitionValue, PoolEntry, Value, normalize_locale};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Pool(Vec<RawEntry>),
    Group(BTreeMap<String, RawNode>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Pattern(RawPattern),
    Literal(Value),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPattern {
    pattern: String,
}

/// Parse a full data table; bucket keys come back normalized.
pub(crate) fn parse_data_table(
    json: &str,
    origin: &str,
) -> Result<BTreeMap<String, DefinitionNode>, LoadError> {
    let raw: BTreeMap<String, BTreeMap<String, RawNode>> =
        serde_json::from_str(json).map_err(|e| json_error(origin, &e))?;
    raw.into_iter()
        .map(|(locale, children)| {
            let key = normalize_locale(&locale);
            let bucket = build_group(&key, "", children)?;
            Ok((key, bucket))
        })
        .collect()
}

/// Parse the definitions of a single locale bucket.
pub(crate) fn parse_bucket(
    json: &str,
    locale: &str,
    origin: &str,
) -> Result<DefinitionNode, LoadError> {
    let raw: BTreeMap<String, RawNode> =
        serde_json::from_str(json).map_err(|e| json_error(origin, &e))?;
    build_group(locale, "", raw)
}

/// Read and parse a data table file.
pub(crate) fn read_data_file(path: &Path) -> Result<BTreeMap<String, DefinitionNode>, LoadError> {
    let content = read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_data_table(&content, &path.display().to_string())
}

fn json_error(origin: &str, e: &serde_json::Error) -> LoadError {
    LoadError::Json {
        origin: origin.to_string(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    }
}

fn build_group(
    locale: &str,
    prefix: &str,
    children: BTreeMap<String, RawNode>,
) -> Result<DefinitionNode, LoadError> {
    let mut group = BTreeMap::new();
    for (key, child) in children {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let node = match child {
            RawNode::Group(grandchildren) => build_group(locale, &name, grandchildren)?,
            RawNode::Pool(entries) => DefinitionNode::Value(build_pool(locale, &name, entries)?),
        };
        group.insert(key, node);
    }
    Ok(DefinitionNode::Group(group))
}

fn build_pool(
    locale: &str,
    name: &str,
    entries: Vec<RawEntry>,
) -> Result<DefinitionValue, LoadError> {
    let pool = entries
        .into_iter()
        .map(|entry| match entry {
            RawEntry::Literal(value) => Ok(PoolEntry::Literal(value)),
            RawEntry::Pattern(RawPattern { pattern }) => parse_pattern(&pattern)
                .map(PoolEntry::Pattern)
                .map_err(|error| LoadError::Pattern {
                    locale: locale.to_string(),
                    name: name.to_string(),
                    source_text: pattern.clone(),
                    error,
                }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DefinitionValue::Pool(pool))
}
