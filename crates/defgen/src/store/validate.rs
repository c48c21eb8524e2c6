//! Cross-locale validation and coverage reporting.

use serde::Serialize;

use crate::store::Definitions;
use crate::store::error::LoadWarning;
use crate::types::normalize_locale;

/// How much of a source locale's definitions a target locale provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Target locale bucket key.
    pub locale: String,
    /// Source definitions the target also defines.
    pub translated: usize,
    /// Definitions in the source locale.
    pub total: usize,
    /// Source definitions the target lacks, sorted.
    pub missing: Vec<String>,
}

impl Coverage {
    /// Returns true if nothing is missing.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl Definitions {
    /// Compare `target`'s bucket against `source`'s bucket.
    ///
    /// Reports names only the target defines, names whose kind differs
    /// between the two, and a target bucket no registered tag maps to.
    /// Returns no warnings if the source bucket is not loaded.
    ///
    /// ```
    /// use defgen::{Definitions, DefinitionValue, LoadWarning};
    ///
    /// let defs = Definitions::new();
    /// defs.insert("en", "color", DefinitionValue::pool(["red"]));
    /// defs.insert("fr", "color", DefinitionValue::pool(["rouge"]));
    /// defs.insert("fr", "extra", DefinitionValue::pool(["x"]));
    ///
    /// let warnings = defs.validate_locale("en", "fr");
    /// assert_eq!(warnings.len(), 1); // "extra" not in source
    /// ```
    pub fn validate_locale(&self, source: &str, target: &str) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();
        let target_key = normalize_locale(target);

        if !self.registry().contains_bucket(&target_key) {
            warnings.push(LoadWarning::UnsupportedBucket {
                locale: target_key.clone(),
            });
        }

        let source_kinds = self.kinds(source);
        if source_kinds.is_empty() {
            return warnings;
        }

        for (name, target_kind) in self.kinds(target) {
            match source_kinds.get(&name) {
                Some(source_kind) if *source_kind != target_kind => {
                    warnings.push(LoadWarning::KindMismatch {
                        name,
                        locale: target_key.clone(),
                        source_kind: (*source_kind).to_string(),
                        target_kind: target_kind.to_string(),
                    });
                }
                Some(_) => {}
                None => warnings.push(LoadWarning::UnknownDefinition {
                    name,
                    locale: target_key.clone(),
                }),
            }
        }

        warnings
    }

    /// Coverage of `target` relative to `source`, counting names in each
    /// locale's own bucket.
    pub fn coverage(&self, source: &str, target: &str) -> Coverage {
        let source_names = self.names(source);
        let target_names = self.names(target);
        let missing: Vec<String> = source_names
            .iter()
            .filter(|name| target_names.binary_search(name).is_err())
            .cloned()
            .collect();
        Coverage {
            locale: normalize_locale(target),
            translated: source_names.len() - missing.len(),
            total: source_names.len(),
            missing,
        }
    }
}
