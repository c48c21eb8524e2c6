//! The definition store: per-locale definition trees with bucket fallback.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bon::Builder;
use tracing::{debug, trace};

use crate::binder::{Arbitrary, Formatter};
use crate::store::error::{GenError, LoadError};
use crate::store::load::{parse_bucket, parse_data_table, read_data_file};
use crate::types::{
    DEFAULT_LOCALE, DefinitionNode, DefinitionValue, LocaleRegistry, Value, normalize_locale,
};

/// Locale-keyed definition repository.
///
/// Each locale bucket is a tree of groups whose leaves are definition values,
/// addressed by dotted names such as `"name.first"`. Lookups fall back to the
/// default locale's bucket only when the requested bucket is missing
/// entirely; a bucket that exists but lacks the name reports it as absent.
///
/// The repository sits behind a lock so binders can share the store through
/// an `Arc` while buckets are reloaded. Every lookup reads the current data.
///
/// # Example
///
/// ```
/// use defgen::{Definitions, DefinitionValue};
///
/// let defs = Definitions::builder().build();
/// defs.insert("en", "name.first", DefinitionValue::pool(["Sam", "Alex"]));
/// defs.insert("fr", "name.last", DefinitionValue::pool(["Martin"]));
///
/// assert!(defs.get("name.first", "en").unwrap().is_some());
/// // `fr` exists, so there is no fallback to `en` for a missing name.
/// assert!(defs.get("name.first", "fr").unwrap().is_none());
/// // `de` has no bucket, so the `en` bucket answers.
/// assert!(defs.get("name.first", "de").unwrap().is_some());
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Definitions {
    /// Locale used by [`Definitions::get_default`] and as the fallback bucket.
    #[builder(default = DEFAULT_LOCALE.to_string())]
    default_locale: String,

    /// The supported locale tags. Lookups with any other tag fail.
    #[builder(default)]
    registry: LocaleRegistry,

    /// Normalized locale -> definition tree.
    #[builder(skip)]
    buckets: RwLock<BTreeMap<String, DefinitionNode>>,

    /// File the data was last loaded from, for `reload_file`.
    #[builder(skip)]
    loaded_path: RwLock<Option<PathBuf>>,
}

impl Default for Definitions {
    fn default() -> Self {
        Definitions::builder().build()
    }
}

impl Definitions {
    /// Create a store with default settings (`en`, builtin registry).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with default settings and load a JSON data table.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let defs = Self::new();
        defs.load_json_str(json)?;
        Ok(defs)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The default locale tag.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The supported-locale registry.
    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve `name` for `locale`.
    ///
    /// `locale` must be in the registry as spelled. It is then normalized
    /// (`-` to `_`) to pick a bucket; if no such bucket exists the default
    /// locale's bucket is used. Returns `Ok(None)` when the name is absent
    /// from the chosen bucket.
    pub fn get(&self, name: &str, locale: &str) -> Result<Option<DefinitionValue>, GenError> {
        self.check_locale(locale)?;
        let buckets = self.read_buckets();
        let value = self
            .select_bucket(&buckets, locale)
            .and_then(|bucket| bucket.lookup(name))
            .cloned();
        trace!(name, locale, found = value.is_some(), "resolved definition");
        Ok(value)
    }

    /// Resolve `name` in the default locale.
    pub fn get_default(&self, name: &str) -> Result<Option<DefinitionValue>, GenError> {
        self.get(name, &self.default_locale)
    }

    /// Names defined in the bucket `locale` resolves to, for suggestions.
    pub(crate) fn names_for(&self, locale: &str) -> Vec<String> {
        let buckets = self.read_buckets();
        self.select_bucket(&buckets, locale)
            .map(DefinitionNode::names)
            .unwrap_or_default()
    }

    fn check_locale(&self, locale: &str) -> Result<(), GenError> {
        if self.registry.contains(locale) {
            Ok(())
        } else {
            Err(GenError::UnsupportedLocale {
                locale: locale.to_string(),
            })
        }
    }

    /// Pick the bucket for `locale`, falling back to the default locale's
    /// bucket when it does not exist.
    fn select_bucket<'a>(
        &self,
        buckets: &'a BTreeMap<String, DefinitionNode>,
        locale: &str,
    ) -> Option<&'a DefinitionNode> {
        if let Some(bucket) = buckets.get(&normalize_locale(locale)) {
            return Some(bucket);
        }
        let fallback = normalize_locale(&self.default_locale);
        debug!(locale, fallback, "locale bucket missing, using default bucket");
        buckets.get(&fallback)
    }

    // =========================================================================
    // Binders
    // =========================================================================

    /// Bind a generator to `name`. Nothing is looked up until it is run.
    pub fn arbitrary(self: &Arc<Self>, name: impl Into<String>) -> Arbitrary {
        Arbitrary::new(Arc::clone(self), name.into())
    }

    /// Bind a formatter to `name`. Nothing is looked up until it is run.
    pub fn formater(self: &Arc<Self>, name: impl Into<String>) -> Formatter {
        Formatter::new(Arc::clone(self), name.into())
    }

    // =========================================================================
    // Registration and loading
    // =========================================================================

    /// Place a definition at `name` in `locale`'s bucket, replacing any
    /// existing value at that path.
    pub fn insert(&self, locale: &str, name: &str, value: DefinitionValue) {
        self.write_buckets()
            .entry(normalize_locale(locale))
            .or_insert_with(DefinitionNode::group)
            .insert(name, value);
    }

    /// Register a callable formatting payload.
    pub fn insert_formatter(
        &self,
        locale: &str,
        name: &str,
        f: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) {
        self.insert(locale, name, DefinitionValue::format(f));
    }

    /// Load a JSON data table keyed by locale.
    ///
    /// Every locale present in the table replaces its bucket wholesale;
    /// other buckets are untouched. Returns the number of definitions loaded.
    ///
    /// ```
    /// use defgen::Definitions;
    ///
    /// let defs = Definitions::new();
    /// let count = defs.load_json_str(r#"{
    ///     "en": { "color": ["red", "blue"], "code": [{ "pattern": "[A-Z]{3}" }] }
    /// }"#).unwrap();
    /// assert_eq!(count, 2);
    /// ```
    pub fn load_json_str(&self, json: &str) -> Result<usize, LoadError> {
        let table = parse_data_table(json, "<string>")?;
        *self.write_path() = None;
        Ok(self.replace_buckets(table))
    }

    /// Load a JSON object of definitions into one locale bucket, replacing it.
    pub fn load_locale_json_str(&self, locale: &str, json: &str) -> Result<usize, LoadError> {
        let key = normalize_locale(locale);
        let bucket = parse_bucket(json, &key, &format!("<{locale}>"))?;
        Ok(self.replace_buckets(BTreeMap::from([(key, bucket)])))
    }

    /// Load a JSON data table from a file. The path is kept for
    /// [`Definitions::reload_file`].
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let table = read_data_file(path)?;
        let count = self.replace_buckets(table);
        *self.write_path() = Some(path.to_path_buf());
        Ok(count)
    }

    /// Re-read the file last passed to [`Definitions::load_file`].
    pub fn reload_file(&self) -> Result<usize, LoadError> {
        let path = self
            .loaded_path
            .read()
            .expect("definition path lock poisoned")
            .clone()
            .ok_or(LoadError::NoPathForReload)?;
        self.load_file(path)
    }

    fn replace_buckets(&self, table: BTreeMap<String, DefinitionNode>) -> usize {
        let mut buckets = self.write_buckets();
        let mut count = 0;
        for (locale, bucket) in table {
            let loaded = bucket.len();
            debug!(locale, definitions = loaded, "loaded locale bucket");
            count += loaded;
            buckets.insert(locale, bucket);
        }
        count
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Normalized keys of all loaded buckets, sorted.
    pub fn locales(&self) -> Vec<String> {
        self.read_buckets().keys().cloned().collect()
    }

    /// Definition names in `locale`'s own bucket (no fallback), sorted.
    pub fn names(&self, locale: &str) -> Vec<String> {
        self.read_buckets()
            .get(&normalize_locale(locale))
            .map(DefinitionNode::names)
            .unwrap_or_default()
    }

    /// Kind label per definition name in `locale`'s own bucket.
    pub(crate) fn kinds(&self, locale: &str) -> BTreeMap<String, &'static str> {
        self.read_buckets()
            .get(&normalize_locale(locale))
            .map(|bucket| {
                bucket
                    .entries()
                    .into_iter()
                    .map(|(name, value)| (name, value.kind()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn read_buckets(&self) -> RwLockReadGuard<'_, BTreeMap<String, DefinitionNode>> {
        self.buckets.read().expect("definition table lock poisoned")
    }

    fn write_buckets(&self) -> RwLockWriteGuard<'_, BTreeMap<String, DefinitionNode>> {
        self.buckets.write().expect("definition table lock poisoned")
    }

    fn write_path(&self) -> RwLockWriteGuard<'_, Option<PathBuf>> {
        self.loaded_path.write().expect("definition path lock poisoned")
    }
}
