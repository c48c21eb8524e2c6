//! Locale tags and the supported-locale registry.

/// The locale used when a caller does not name one, and the bucket every
/// missing locale bucket falls back to.
pub const DEFAULT_LOCALE: &str = "en";

/// Locale tags shipped with [`LocaleRegistry::builtin`].
const BUILTIN_TAGS: &[&str] = &[
    "en",
    "en-AU",
    "en-CA",
    "en-GB",
    "en-IE",
    "en-IN",
    "en-US",
    "de",
    "de-AT",
    "de-CH",
    "es",
    "es-MX",
    "fr",
    "fr-CA",
    "fr-CH",
    "it",
    "ja",
    "ko",
    "nl",
    "nl-BE",
    "pl",
    "pt",
    "pt-BR",
    "ru",
    "sv",
    "tr",
    "uk",
    "vi",
    "zh-Hans-CN",
    "zh-Hant-TW",
];

/// Normalize a locale tag into its repository bucket key (`-` becomes `_`).
///
/// ```
/// use defgen::normalize_locale;
///
/// assert_eq!(normalize_locale("zh-Hant-TW"), "zh_Hant_TW");
/// assert_eq!(normalize_locale("en"), "en");
/// ```
pub fn normalize_locale(tag: &str) -> String {
    tag.replace('-', "_")
}

/// The fixed, ordered set of locale tags a store accepts.
///
/// Membership is an exact string match. Tags are not normalized on the way
/// in, so a registry that should accept both `pt-BR` and `pt_BR` must list
/// both (see [`LocaleRegistry::with_underscore_aliases`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    tags: Vec<String>,
}

impl LocaleRegistry {
    /// Create a registry from an ordered list of tags. Duplicates are dropped.
    pub fn new<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        let mut registry = Self { tags: Vec::new() };
        for tag in tags {
            registry.push(tag.into());
        }
        registry
    }

    /// The registry shipped with the crate, accepting hyphen and underscore
    /// spellings of every tag.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TAGS.iter().copied()).with_underscore_aliases()
    }

    /// Add the underscore spelling of every hyphenated tag.
    pub fn with_underscore_aliases(mut self) -> Self {
        let aliases: Vec<String> = self
            .tags
            .iter()
            .filter(|tag| tag.contains('-'))
            .map(|tag| normalize_locale(tag))
            .collect();
        for alias in aliases {
            self.push(alias);
        }
        self
    }

    /// Check whether `tag` is a supported locale, exactly as spelled.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether any spelling of `tag` normalizes to `bucket`.
    pub fn contains_bucket(&self, bucket: &str) -> bool {
        self.tags.iter().any(|t| normalize_locale(t) == bucket)
    }

    /// Iterate over the registered tags in order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no tags are registered.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn push(&mut self, tag: String) {
        if !self.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
