//! Locale-aware definition store with random value generators and
//! template formatters.
//!
//! A [`Definitions`] store maps locale tags to trees of named definitions.
//! [`Definitions::arbitrary`] binds a name to a generator that draws one
//! element of the definition's pool; [`Definitions::formater`] binds a name
//! to a formatter that renders a generated value through one of the
//! locale's templates.

pub mod binder;
pub mod combinators;
pub mod parser;
pub mod store;
pub mod types;

pub use binder::{Arbitrary, Formatter};
pub use combinators::Gen;
pub use store::{Coverage, Definitions, GenError, LoadError, LoadWarning, compute_suggestions};
pub use types::{
    DEFAULT_LOCALE, DefinitionNode, DefinitionValue, FormatFn, LocaleRegistry, PoolEntry, Value,
    normalize_locale,
};

/// Creates a [`Value::Map`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so strings, integers, floats and
/// nested values can be mixed.
///
/// # Example
///
/// ```
/// use defgen::{record, Value};
///
/// let r = record! { "x" => "Sam", "age" => 3 };
/// assert_eq!(r.get_path(&["x"]).and_then(Value::as_str), Some("Sam"));
/// assert_eq!(r.get_path(&["age"]).and_then(Value::as_number), Some(3));
/// ```
#[macro_export]
macro_rules! record {
    {} => {
        $crate::Value::Map(::std::collections::BTreeMap::new())
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            $crate::Value::Map(map)
        }
    };
}
