mod definition;
mod locale;
mod value;

pub use definition::{DefinitionNode, DefinitionValue, FormatFn, PoolEntry};
pub use locale::{DEFAULT_LOCALE, LocaleRegistry, normalize_locale};
pub use value::Value;
