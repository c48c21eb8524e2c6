//! Definition store: locale-keyed definition data, loading and validation.
//!
//! The store resolves `(name, locale)` pairs with bucket-level fallback to
//! the default locale. It holds no randomness; binders draw from it.

mod definitions;
mod error;
mod load;
mod validate;

pub use definitions::Definitions;
pub use error::{GenError, LoadError, LoadWarning, compute_suggestions};
pub use validate::Coverage;
