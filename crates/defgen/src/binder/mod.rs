//! Binders that turn definition names into generators and formatters.
//!
//! Binding is cheap and never touches the store. The store is consulted each
//! time a bound generator or formatter runs, with the engine and locale of
//! that run.

mod arbitrary;
mod formatter;

pub use arbitrary::Arbitrary;
pub use formatter::{Formatter, render_template};
