//! Parsers for interpolation templates and pattern expressions.
//!
//! Both parsers produce public ASTs: templates are rendered by the formatter
//! binder, patterns are synthesized by [`crate::combinators::regex`].

pub mod ast;
pub mod error;
mod pattern;
mod template;

pub use ast::{Pattern, PatternNode, Segment, Template};
pub use error::ParseError;
pub use pattern::{MAX_REPEAT, UNBOUNDED_EXTRA, parse_pattern};
pub use template::parse_template;
