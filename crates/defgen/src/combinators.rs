//! Deferred generators and the primitive combinators built on them.
//!
//! A [`Gen`] is realized by running it with a randomness engine and a
//! locale. It owns no mutable state, so the same generator can be run any
//! number of times and shared across threads; each run draws only from the
//! engine it is given.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::parser::ast::sequence_can_match;
use crate::parser::{Pattern, PatternNode};
use crate::store::GenError;

type GenFn<T> = dyn Fn(&mut dyn RngCore, &str) -> Result<T, GenError> + Send + Sync;

/// A deferred, engine- and locale-parameterized generator.
pub struct Gen<T> {
    run: Arc<GenFn<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Wrap a generation function.
    pub fn new(
        f: impl Fn(&mut dyn RngCore, &str) -> Result<T, GenError> + Send + Sync + 'static,
    ) -> Self {
        Self { run: Arc::new(f) }
    }

    /// Draw one value.
    pub fn run(&self, engine: &mut dyn RngCore, locale: &str) -> Result<T, GenError> {
        (self.run)(engine, locale)
    }

    /// Draw `count` values in sequence from the same engine.
    pub fn sample(
        &self,
        engine: &mut dyn RngCore,
        locale: &str,
        count: usize,
    ) -> Result<Vec<T>, GenError> {
        (0..count).map(|_| self.run(engine, locale)).collect()
    }

    /// Transform every drawn value.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Gen<U> {
        Gen::new(move |engine, locale| self.run(engine, locale).map(&f))
    }

    /// Feed every drawn value to a second step that may draw again from the
    /// same engine and locale.
    pub fn and_then<U: 'static>(
        self,
        f: impl Fn(T, &mut dyn RngCore, &str) -> Result<U, GenError> + Send + Sync + 'static,
    ) -> Gen<U> {
        Gen::new(move |engine, locale| {
            let value = self.run(engine, locale)?;
            f(value, engine, locale)
        })
    }
}

/// Uniform choice over `pool`.
///
/// Fails with [`GenError::EmptyPool`] when run if `pool` is empty.
///
/// ```
/// use defgen::combinators::elements;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut engine = StdRng::seed_from_u64(7);
/// let color = elements(vec!["red", "blue"]).run(&mut engine, "en").unwrap();
/// assert!(color == "red" || color == "blue");
/// ```
pub fn elements<T: Clone + Send + Sync + 'static>(pool: Vec<T>) -> Gen<T> {
    Gen::new(move |engine, _locale| {
        if pool.is_empty() {
            return Err(GenError::EmptyPool);
        }
        let index = engine.random_range(0..pool.len());
        Ok(pool[index].clone())
    })
}

/// Synthesize strings matching `pattern`. The locale is ignored.
pub fn regex(pattern: Pattern) -> Gen<String> {
    Gen::new(move |engine, _locale| Ok(synthesize(&pattern, engine)))
}

/// Produce one string matching `pattern`, drawing choices from `engine`.
pub fn synthesize(pattern: &Pattern, engine: &mut dyn RngCore) -> String {
    let mut out = String::new();
    write_alternatives(&pattern.alternatives, engine, &mut out);
    out
}

/// Pick uniformly among the alternatives that can produce output.
fn write_alternatives(
    alternatives: &[Vec<PatternNode>],
    engine: &mut dyn RngCore,
    out: &mut String,
) {
    let viable: Vec<&Vec<PatternNode>> = alternatives
        .iter()
        .filter(|sequence| sequence_can_match(sequence))
        .collect();
    if viable.is_empty() {
        return;
    }
    let index = engine.random_range(0..viable.len());
    for node in viable[index] {
        write_node(node, engine, out);
    }
}

fn write_node(node: &PatternNode, engine: &mut dyn RngCore, out: &mut String) {
    match node {
        PatternNode::Literal(c) => out.push(*c),
        PatternNode::Set(chars) => {
            if !chars.is_empty() {
                out.push(chars[engine.random_range(0..chars.len())]);
            }
        }
        PatternNode::Group(alternatives) => write_alternatives(alternatives, engine, out),
        PatternNode::Repeat { node, min, max } => {
            let times = if node.can_match() {
                engine.random_range(*min..=*max)
            } else {
                0
            };
            for _ in 0..times {
                write_node(node, engine, out);
            }
        }
        PatternNode::Anchor => {}
    }
}
