use std::sync::Arc;

use rand::RngCore;
use tracing::trace;

use crate::binder::Formatter;
use crate::combinators::{Gen, elements, regex};
use crate::store::{Definitions, GenError, compute_suggestions};
use crate::types::{DefinitionValue, PoolEntry, Value};

/// A generator bound to a definition name.
///
/// Each realization resolves the definition for the requested locale,
/// replaces every pattern entry with one synthesized string, and picks one
/// element of the resulting pool uniformly.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use defgen::{Definitions, DefinitionValue, PoolEntry};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let defs = Arc::new(Definitions::new());
/// defs.insert("en", "code", DefinitionValue::Pool(vec![PoolEntry::pattern("a|b").unwrap()]));
///
/// let code = defs.arbitrary("code");
/// let mut engine = StdRng::seed_from_u64(1);
/// let value = code.generate(&mut engine, "en").unwrap();
/// assert!(value == "a".into() || value == "b".into());
/// ```
#[derive(Clone)]
pub struct Arbitrary {
    store: Arc<Definitions>,
    name: String,
}

impl Arbitrary {
    pub(crate) fn new(store: Arc<Definitions>, name: String) -> Self {
        Self { store, name }
    }

    /// The bound definition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A generator over the stored definition.
    pub fn make_gen(&self) -> Gen<Value> {
        self.make_gen_with(None)
    }

    /// A generator over `pool` when given, or over the stored definition.
    ///
    /// A supplied pool is used exactly as-is, without any locale lookup;
    /// `Some(vec![])` is an empty pool and fails with
    /// [`GenError::EmptyPool`] when run.
    pub fn make_gen_with(&self, pool: Option<Vec<PoolEntry>>) -> Gen<Value> {
        let store = Arc::clone(&self.store);
        let name = self.name.clone();
        Gen::new(move |engine, locale| {
            let pool = match &pool {
                Some(pool) => pool.clone(),
                None => resolve_pool(&store, &name, locale)?,
            };
            let concrete = normalize_pool(pool, engine, locale)?;
            elements(concrete).run(engine, locale)
        })
    }

    /// Draw one value from the stored definition.
    pub fn generate(&self, engine: &mut dyn RngCore, locale: &str) -> Result<Value, GenError> {
        self.make_gen().run(engine, locale)
    }

    /// A generator that draws a value and passes it through `formatter`,
    /// threading the same engine and locale through both steps.
    pub fn formatted(&self, formatter: &Formatter) -> Gen<String> {
        let formatter = formatter.clone();
        self.make_gen()
            .and_then(move |value, engine, locale| formatter.format(&value, locale, engine))
    }
}

/// Fetch the pool for `name`, failing if it is absent or not a pool.
fn resolve_pool(
    store: &Definitions,
    name: &str,
    locale: &str,
) -> Result<Vec<PoolEntry>, GenError> {
    match store.get(name, locale)? {
        Some(DefinitionValue::Pool(pool)) => Ok(pool),
        Some(DefinitionValue::Format(_)) => Err(GenError::NotAPool {
            name: name.to_string(),
            locale: locale.to_string(),
        }),
        None => Err(GenError::MissingDefinition {
            name: name.to_string(),
            locale: locale.to_string(),
            suggestions: compute_suggestions(name, &store.names_for(locale)),
        }),
    }
}

/// Replace every pattern entry with one concrete string, in pool order.
fn normalize_pool(
    pool: Vec<PoolEntry>,
    engine: &mut dyn RngCore,
    locale: &str,
) -> Result<Vec<Value>, GenError> {
    let concrete = pool
        .into_iter()
        .map(|entry| match entry {
            PoolEntry::Literal(value) => Ok(value),
            PoolEntry::Pattern(pattern) => regex(pattern).run(engine, locale).map(Value::String),
        })
        .collect::<Result<Vec<_>, _>>()?;
    trace!(entries = concrete.len(), "normalized pool");
    Ok(concrete)
}
