use std::sync::Arc;

use rand::RngCore;

use crate::combinators::elements;
use crate::parser::{Segment, Template, parse_template};
use crate::store::{Definitions, GenError};
use crate::types::{DefinitionValue, PoolEntry, Value};

/// A formatter bound to a definition name.
///
/// When the definition is a list of templates, one is chosen uniformly with
/// the supplied engine, compiled, and rendered against the value. When it is
/// a formatting function, the function is called with the value directly.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use defgen::{Definitions, DefinitionValue, Value};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let defs = Arc::new(Definitions::new());
/// defs.insert("en", "greeting", DefinitionValue::pool(["Hello {{x}}"]));
///
/// let greeting = defs.formater("greeting");
/// let mut engine = StdRng::seed_from_u64(3);
/// let text = greeting
///     .format(&Value::map([("x", "Sam")]), "en", &mut engine)
///     .unwrap();
/// assert_eq!(text, "Hello Sam");
/// ```
#[derive(Clone)]
pub struct Formatter {
    store: Arc<Definitions>,
    name: String,
}

impl Formatter {
    pub(crate) fn new(store: Arc<Definitions>, name: String) -> Self {
        Self { store, name }
    }

    /// The bound definition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turn `result` into its presentation for `locale`.
    pub fn format(
        &self,
        result: &Value,
        locale: &str,
        engine: &mut dyn RngCore,
    ) -> Result<String, GenError> {
        match self.store.get(&self.name, locale)? {
            Some(DefinitionValue::Format(f)) => Ok(f(result)),
            Some(DefinitionValue::Pool(entries)) => {
                let templates = self.template_sources(&entries, locale)?;
                let chosen = elements(templates).run(engine, locale)?;
                let template = parse_template(&chosen).map_err(|error| GenError::Template {
                    template: chosen,
                    error,
                })?;
                render_template(&template, result)
            }
            None => Err(self.malformed(locale, "definition not found")),
        }
    }

    fn template_sources(
        &self,
        entries: &[PoolEntry],
        locale: &str,
    ) -> Result<Vec<String>, GenError> {
        entries
            .iter()
            .map(|entry| {
                entry
                    .as_template()
                    .map(str::to_string)
                    .ok_or_else(|| self.malformed(locale, "entries must be template strings"))
            })
            .collect()
    }

    fn malformed(&self, locale: &str, reason: &str) -> GenError {
        GenError::MalformedFormat {
            name: self.name.clone(),
            locale: locale.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Render a compiled template against `data`.
///
/// Field paths walk nested maps; `{{ . }}` renders `data` itself.
pub fn render_template(template: &Template, data: &Value) -> Result<String, GenError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Field(path) => {
                let value = data.get_path(path).ok_or_else(|| GenError::MissingField {
                    field: path.join("."),
                })?;
                output.push_str(&value.to_string());
            }
        }
    }
    Ok(output)
}
