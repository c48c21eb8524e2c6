//! Implementation of the `defgen generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use defgen::{Definitions, GenError, Value, DEFAULT_LOCALE};
use miette::IntoDiagnostic;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::load_definitions;

/// Arguments for the generate command.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// JSON data table
    #[arg(long, env = "DEFGEN_DATA")]
    pub data: PathBuf,

    /// Definition to draw from (dotted for nested groups)
    #[arg(long)]
    pub name: String,

    /// Locale tag to resolve the definition in
    #[arg(long, env = "DEFGEN_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Seed for a replayable run
    #[arg(long, env = "DEFGEN_SEED")]
    pub seed: Option<u64>,

    /// Number of values to draw
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Formatter definition to render each value with
    #[arg(long)]
    pub format: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for generated values.
#[derive(Serialize)]
struct GenerateResult {
    locale: String,
    seed: Option<u64>,
    values: Vec<Value>,
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> miette::Result<i32> {
    let defs = Arc::new(load_definitions(&args.data)?);
    let mut engine = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    debug!(name = %args.name, locale = %args.locale, count = args.count, "generating");

    match draw(&defs, &args, &mut engine) {
        Ok(values) => {
            if args.json {
                let output = GenerateResult {
                    locale: args.locale,
                    seed: args.seed,
                    values,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                for value in values {
                    println!("{value}");
                }
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Generation error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

fn draw(
    defs: &Arc<Definitions>,
    args: &GenerateArgs,
    engine: &mut StdRng,
) -> Result<Vec<Value>, GenError> {
    let arbitrary = defs.arbitrary(args.name.as_str());
    match &args.format {
        Some(format) => {
            let formatter = defs.formater(format.as_str());
            let texts = arbitrary
                .formatted(&formatter)
                .sample(engine, &args.locale, args.count)?;
            Ok(texts.into_iter().map(Value::String).collect())
        }
        None => arbitrary.make_gen().sample(engine, &args.locale, args.count),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;

    fn args(data: PathBuf, format: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            data,
            name: "person".to_string(),
            locale: "en".to_string(),
            seed: Some(7),
            count: 5,
            format: format.map(str::to_string),
            json: false,
        }
    }

    fn data_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("data.json");
        write(
            &path,
            r#"{ "en": {
                "person": [{ "name": "Sam" }, { "name": "Alex" }],
                "greeting": ["Hi {{ name }}"]
            } }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn draws_requested_count() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(data_file(&dir), None);
        let defs = Arc::new(load_definitions(&args.data).unwrap());
        let mut engine = StdRng::seed_from_u64(7);

        let values = draw(&defs, &args, &mut engine).unwrap();
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn draws_through_formatter() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(data_file(&dir), Some("greeting"));
        let defs = Arc::new(load_definitions(&args.data).unwrap());
        let mut engine = StdRng::seed_from_u64(7);

        for value in draw(&defs, &args, &mut engine).unwrap() {
            let text = value.to_string();
            assert!(text == "Hi Sam" || text == "Hi Alex", "{text}");
        }
    }

    #[test]
    fn same_seed_replays() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(data_file(&dir), None);
        let defs = Arc::new(load_definitions(&args.data).unwrap());

        let first = draw(&defs, &args, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = draw(&defs, &args, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(first, second);
    }
}
