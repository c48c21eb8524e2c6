//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use defgen::{normalize_locale, Coverage, Definitions};
use miette::{IntoDiagnostic, Result};

use super::load_definitions;
use crate::output::table::format_coverage_table;

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// JSON data table.
    #[arg(long, env = "DEFGEN_DATA")]
    pub data: PathBuf,

    /// Source locale. Defaults to the default locale.
    #[arg(long)]
    pub source: Option<String>,

    /// Locales to check coverage for (comma-separated). Defaults to every
    /// loaded locale other than the source.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let defs = load_definitions(&args.data)?;
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| defs.default_locale().to_string());
    let coverage = collect_coverage(&defs, &source, &args.lang);
    let any_incomplete = coverage.iter().any(|c| !c.is_complete());

    if args.json {
        let json_output = serde_json::to_string_pretty(&coverage).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(&coverage);
        println!("{table}");

        for locale in &coverage {
            if !locale.missing.is_empty() {
                println!("\nMissing in {}:", locale.locale);
                for name in &locale.missing {
                    println!("  - {name}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn collect_coverage(defs: &Definitions, source: &str, langs: &[String]) -> Vec<Coverage> {
    let targets: Vec<String> = if langs.is_empty() {
        let source_key = normalize_locale(source);
        defs.locales()
            .into_iter()
            .filter(|locale| *locale != source_key)
            .collect()
    } else {
        langs.to_vec()
    };
    targets
        .iter()
        .map(|target| defs.coverage(source, target))
        .collect()
}
