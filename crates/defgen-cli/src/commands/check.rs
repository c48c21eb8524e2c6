//! Implementation of the `defgen check` command.

use std::path::{Path, PathBuf};

use defgen::Definitions;
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::load_definitions;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// JSON data table to check
    #[arg(long, env = "DEFGEN_DATA")]
    pub data: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for check results.
#[derive(Serialize)]
struct CheckResult {
    file: String,
    valid: bool,
    locales: Vec<String>,
    definitions: usize,
    warnings: Vec<String>,
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let defs = match load_definitions(&args.data) {
        Ok(defs) => defs,
        Err(report) => {
            if args.json {
                let output = CheckResult {
                    file: args.data.display().to_string(),
                    valid: false,
                    locales: Vec::new(),
                    definitions: 0,
                    warnings: Vec::new(),
                    error: Some(report.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("{report:?}");
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let warnings = collect_warnings(&defs);
    let locales = defs.locales();
    let definitions = locales.iter().map(|locale| defs.names(locale).len()).sum();

    if args.json {
        let output = CheckResult {
            file: args.data.display().to_string(),
            valid: true,
            locales,
            definitions,
            warnings,
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_summary(&args.data, locales.len(), definitions, &warnings);
    }
    Ok(exitcode::OK)
}

/// Validate every loaded bucket against the default locale's bucket.
fn collect_warnings(defs: &Definitions) -> Vec<String> {
    let source = defs.default_locale();
    defs.locales()
        .iter()
        .filter(|locale| locale.as_str() != source)
        .flat_map(|locale| defs.validate_locale(source, locale))
        .map(|warning| warning.to_string())
        .collect()
}

fn print_summary(path: &Path, locales: usize, definitions: usize, warnings: &[String]) {
    println!(
        "{} {}: {definitions} definitions in {locales} locales",
        "✓".green(),
        path.display()
    );
    for warning in warnings {
        println!("  {} {warning}", "warning:".yellow());
    }
}
