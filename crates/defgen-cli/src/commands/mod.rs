//! CLI command implementations.

mod check;
mod coverage;
mod generate;

use std::fs::read_to_string;
use std::path::Path;

use defgen::{Definitions, LoadError};
use miette::{miette, Report};
use tracing::debug;

use crate::output::DataDiagnostic;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use generate::{run_generate, GenerateArgs};

/// Load a data table into a fresh store, turning load errors into
/// diagnostics that point into the file.
pub fn load_definitions(path: &Path) -> Result<Definitions, Report> {
    let defs = Definitions::new();
    match defs.load_file(path) {
        Ok(count) => {
            debug!(path = %path.display(), definitions = count, "loaded data table");
            Ok(defs)
        }
        Err(err) => Err(load_error_report(path, &err)),
    }
}

fn load_error_report(path: &Path, err: &LoadError) -> Report {
    let content = read_to_string(path).unwrap_or_default();
    match DataDiagnostic::from_load_error(path, &content, err) {
        Some(diagnostic) => diagnostic.into(),
        None => miette!("{err}"),
    }
}
