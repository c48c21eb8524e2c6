//! defgen CLI entry point.
//!
//! Provides command-line tools for working with definition data tables:
//! - `defgen generate` - Draw values from a definition
//! - `defgen check` - Validate a data table
//! - `defgen coverage` - Report per-locale coverage

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_coverage, run_generate, CheckArgs, CoverageArgs, GenerateArgs};
use tracing_subscriber::EnvFilter;

/// Definition table tools.
#[derive(Debug, Parser)]
#[command(name = "defgen")]
#[command(about = "Locale-aware fake data from definition tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw values from a definition
    Generate(GenerateArgs),
    /// Check a data table for errors and cross-locale warnings
    Check(CheckArgs),
    /// Report definition coverage across locales
    Coverage(CoverageArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "defgen", "generate", "--data", "data.json", "--name", "color", "--locale", "fr",
            "--seed", "42", "-n", "3", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.data, PathBuf::from("data.json"));
                assert_eq!(args.name, "color");
                assert_eq!(args.locale, "fr");
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.count, 3);
                assert!(args.json);
                assert!(args.format.is_none());
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from([
            "defgen", "generate", "--data", "data.json", "--name", "color",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.count, 1);
                assert!(!args.json);
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn coverage_splits_languages() {
        let cli = Cli::try_parse_from([
            "defgen", "coverage", "--data", "data.json", "--lang", "fr,de", "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Coverage(args) => {
                assert_eq!(args.lang, vec!["fr", "de"]);
                assert!(args.strict);
                assert!(args.source.is_none());
            }
            other => panic!("expected coverage, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "defgen", "check", "--data", "data.json", "--color", "never", "-v",
        ])
        .unwrap();
        assert_eq!(cli.color, ColorWhen::Never);
        assert!(cli.verbose);
    }

    #[test]
    fn generate_requires_a_name() {
        assert!(Cli::try_parse_from(["defgen", "generate", "--data", "data.json"]).is_err());
    }
}
