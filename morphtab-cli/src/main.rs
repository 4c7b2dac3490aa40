//! Command-line interface for morphtab
//! Converts a directory of tagged corpus dumps (`rip_*.txt`) into `output.csv`.
//!
//! Usage:
//!   morphtab [`<source-dir>`] [--settings `<file>`] [--strict]
//!
//! The first run over a directory writes `config.txt`, a skeleton classifying the corpus tags
//! into categories. Edit it, then run again to get the table.

mod report;
mod run;

use clap::{value_parser, Arg, ArgAction, Command};
use morphtab_config::{CorpusSettings, Settings};
use report::ConsoleReporter;
use run::Outcome;
use std::path::{Path, PathBuf};

/// Exit status when `--strict` is set and lines were dropped.
const EXIT_SOFT_ERRORS: i32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("morphtab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts tagged Hebrew corpus dumps into a CSV table")
        .arg(
            Arg::new("source")
                .help("Directory holding the rip_*.txt dumps (default: ./source next to the executable)")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("TOML settings file layered over the defaults and the directory's morphtab.toml")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with status 2 if any line had to be dropped")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let source_dir = matches
        .get_one::<PathBuf>("source")
        .cloned()
        .unwrap_or_else(|| default_source_dir(std::env::current_exe().ok()));

    let settings = load_settings(
        &source_dir,
        matches.get_one::<PathBuf>("settings").map(PathBuf::as_path),
        matches.get_flag("strict"),
    )
    .unwrap_or_else(|e| {
        eprintln!("Settings error: {}", e);
        std::process::exit(1);
    });

    let mut reporter = ConsoleReporter::new();
    let outcome = run::run(&source_dir, &settings, &mut reporter).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match outcome {
        Outcome::CategoriesWritten { path, words } => {
            log::info!("{} word(s) scanned", words);
            println!(
                "Review {} and run again to produce the table.",
                path.display()
            );
        }
        Outcome::TableWritten { rows, .. } => {
            println!("{} row(s) written", rows);
        }
    }

    if reporter.count() > 0 {
        println!("{} line(s) dropped", reporter.count());
        if settings.run.strict {
            std::process::exit(EXIT_SOFT_ERRORS);
        }
    }
}

/// `source/` next to the executable, or `./source` when its path is unknown.
fn default_source_dir(exe: Option<PathBuf>) -> PathBuf {
    exe.as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join("source")
}

fn load_settings(
    source_dir: &Path,
    settings_file: Option<&Path>,
    strict: bool,
) -> Result<Settings, morphtab_config::ConfigError> {
    let mut stack = CorpusSettings::for_dir(source_dir);
    if let Some(path) = settings_file {
        stack = stack.settings_file(path);
    }
    stack.strict(strict)?.load()
}
