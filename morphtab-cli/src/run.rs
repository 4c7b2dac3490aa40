//! The two run modes
//!
//! Without a category file the corpus is parsed only to write a skeleton category file. With
//! one, every word is resolved and written to the output table.

use morphtab_config::Settings;
use morphtab_parser::categories::{CategoryError, CategoryStore};
use morphtab_parser::diagnostics::Reporter;
use morphtab_parser::resolver::resolve_words;
use morphtab_parser::source::{self, SourceError, SourceFile};
use morphtab_parser::table::{TableError, TableWriter};
use morphtab_parser::verse::{parse_source, ParseError, ParserOptions};
use morphtab_parser::word::Word;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors; each one aborts the run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Categories(#[from] CategoryError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No category file existed; a skeleton was written.
    CategoriesWritten { path: PathBuf, words: usize },
    /// The table was written.
    TableWritten { path: PathBuf, rows: usize },
}

/// Run one conversion over `source_dir`.
pub fn run(
    source_dir: &Path,
    settings: &Settings,
    reporter: &mut dyn Reporter,
) -> Result<Outcome, RunError> {
    let store = CategoryStore::in_dir(source_dir, &settings.categories.file_name)
        .with_trim_values(settings.categories.trim_values);

    let config = match store.read() {
        Ok(Some(config)) => Some(config),
        Ok(None) => {
            println!("No config file found at {}", store.path().display());
            None
        }
        Err(err) if settings.categories.regenerate_on_malformed => {
            println!("Error reading config file: {}", err);
            None
        }
        Err(err) => return Err(err.into()),
    };

    let words = parse_all(source_dir, settings, reporter)?;

    match config {
        None => {
            println!("writing config file: {}", store.path().display());
            store.write(&words)?;
            Ok(Outcome::CategoriesWritten {
                path: store.path().to_path_buf(),
                words: words.len(),
            })
        }
        Some(config) => {
            let mut words = words;
            resolve_words(&mut words, &config);
            let path = source_dir.join(&settings.output.file_name);
            println!("writing output file: {}", path.display());
            TableWriter::new(&config).write(&words, &path)?;
            Ok(Outcome::TableWritten {
                path,
                rows: words.len(),
            })
        }
    }
}

/// Parse every matching source file in file-name order.
fn parse_all(
    source_dir: &Path,
    settings: &Settings,
    reporter: &mut dyn Reporter,
) -> Result<Vec<Word>, RunError> {
    let options = match &settings.input.skip_markers {
        Some(markers) => ParserOptions {
            skip_markers: markers.clone(),
        },
        None => ParserOptions::default(),
    };

    let mut words = Vec::new();
    for path in source::discover(source_dir, &settings.input.file_pattern)? {
        let source = SourceFile::read(&path)?;
        words.extend(parse_source(&source, &options, reporter)?);
    }
    Ok(words)
}
