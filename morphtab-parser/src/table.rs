//! CSV table output
//!
//! One row per word. The fixed columns come first, followed by one column per category in
//! category-file order. A category cell lists the word's tags that belong to the category,
//! joined with `,`, and is an empty string when there are none.

use crate::categories::CategoryConfig;
use crate::word::Word;
use indexmap::IndexSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns present in every table, before the category columns.
pub const FIXED_COLUMNS: &[&str] = &[
    "verse_id",
    "form",
    "transliterated_form",
    "lemma",
    "transliterated_lemma",
    "fts",
    "translation",
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot write table to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Renders words against a category config.
pub struct TableWriter<'a> {
    config: &'a CategoryConfig,
}

impl<'a> TableWriter<'a> {
    pub fn new(config: &'a CategoryConfig) -> Self {
        Self { config }
    }

    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.config.names().map(str::to_string))
            .collect()
    }

    pub fn row(&self, word: &Word) -> Vec<String> {
        let mut row = vec![
            word.verse_id.clone(),
            word.form.clone(),
            word.transliterated_form.clone(),
            word.lemma.clone().unwrap_or_default(),
            word.transliterated_lemma.clone().unwrap_or_default(),
            render_fts(word),
            word.translation.clone().unwrap_or_default(),
        ];
        for (_, values) in self.config.iter() {
            row.push(category_cell(word, values));
        }
        row
    }

    /// Write the header and one row per word.
    pub fn write_to<W: Write>(&self, words: &[Word], writer: W) -> Result<(), TableError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.header())?;
        for word in words {
            csv.write_record(self.row(word))?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, words: &[Word], path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        log::info!("writing {} row(s) to {}", words.len(), path.display());
        let file = File::create(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(words, BufWriter::new(file))
    }
}

/// `[a, b, c]`, or empty when the word has no tags.
fn render_fts(word: &Word) -> String {
    match word.tags.as_deref() {
        Some(tags) if !tags.is_empty() => format!("[{}]", tags.join(", ")),
        _ => String::new(),
    }
}

/// The word's tags that belong to `values`, in tag order, without repeats.
fn category_cell(word: &Word, values: &IndexSet<String>) -> String {
    let met: IndexSet<&str> = word
        .tag_slice()
        .iter()
        .map(String::as_str)
        .filter(|tag| values.contains(*tag))
        .collect();
    met.into_iter().collect::<Vec<_>>().join(",")
}
