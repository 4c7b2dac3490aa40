//! Category file
//!
//! The category file (`config.txt` next to the dumps) classifies morphological tags:
//!
//! ```text
//! pos: noun, verb, particle, adjective
//! number: singular, plural
//! other: conj, Hiphil
//! ```
//!
//! Its presence switches the run mode. When it is missing the corpus is scanned and a skeleton
//! is written, seeded with [BUILT_IN_CATEGORIES] plus an `other` line collecting every observed
//! tag no built-in vocabulary claims. A curator then edits that file before the next run.

use crate::table::FIXED_COLUMNS;
use crate::word::Word;
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Category name for observed tags outside every built-in vocabulary.
pub const OTHER_CATEGORY: &str = "other";

/// Built-in vocabularies, written in this order (and in vocabulary order) to a new skeleton.
pub const BUILT_IN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "verse",
        &[
            "Particle",
            "Verb",
            "Noun",
            "Suffix",
            "Pronoun",
            "Adjective",
            "Paragraph",
        ],
    ),
    ("pos", &["noun", "verb", "particle", "adjective"]),
    ("number", &["singular", "plural"]),
    ("gender", &["masculine", "feminine"]),
    ("tense", &["perfect", "imperfect"]),
    ("person", &["first", "second", "third"]),
    (
        "binyan",
        &[
            "qal",
            "piel",
            "hifil",
            "nifal",
            "pual",
            "hitpael",
            "hofal",
            "passiveqal",
            "polel",
            "hitpolel",
        ],
    ),
];

static BUILT_IN_VALUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BUILT_IN_CATEGORIES
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .collect()
});

/// Errors reading or writing the category file.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("{}:{line_number}: expected '<category>: <values>', found {line:?}", .path.display())]
    Malformed {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("{}:{line_number}: category '{name}' clashes with a fixed table column", .path.display())]
    ReservedName {
        path: PathBuf,
        line_number: usize,
        name: String,
    },

    #[error("cannot access category file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CategoryError {
    /// Attach the file path to a line-level error raised by [parse_categories].
    fn in_file(self, file: &Path) -> Self {
        match self {
            CategoryError::Malformed {
                line_number, line, ..
            } => CategoryError::Malformed {
                path: file.to_path_buf(),
                line_number,
                line,
            },
            CategoryError::ReservedName {
                line_number, name, ..
            } => CategoryError::ReservedName {
                path: file.to_path_buf(),
                line_number,
                name,
            },
            other => other,
        }
    }
}

/// Category name → tag values, both in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryConfig {
    categories: IndexMap<String, IndexSet<String>>,
}

impl CategoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values of a category. A category set twice keeps its first position and its
    /// last values.
    pub fn set<I, S>(&mut self, category: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.categories.insert(category.to_string(), values);
    }

    pub fn get(&self, category: &str) -> Option<&IndexSet<String>> {
        self.categories.get(category)
    }

    /// Categories in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.categories.iter().map(|(name, values)| (name.as_str(), values))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Every category whose value set contains `tag`.
    pub fn categories_of<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, values)| values.contains(tag))
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Parse category file text.
///
/// Each non-blank line is `<category>: <comma separated values>`, split on the first colon.
/// With `trim_values` every value is trimmed and empty values are dropped; without it only
/// the text after the colon is trimmed as a whole, so `pos: noun,verb, particle` keeps
/// `" particle"` verbatim.
///
/// A later line for the same category replaces the earlier one. Category names that would
/// duplicate a fixed table column are rejected. A leading byte-order mark is ignored.
///
/// On error the line number is 1-based and the path is left empty for the caller to fill in.
pub fn parse_categories(text: &str, trim_values: bool) -> Result<CategoryConfig, CategoryError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut config = CategoryConfig::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, values) = line.split_once(':').ok_or_else(|| CategoryError::Malformed {
            path: PathBuf::new(),
            line_number: index + 1,
            line: line.to_string(),
        })?;

        let name = name.trim();
        if FIXED_COLUMNS.iter().any(|column| *column == name) {
            return Err(CategoryError::ReservedName {
                path: PathBuf::new(),
                line_number: index + 1,
                name: name.to_string(),
            });
        }

        let values = values.trim().split(',');
        if trim_values {
            config.set(name, values.map(str::trim).filter(|v| !v.is_empty()));
        } else {
            config.set(name, values);
        }
    }
    Ok(config)
}

/// Render the skeleton category file for a parsed corpus.
pub fn render_skeleton(words: &[Word]) -> String {
    let observed: BTreeSet<&str> = words
        .iter()
        .flat_map(|word| word.tag_slice().iter().map(String::as_str))
        .collect();

    let mut out = String::new();
    for (name, values) in BUILT_IN_CATEGORIES {
        out.push_str(&format!("{}: {}\n", name, values.join(", ")));
    }

    let unclaimed = unclaimed_tags(observed);
    if !unclaimed.is_empty() {
        out.push_str(&format!("{}: {}\n", OTHER_CATEGORY, unclaimed.join(", ")));
    }
    out
}

/// Observed tags no built-in vocabulary claims, sorted case-insensitively.
fn unclaimed_tags<'a>(observed: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut unclaimed: Vec<&str> = observed
        .into_iter()
        .filter(|tag| !BUILT_IN_VALUES.contains(*tag))
        .collect();
    unclaimed.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    unclaimed
}

/// Reads and writes the category file at a fixed path.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    path: PathBuf,
    trim_values: bool,
}

impl CategoryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            trim_values: true,
        }
    }

    /// Category store for `file_name` inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P, file_name: &str) -> Self {
        Self::new(dir.as_ref().join(file_name))
    }

    pub fn with_trim_values(mut self, trim_values: bool) -> Self {
        self.trim_values = trim_values;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the category file.
    ///
    /// `Ok(None)` means there is no file yet, which is the signal to generate one. A file that
    /// exists but cannot be parsed is an error, never a partial config.
    pub fn read(&self) -> Result<Option<CategoryConfig>, CategoryError> {
        if !self.path.exists() {
            log::info!("no category file found at {}", self.path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let config =
            parse_categories(&text, self.trim_values).map_err(|err| err.in_file(&self.path))?;

        log::info!(
            "loaded {} categories from {}",
            config.len(),
            self.path.display()
        );
        Ok(Some(config))
    }

    /// Write the skeleton for `words`, replacing any existing file.
    pub fn write(&self, words: &[Word]) -> Result<(), CategoryError> {
        log::info!("writing category file {}", self.path.display());
        fs::write(&self.path, render_skeleton(words)).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> CategoryError {
        CategoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
