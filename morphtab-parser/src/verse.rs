//! Verse parser
//!
//! A dump is a sequence of verse blocks separated by blank lines:
//!
//! ```text
//! Gen.1.1
//! בְּרֵאשִׁ֖ית	bréshit	ברא	bara	Noun	In the beginning
//! ב	be	Suffix preposition
//! [annotation lines are skipped]
//!
//! Gen.1.2
//! ...
//! ```
//!
//! The first line of a block identifies the verse. Each following line is tab delimited:
//!
//!     3 fields     form, transliterated form, tags                       (suffix)
//!     5 fields     form, transliterated form, lemma, translit. lemma, translation
//!     6 fields     form, transliterated form, lemma, translit. lemma, tags, translation
//!
//! Anything else is dropped and reported as a [Diagnostic]. A verse header that contains a tab
//! means the block boundaries are out of step with the data and aborts the run.

use crate::diagnostics::{Diagnostic, Reporter};
use crate::source::SourceFile;
use crate::word::{Verse, Word};
use std::iter::{Enumerate, Peekable};
use std::path::{Path, PathBuf};
use std::str::Lines;
use thiserror::Error;

/// Markers of annotation lines, which never carry word data.
const DEFAULT_SKIP_MARKERS: &[&str] = &["[", "]", "\u{25E6}"];

/// Fatal parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{}:{line_number}: verse header contains a tab: {header:?}", .path.display())]
    MalformedVerseHeader {
        path: PathBuf,
        line_number: usize,
        header: String,
    },
}

/// Knobs for the line classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// A body line containing any of these is skipped.
    pub skip_markers: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            skip_markers: DEFAULT_SKIP_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ParserOptions {
    fn is_skipped(&self, line: &str) -> bool {
        self.skip_markers
            .iter()
            .any(|marker| !marker.is_empty() && line.contains(marker.as_str()))
    }
}

/// Iterator over the verse blocks of one source.
///
/// Yields one [Verse] per block, in file order. After a [ParseError] the iterator is exhausted.
pub struct VerseParser<'a> {
    source: &'a Path,
    lines: Peekable<Enumerate<Lines<'a>>>,
    options: &'a ParserOptions,
    reporter: &'a mut dyn Reporter,
    failed: bool,
}

impl<'a> VerseParser<'a> {
    pub fn new(
        source: &'a SourceFile,
        options: &'a ParserOptions,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            source: &source.path,
            lines: source.text.lines().enumerate().peekable(),
            options,
            reporter,
            failed: false,
        }
    }

    /// Skip blank lines between blocks. Returns false once the source is exhausted.
    fn has_another_verse(&mut self) -> bool {
        while let Some((_, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                return true;
            }
            self.lines.next();
        }
        false
    }

    fn parse_verse(&mut self) -> Result<Verse, ParseError> {
        // has_another_verse guarantees a non-blank header line is waiting
        let (index, raw) = self.lines.next().unwrap_or((0, ""));
        let header = raw.trim();
        if header.contains('\t') {
            return Err(ParseError::MalformedVerseHeader {
                path: self.source.to_path_buf(),
                line_number: index + 1,
                header: header.to_string(),
            });
        }

        let mut words = Vec::new();
        while let Some((index, raw)) = self.lines.next() {
            let line = raw.trim();
            if self.options.is_skipped(line) {
                continue;
            }
            if line.is_empty() {
                break;
            }
            if let Some(word) = self.parse_line(header, index + 1, line) {
                words.push(word);
            }
        }

        log::trace!("{}: {} word(s)", header, words.len());
        Ok(Verse {
            id: header.to_string(),
            words,
        })
    }

    fn parse_line(&mut self, verse_id: &str, line_number: usize, line: &str) -> Option<Word> {
        let fields: Vec<&str> = line.split('\t').collect();
        match fields.as_slice() {
            [form, transliterated_form, tags] => {
                Some(Word::suffix(verse_id, form, transliterated_form, tags))
            }
            fields if matches!(fields.len(), 5 | 6) => Word::word(verse_id, fields),
            fields => {
                let diagnostic = Diagnostic::InvalidFieldCount {
                    verse_id: verse_id.to_string(),
                    source: self.source.to_path_buf(),
                    line_number,
                    line: line.to_string(),
                    field_count: fields.len(),
                };
                log::debug!("{}", diagnostic);
                self.reporter.report(diagnostic);
                None
            }
        }
    }
}

impl Iterator for VerseParser<'_> {
    type Item = Result<Verse, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.has_another_verse() {
            return None;
        }
        let verse = self.parse_verse();
        self.failed = verse.is_err();
        Some(verse)
    }
}

/// Parse every verse of a source into a flat list of words.
pub fn parse_source(
    source: &SourceFile,
    options: &ParserOptions,
    reporter: &mut dyn Reporter,
) -> Result<Vec<Word>, ParseError> {
    let mut words = Vec::new();
    let mut verses = 0;
    for verse in VerseParser::new(source, options, reporter) {
        words.extend(verse?.words);
        verses += 1;
    }
    log::debug!(
        "{}: {} verse(s), {} word(s)",
        source.path.display(),
        verses,
        words.len()
    );
    Ok(words)
}

/// Parse a string directly, mostly for tests.
pub fn parse_str(text: &str, reporter: &mut dyn Reporter) -> Result<Vec<Verse>, ParseError> {
    let source = SourceFile::from_text("<string>", text);
    let options = ParserOptions::default();
    VerseParser::new(&source, &options, reporter).collect()
}
