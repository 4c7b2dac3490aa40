//! Soft-error reporting
//!
//! Data lines with an unexpected field count are not fatal: they are dropped and reported as a
//! [Diagnostic] to whatever [Reporter] the caller passed in. The CLI prints them, tests collect
//! them into a `Vec`.

use std::fmt;
use std::path::PathBuf;

/// A recoverable problem found while parsing a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A verse body line that is neither a suffix (3 fields) nor a word (5 or 6 fields).
    InvalidFieldCount {
        verse_id: String,
        source: PathBuf,
        line_number: usize,
        line: String,
        field_count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidFieldCount {
                verse_id,
                source,
                line_number,
                line,
                field_count,
            } => write!(
                f,
                "{}: Invalid line {} in {}:{} (it has {} parts)",
                verse_id,
                line,
                source.display(),
                line_number,
                field_count
            ),
        }
    }
}

/// Receives soft errors as they are found.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
