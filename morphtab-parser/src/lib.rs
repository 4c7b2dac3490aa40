//! # morphtab
//!
//! Parses tagged Hebrew corpus dumps (`rip_*.txt`) into flat word records and renders them
//! as a CSV table, classifying morphological tags through a hand-curated category file.
//!
//! Pipeline
//!
//!     source      discovery of input files and UTF-16 decoding
//!       └── verse       verse/word tokenizer, one [Verse](word::Verse) per block
//!             ├── categories  category file: read, or derive a skeleton from the corpus
//!             ├── resolver    attaches tag resolutions once categories exist
//!             └── table       CSV rendering, one row per word
//!
//! The run has two modes. Without a category file the corpus is only scanned to write a
//! skeleton file for a human to curate. With one, every word becomes a table row with one
//! extra column per category.
//!
//! This is a pure lib: it never prints. Notices go through `log`, malformed data lines go to a
//! [Reporter](diagnostics::Reporter) supplied by the caller.

pub mod categories;
pub mod diagnostics;
pub mod resolver;
pub mod source;
pub mod table;
pub mod verse;
pub mod word;

pub use categories::{CategoryConfig, CategoryError, CategoryStore};
pub use diagnostics::{Diagnostic, Reporter};
pub use source::{SourceError, SourceFile};
pub use table::{TableError, TableWriter};
pub use verse::{parse_source, ParseError, ParserOptions, VerseParser};
pub use word::{Verse, Word};
