//! Source loading
//!
//! Corpus dumps are UTF-16 text files named `rip_*.txt`. This module finds them in a source
//! directory and decodes them into Rust strings. Decoding is lossy on purpose: unpaired
//! surrogates and a dangling odd byte are dropped, the way the dumps have always been read.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating or reading source files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read source directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A decoded source file. The file handle is closed once [SourceFile::read] returns.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    /// Read and decode a UTF-16 dump.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;
        let text = decode_utf16_lossy(&bytes);
        log::debug!("decoded {} ({} bytes)", path.display(), bytes.len());
        Ok(SourceFile { path, text })
    }

    /// Build a source from already decoded text (used by tests and tools).
    pub fn from_text<P: Into<PathBuf>, S: Into<String>>(path: P, text: S) -> Self {
        SourceFile {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// List the files in `dir` whose name matches `pattern`, sorted by file name.
pub fn discover<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>, SourceError> {
    let dir = dir.as_ref();
    let regex = Regex::new(pattern).map_err(|source| SourceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let entries = fs::read_dir(dir).map_err(|source| SourceError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| regex.is_match(name));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    log::debug!("found {} source file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Decode UTF-16 bytes, honoring a byte-order mark and dropping anything undecodable.
///
/// Without a BOM the data is taken as little-endian.
pub fn decode_utf16_lossy(bytes: &[u8]) -> String {
    let (body, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => (bytes, false),
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units).filter_map(Result::ok).collect()
}
