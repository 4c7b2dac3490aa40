//! Word records
//!
//! A [Word] is one token of a verse: either a full word line (5 or 6 fields) or a grammatical
//! suffix line (3 fields). Optional columns are `Option`s so that "absent" never collapses into
//! an empty string.

use indexmap::IndexMap;

/// One token (word or suffix) inside a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Raw header line of the verse block this word came from.
    pub verse_id: String,
    pub form: String,
    pub transliterated_form: String,
    pub lemma: Option<String>,
    pub transliterated_lemma: Option<String>,
    pub translation: Option<String>,
    /// Morphological tags in source order. `None` for 5-field word lines.
    pub tags: Option<Vec<String>>,
    /// Tag → resolution, attached once a category file is available.
    pub resolved_parts: Option<IndexMap<String, String>>,
}

impl Word {
    /// Build a suffix record from the three fields of a suffix line.
    pub(crate) fn suffix(verse_id: &str, form: &str, transliterated_form: &str, tag_string: &str) -> Self {
        Word {
            verse_id: verse_id.to_string(),
            form: form.to_string(),
            transliterated_form: transliterated_form.to_string(),
            lemma: None,
            transliterated_lemma: None,
            translation: None,
            tags: Some(split_tags(tag_string)),
            resolved_parts: None,
        }
    }

    /// Build a word record from a 5- or 6-field line; `None` for any other field count.
    ///
    /// The tag string sits in the fifth field only in the 6-field variant; the translation is
    /// always the last field.
    pub(crate) fn word(verse_id: &str, fields: &[&str]) -> Option<Self> {
        let ([form, transliterated_form, lemma, transliterated_lemma], tag_string, translation) =
            match fields {
                [a, b, c, d, translation] => ([a, b, c, d], None, translation),
                [a, b, c, d, tags, translation] => ([a, b, c, d], Some(tags), translation),
                _ => return None,
            };
        Some(Word {
            verse_id: verse_id.to_string(),
            form: form.to_string(),
            transliterated_form: transliterated_form.to_string(),
            lemma: Some(lemma.to_string()),
            transliterated_lemma: Some(transliterated_lemma.to_string()),
            translation: Some(translation.to_string()),
            tags: tag_string.map(|tags| split_tags(tags)),
            resolved_parts: None,
        })
    }

    /// Tags as a slice, empty when absent.
    pub fn tag_slice(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Attach the resolution map. The only mutation a word sees after parsing.
    pub fn attach_resolution(&mut self, parts: IndexMap<String, String>) {
        self.resolved_parts = Some(parts);
    }
}

/// Words parsed from one verse block, all sharing the block's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub id: String,
    pub words: Vec<Word>,
}

/// Split a tag string on runs of whitespace.
pub fn split_tags(tag_string: &str) -> Vec<String> {
    tag_string.split_whitespace().map(str::to_string).collect()
}
