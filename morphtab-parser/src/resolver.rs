//! Tag resolution
//!
//! Once a category file exists every tagged word gets a `resolved_parts` map. Each tag maps to
//! itself; the category a tag belongs to is worked out when the table is written, by
//! intersecting the word's tags with each category's values.

use crate::categories::CategoryConfig;
use crate::word::{split_tags, Word};
use indexmap::IndexMap;

/// Resolve a whitespace-delimited tag string. `None` when there is no category config.
pub fn resolve(
    tag_string: &str,
    config: Option<&CategoryConfig>,
) -> Option<IndexMap<String, String>> {
    config.map(|_| resolve_tags(&split_tags(tag_string)))
}

fn resolve_tags(tags: &[String]) -> IndexMap<String, String> {
    tags.iter().map(|tag| (tag.clone(), tag.clone())).collect()
}

/// Attach resolutions to every word that carries tags.
pub fn resolve_words(words: &mut [Word], config: &CategoryConfig) {
    let mut unclassified = 0usize;
    for word in words.iter_mut() {
        let Some(tags) = word.tags.as_deref() else {
            continue;
        };
        unclassified += tags
            .iter()
            .filter(|tag| config.categories_of(tag).next().is_none())
            .count();
        let parts = resolve_tags(tags);
        word.attach_resolution(parts);
    }
    if unclassified > 0 {
        log::debug!("{} tag occurrence(s) belong to no category", unclassified);
    }
}
