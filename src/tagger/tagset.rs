use crate::constants::{METADATA_MARKER, TAG_SEPARATOR};
use std::collections::HashSet;

/// Case-sensitive, deduplicated set of tags keeping first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    seen: HashSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `", "`-separated list. Line breaks separate tags too, so a
    /// reply can never add lines to a metadata block. Blank entries are dropped.
    pub fn parse(tags_str: &str) -> Self {
        let mut set = Self::new();
        for tag in tags_str
            .split(TAG_SEPARATOR)
            .flat_map(|piece| piece.split(['\n', '\r']))
        {
            set.insert(tag);
        }
        set
    }

    /// Insert a tag, returning false when it was rejected or already present.
    /// Blank tags, marker lines and tags holding control characters are rejected.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty()
            || tag == METADATA_MARKER
            || tag.chars().any(char::is_control)
            || self.seen.contains(tag)
        {
            return false;
        }
        self.seen.insert(tag.to_string());
        self.tags.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.seen.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Join back into the `", "`-separated form
    pub fn to_line_value(&self) -> String {
        self.tags.join(TAG_SEPARATOR)
    }
}
