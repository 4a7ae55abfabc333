use crate::constants::TAGS_PREFIX;
use crate::note::Note;
use crate::tagger::TagSet;

/// Add a `tags:` line built from `tags_str` to the note's metadata block.
///
/// A note that already has a `tags:` line is returned trimmed and otherwise
/// untouched, so merging is idempotent. All other metadata lines are kept in
/// order and the note keeps its line endings. The result is always wrapped in
/// a metadata block, even when it ends up empty.
pub fn merge_tags(source_content: &str, tags_str: &str) -> String {
    let note = Note::parse(source_content);

    let mut tagged = false;
    let mut retained = Vec::with_capacity(note.metadata.len() + 1);
    for line in &note.metadata {
        if line.starts_with(TAGS_PREFIX) {
            tagged = true;
        } else {
            retained.push(line.clone());
        }
    }

    if tagged {
        return source_content.trim().to_string();
    }

    let tags = TagSet::parse(tags_str);
    if !tags.is_empty() {
        retained.push(format!("{} {}", TAGS_PREFIX, tags.to_line_value()));
    }

    Note {
        metadata: retained,
        body: note.body,
        has_block: true,
        line_ending: note.line_ending,
    }
    .render()
}
