/// Constants used throughout the notesorter application
/// This module centralizes prompts, markers and defaults

/// Line that opens and closes a note's metadata block
pub const METADATA_MARKER: &str = "---";

/// Metadata key prefix holding a note's tags
pub const TAGS_PREFIX: &str = "tags:";

/// Separator between tags, both in replies and in the `tags:` line
pub const TAG_SEPARATOR: &str = ", ";

/// Delimiters around the folder name in a folder-inference reply
pub const FOLDER_OPEN: &str = "[[";
pub const FOLDER_CLOSE: &str = "]]";

/// Default note file extension (without the dot)
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

/// OpenAI-compatible API defaults
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TAG_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_FOLDER_MODEL: &str = "gpt-4o";

/// Environment variable read when no API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const TAG_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that formats tags for Obsidian notes.";

pub const TAG_USER_PROMPT: &str = "Extract keywords for tags from the following content. \
In case the text is short please try to infer the meaning. \
When tagging abbreviations also add the word as a tag. \
Format them as a comma-separated list:";

pub const FOLDER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that organizes files into relevant folders.";

/// Build the user message asking for a folder for `file_name`
pub fn folder_user_prompt(known_folders: &[String], file_name: &str) -> String {
    format!(
        "Here is a list of existing folders: {:?}. Suggest a relevant folder to place the following file. \
Provide the folder name in the format {}folder_name{}. \
Avoid creating too many new folders and use subfolders when appropriate.\n\nFilename: {}",
        known_folders, FOLDER_OPEN, FOLDER_CLOSE, file_name
    )
}

/// Build the user message asking for tags for `content`
pub fn tag_user_prompt(content: &str) -> String {
    format!("{}\n\n{}", TAG_USER_PROMPT, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_prompt_lists_folders_and_file() {
        let prompt = folder_user_prompt(&["Projects".to_string(), "Archive".to_string()], "todo.md");
        assert!(prompt.contains(r#"["Projects", "Archive"]"#));
        assert!(prompt.contains("[[folder_name]]"));
        assert!(prompt.ends_with("Filename: todo.md"));
    }

    #[test]
    fn test_tag_prompt_appends_content() {
        let prompt = tag_user_prompt("Meeting notes about the API");
        assert!(prompt.starts_with(TAG_USER_PROMPT));
        assert!(prompt.ends_with("Meeting notes about the API"));
    }
}
