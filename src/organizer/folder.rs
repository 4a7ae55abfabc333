use crate::constants::{FOLDER_CLOSE, FOLDER_OPEN};
use crate::error::OrganizerError;
use std::fmt;
use std::path::PathBuf;

const FORBIDDEN_CHARS: &[char] = &['\\', '<', '>', ':', '"', '|', '?', '*'];

/// A folder name taken from an inference reply and checked to stay inside the
/// working directory. `/` separates subfolders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderName(String);

impl FolderName {
    /// Validate a raw folder name, rejecting anything that could escape the
    /// working directory or is not portable as a directory name
    pub fn parse(raw: &str) -> Result<Self, OrganizerError> {
        let name = raw.trim();
        let reject = |reason: &str| OrganizerError::UnsafeFolderName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(reject("empty name"));
        }
        if name.starts_with('/') {
            return Err(reject("absolute path"));
        }
        if name.chars().any(char::is_control) {
            return Err(reject("control character"));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(reject(&format!("forbidden character {:?}", c)));
        }

        let mut components = Vec::new();
        for component in name.split('/') {
            let component = component.trim();
            match component {
                "" => return Err(reject("empty path component")),
                "." | ".." => return Err(reject("relative path component")),
                _ => components.push(component),
            }
        }

        Ok(Self(components.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path of the folder, one component per subfolder
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull the text between the first `[[` and the next `]]` out of a reply.
/// Anything outside the delimiters is ignored.
pub fn extract_folder_token(reply: &str) -> Result<&str, OrganizerError> {
    let open = reply
        .find(FOLDER_OPEN)
        .ok_or_else(|| OrganizerError::malformed(format!("no {} in reply: {:?}", FOLDER_OPEN, reply)))?;

    let rest = &reply[open + FOLDER_OPEN.len()..];
    let end = rest
        .find(FOLDER_CLOSE)
        .ok_or_else(|| OrganizerError::malformed(format!("no {} in reply: {:?}", FOLDER_CLOSE, reply)))?;

    let token = &rest[..end];
    if token.contains(FOLDER_OPEN) {
        return Err(OrganizerError::malformed(format!("nested {} in reply: {:?}", FOLDER_OPEN, reply)));
    }
    if token.trim().is_empty() {
        return Err(OrganizerError::malformed(format!("empty folder token in reply: {:?}", reply)));
    }

    Ok(token)
}

/// Extract and validate the folder suggested by a folder-inference reply
pub fn extract_folder_name(reply: &str) -> Result<FolderName, OrganizerError> {
    FolderName::parse(extract_folder_token(reply)?)
}
