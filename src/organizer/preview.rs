use crate::organizer::folder::FolderName;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A planned move of one note into its folder
#[derive(Debug, Clone)]
pub struct MoveOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub folder: FolderName,
}

/// A folder that does not exist yet and will be created
#[derive(Debug, Clone)]
pub struct CreateDirOperation {
    pub path: PathBuf,
    pub folder: FolderName,
}

/// Folder assignments for a batch, in the order they were decided
#[derive(Debug, Clone, Default)]
pub struct PreviewTree {
    pub directories_to_create: Vec<CreateDirOperation>,
    pub files_to_move: Vec<MoveOperation>,
}

impl PreviewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to be created
    pub fn add_directory(&mut self, path: PathBuf, folder: FolderName) {
        self.directories_to_create.push(CreateDirOperation { path, folder });
    }

    /// Add a file move operation
    pub fn add_move(&mut self, source: PathBuf, destination: PathBuf, folder: FolderName) {
        self.files_to_move.push(MoveOperation {
            source,
            destination,
            folder,
        });
    }

    /// Generate a tree visualization string
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str("Proposed changes:\n");

        let mut by_folder: BTreeMap<&str, Vec<&MoveOperation>> = BTreeMap::new();
        for op in &self.files_to_move {
            by_folder.entry(op.folder.as_str()).or_default().push(op);
        }

        for (folder, ops) in by_folder {
            let is_new = self
                .directories_to_create
                .iter()
                .any(|dir| dir.folder.as_str() == folder);
            let marker = if is_new { " (new)" } else { "" };
            output.push_str(&format!("📁 {}/{}\n", folder, marker));

            for op in ops {
                let file_name = op
                    .destination
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown");
                output.push_str(&format!("  📄 {}\n", file_name));
            }
        }

        output.push_str(&format!(
            "\nCreate {} directories, move {} files",
            self.directories_to_create.len(),
            self.files_to_move.len()
        ));

        output
    }

    /// Check if there are any operations
    pub fn is_empty(&self) -> bool {
        self.directories_to_create.is_empty() && self.files_to_move.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str) -> FolderName {
        FolderName::parse(name).unwrap()
    }

    #[test]
    fn test_preview_tree_empty() {
        let tree = PreviewTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_preview_tree_add_operations() {
        let mut tree = PreviewTree::new();
        tree.add_directory(PathBuf::from("/notes/Ideas"), folder("Ideas"));
        tree.add_move(
            PathBuf::from("/notes/app.md"),
            PathBuf::from("/notes/Ideas/app.md"),
            folder("Ideas"),
        );

        assert!(!tree.is_empty());
        assert_eq!(tree.directories_to_create.len(), 1);
        assert_eq!(tree.files_to_move.len(), 1);
        assert_eq!(tree.files_to_move[0].folder, folder("Ideas"));
    }

    #[test]
    fn test_preview_tree_render() {
        let mut tree = PreviewTree::new();
        tree.add_directory(PathBuf::from("/notes/Archive/2024"), folder("Archive/2024"));
        tree.add_move(
            PathBuf::from("/notes/old.md"),
            PathBuf::from("/notes/Archive/2024/old.md"),
            folder("Archive/2024"),
        );
        tree.add_move(
            PathBuf::from("/notes/plan.md"),
            PathBuf::from("/notes/Projects/plan.md"),
            folder("Projects"),
        );
        tree.add_move(
            PathBuf::from("/notes/roadmap.md"),
            PathBuf::from("/notes/Projects/roadmap.md"),
            folder("Projects"),
        );

        let preview = tree.render();
        assert!(preview.contains("📁 Archive/2024/ (new)"));
        assert!(preview.contains("📁 Projects/\n"));
        assert!(preview.contains("📄 plan.md"));
        assert!(preview.contains("📄 roadmap.md"));
        assert!(preview.contains("Create 1 directories"));
        assert!(preview.contains("move 3 files"));
    }
}
