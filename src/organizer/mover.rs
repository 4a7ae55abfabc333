use crate::error::OrganizerError;
use crate::organizer::preview::{MoveOperation, PreviewTree};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Handles safe file reorganization inside one base directory
pub struct FileMover {
    base_path: PathBuf,
}

impl FileMover {
    /// Create a new FileMover for the given base directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize base path: {}", base_path.as_ref().display()))?;

        if !base_path.is_dir() {
            anyhow::bail!("Base path is not a directory: {}", base_path.display());
        }

        Ok(Self { base_path })
    }

    /// Check that every planned operation stays inside the base path
    pub fn validate(&self, preview: &PreviewTree) -> Result<()> {
        for dir_op in &preview.directories_to_create {
            if !dir_op.path.starts_with(&self.base_path) {
                anyhow::bail!(
                    "Directory creation outside base path: {}",
                    dir_op.path.display()
                );
            }
        }

        for move_op in &preview.files_to_move {
            if !move_op.source.starts_with(&self.base_path) {
                anyhow::bail!("Source file outside base path: {}", move_op.source.display());
            }
            if !move_op.destination.starts_with(&self.base_path) {
                anyhow::bail!("Destination outside base path: {}", move_op.destination.display());
            }
        }

        Ok(())
    }

    /// Create the planned directories, then move each file.
    /// Stops at the first failure; earlier moves stay in place.
    pub fn execute(&self, preview: &PreviewTree) -> Result<Vec<MoveOperation>> {
        self.validate(preview)?;

        for dir_op in &preview.directories_to_create {
            fs::create_dir_all(&dir_op.path)
                .map_err(|e| OrganizerError::filesystem(&dir_op.path, e))?;
            tracing::debug!("Created folder {}", dir_op.folder);
        }

        let mut moved = Vec::with_capacity(preview.files_to_move.len());
        for move_op in &preview.files_to_move {
            self.move_file(move_op)?;
            tracing::info!(
                "Moved {} to {}",
                move_op.source.file_name().unwrap_or_default().to_string_lossy(),
                move_op.folder
            );
            moved.push(move_op.clone());
        }

        Ok(moved)
    }

    fn move_file(&self, move_op: &MoveOperation) -> Result<()> {
        // rename() replaces an existing file on unix
        if move_op.destination.exists() {
            return Err(OrganizerError::DestinationOccupied {
                path: move_op.destination.clone(),
            }
            .into());
        }

        if let Some(parent) = move_op.destination.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizerError::filesystem(parent, e))?;
        }

        fs::rename(&move_op.source, &move_op.destination)
            .map_err(|e| OrganizerError::filesystem(&move_op.source, e))?;

        Ok(())
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
