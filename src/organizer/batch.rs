use crate::constants::DEFAULT_NOTE_EXTENSION;
use crate::error::OrganizerError;
use crate::llm::LlmProvider;
use crate::models::{MovedFile, RunReport, TagOutcome, TagReport};
use crate::note::Note;
use crate::organizer::folder::extract_folder_name;
use crate::organizer::mover::FileMover;
use crate::organizer::preview::PreviewTree;
use crate::tagger::merge_tags;
use crate::utils;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for a batch run
#[derive(Debug, Clone)]
pub struct OrganizerOptions {
    /// Note file extension, without the dot
    pub extension: String,
    /// Ask for tags and folders but leave every file where and as it is
    pub dry_run: bool,
    /// Draw a progress bar during tagging
    pub show_progress: bool,
}

impl Default for OrganizerOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_NOTE_EXTENSION.to_string(),
            dry_run: false,
            show_progress: false,
        }
    }
}

/// Tags every note in a directory, then files each tagged note into a folder.
///
/// Phase 1 (`tag_notes`) asks the provider for tags and rewrites each
/// untagged note. Phase 2 (`plan_folders` + `apply`) asks for a folder per
/// processed note and moves it there. Notes that already had tags are
/// skipped by both phases. Any failure ends the run; work already done is
/// not rolled back.
pub struct BatchOrganizer {
    mover: FileMover,
    provider: Arc<dyn LlmProvider>,
    options: OrganizerOptions,
}

impl BatchOrganizer {
    pub fn new<P: AsRef<Path>>(
        root: P,
        provider: Arc<dyn LlmProvider>,
        options: OrganizerOptions,
    ) -> Result<Self> {
        Ok(Self {
            mover: FileMover::new(root)?,
            provider,
            options,
        })
    }

    /// Canonical working directory
    pub fn root(&self) -> &Path {
        self.mover.base_path()
    }

    /// Tag and organize in one go, without asking for confirmation
    pub async fn run(&self) -> Result<RunReport> {
        let tagging = self.tag_notes().await?;
        let plan = self.plan_folders(&tagging.processed).await?;
        let moved = self.apply(&plan)?;
        Ok(RunReport { tagging, moved })
    }

    /// Phase 1: tag every untagged note in the working directory
    pub async fn tag_notes(&self) -> Result<TagReport> {
        let entries = utils::snapshot_entries(self.root())?;
        let total = entries.len();
        let progress = self.progress_bar(total as u64);

        let mut report = TagReport::default();
        for (index, path) in entries.iter().enumerate() {
            if !utils::is_note_file(path, &self.options.extension) {
                continue;
            }

            let outcome = self.tag_note(path).await?;
            if let TagOutcome::Processed { .. } = outcome {
                progress.set_position(index as u64);
                tracing::debug!("PROGRESS: {:.2}%", utils::progress_percent(index, total));
            }
            report.record(outcome);
        }
        progress.finish_and_clear();

        tracing::info!(
            "Tagged {} notes, skipped {} already tagged",
            report.processed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Tag one note in place
    pub async fn tag_note(&self, path: &Path) -> Result<TagOutcome> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OrganizerError::filesystem(path, e))?;

        if Note::parse(&content).has_tags() {
            tracing::warn!("Skipping {}: already tagged", path.display());
            return Ok(TagOutcome::Skipped {
                path: path.to_path_buf(),
            });
        }

        let tags = self
            .provider
            .generate_tags(&content)
            .await
            .with_context(|| format!("Tag inference failed for {}", path.display()))?;
        let tags = tags.trim().to_string();

        let merged = merge_tags(&content, &tags);
        if self.options.dry_run {
            tracing::info!("[dry run] Would tag {} with: {}", path.display(), tags);
        } else {
            tokio::fs::write(path, merged)
                .await
                .map_err(|e| OrganizerError::filesystem(path, e))?;
            tracing::info!("Tagged {}: {}", path.display(), tags);
        }

        Ok(TagOutcome::Processed {
            path: path.to_path_buf(),
            tags,
        })
    }

    /// Phase 2a: decide a folder for each processed note.
    ///
    /// Known folders start as the existing subdirectories. A new folder is
    /// planned once and offered to the provider for the remaining notes.
    pub async fn plan_folders(&self, processed: &[PathBuf]) -> Result<PreviewTree> {
        let mut known = utils::list_subdirectories(self.root())?;
        let mut plan = PreviewTree::new();

        for source in processed {
            let file_name = source
                .file_name()
                .with_context(|| format!("Not a file path: {}", source.display()))?;
            let display_name = file_name.to_string_lossy();

            let reply = self
                .provider
                .suggest_folder(&known, &display_name)
                .await
                .with_context(|| format!("Folder inference failed for {}", display_name))?;
            let folder = extract_folder_name(&reply)?;
            let folder_dir = self.root().join(folder.to_path());

            if !known.iter().any(|k| k == folder.as_str()) {
                plan.add_directory(folder_dir.clone(), folder.clone());
                known.push(folder.to_string());
            }

            tracing::debug!("{} -> {}", display_name, folder);
            plan.add_move(source.clone(), folder_dir.join(file_name), folder);
        }

        Ok(plan)
    }

    /// Phase 2b: create folders and move the notes
    pub fn apply(&self, plan: &PreviewTree) -> Result<Vec<MovedFile>> {
        if self.options.dry_run {
            self.mover.validate(plan)?;
            tracing::info!("[dry run] {} files left in place", plan.files_to_move.len());
            return Ok(Vec::new());
        }

        let moved = self.mover.execute(plan)?;
        Ok(moved.into_iter().map(MovedFile::from).collect())
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {percent}% tagged")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}
