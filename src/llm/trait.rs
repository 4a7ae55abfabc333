use anyhow::Result;

/// Trait for LLM providers that infer tags and folders for notes
///
/// Both methods return the raw reply text. Callers parse and validate it.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Suggest comma-separated tags for the full note text
    async fn generate_tags(&self, content: &str) -> Result<String>;

    /// Suggest a folder for `file_name`, answered as a `[[folder_name]]` token
    async fn suggest_folder(&self, known_folders: &[String], file_name: &str) -> Result<String>;
}
