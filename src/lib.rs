pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod models;
pub mod note;
pub mod organizer;
pub mod tagger;
pub mod utils;

pub use error::OrganizerError;
pub use llm::LlmProvider;
pub use note::Note;
pub use organizer::BatchOrganizer;
pub use tagger::merge_tags;
