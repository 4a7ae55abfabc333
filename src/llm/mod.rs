pub mod openai;
pub mod r#trait;

pub use openai::OpenAiProvider;
pub use r#trait::LlmProvider;
