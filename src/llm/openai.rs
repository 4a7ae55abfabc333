use crate::config::LlmConfig;
use crate::constants::{
    folder_user_prompt, tag_user_prompt, DEFAULT_BASE_URL, DEFAULT_FOLDER_MODEL, DEFAULT_TAG_MODEL,
    FOLDER_SYSTEM_PROMPT, TAG_SYSTEM_PROMPT,
};
use crate::error::OrganizerError;
use crate::llm::LlmProvider;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Provider for OpenAI-compatible chat-completions endpoints
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    tag_model: String,
    folder_model: String,
}

impl OpenAiProvider {
    /// Create a provider with the default models
    /// Default URL: https://api.openai.com/v1
    pub fn new(base_url: Option<&str>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.into(),
            tag_model: DEFAULT_TAG_MODEL.to_string(),
            folder_model: DEFAULT_FOLDER_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig, api_key: impl Into<String>) -> Self {
        Self::new(Some(config.base_url.as_str()), api_key)
            .with_models(config.tag_model.clone(), config.folder_model.clone())
    }

    /// Override the models used for tag and folder inference
    pub fn with_models(mut self, tag_model: String, folder_model: String) -> Self {
        self.tag_model = tag_model;
        self.folder_model = folder_model;
        self
    }

    async fn chat(&self, model: &str, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        tracing::debug!("POST {} (model: {})", url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.trim())
            .json(&request)
            .send()
            .await
            .map_err(|e| OrganizerError::service(format!("failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OrganizerError::service(format!(
                "API returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            OrganizerError::malformed(format!("failed to parse chat completion: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OrganizerError::malformed("chat completion has no message content"))?;

        Ok(content.trim().to_string())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate_tags(&self, content: &str) -> Result<String> {
        self.chat(&self.tag_model, TAG_SYSTEM_PROMPT, &tag_user_prompt(content))
            .await
    }

    async fn suggest_folder(&self, known_folders: &[String], file_name: &str) -> Result<String> {
        self.chat(
            &self.folder_model,
            FOLDER_SYSTEM_PROMPT,
            &folder_user_prompt(known_folders, file_name),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_openai_provider_defaults() {
        let provider = OpenAiProvider::new(None, "sk-test");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(provider.tag_model, "gpt-3.5-turbo");
        assert_eq!(provider.folder_model, "gpt-4o");
    }

    #[test]
    fn test_openai_provider_from_config() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            api_key: None,
            tag_model: "llama3".to_string(),
            folder_model: "mistral".to_string(),
        };
        let provider = OpenAiProvider::from_config(&config, "key");
        assert_eq!(provider.base_url, "http://localhost:11434/v1");
        assert_eq!(provider.tag_model, "llama3");
        assert_eq!(provider.folder_model, "mistral");
    }

    #[tokio::test]
    async fn test_generate_tags_sends_note_text() {
        let mock_server = MockServer::start().await;
        let provider = OpenAiProvider::new(Some(&mock_server.uri()), "sk-test");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-3.5-turbo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("  rust, cli \n")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tags = provider.generate_tags("Notes on the Rust CLI").await.unwrap();
        assert_eq!(tags, "rust, cli");

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .ends_with("Notes on the Rust CLI"));
    }

    #[tokio::test]
    async fn test_suggest_folder_uses_folder_model() {
        let mock_server = MockServer::start().await;
        let provider = OpenAiProvider::new(Some(&mock_server.uri()), "sk-test");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "model": "gpt-4o" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Use [[Projects]].")))
            .mount(&mock_server)
            .await;

        let reply = provider
            .suggest_folder(&["Projects".to_string()], "plan.md")
            .await
            .unwrap();
        assert_eq!(reply, "Use [[Projects]].");
    }

    #[tokio::test]
    async fn test_error_status_is_service_error() {
        let mock_server = MockServer::start().await;
        let provider = OpenAiProvider::new(Some(&mock_server.uri()), "bad-key");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let err = provider.generate_tags("text").await.unwrap_err();
        match err.downcast_ref::<OrganizerError>() {
            Some(OrganizerError::Service { reason }) => assert!(reason.contains("401")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_choices_is_malformed() {
        let mock_server = MockServer::start().await;
        let provider = OpenAiProvider::new(Some(&mock_server.uri()), "sk-test");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&mock_server)
            .await;

        let err = provider.generate_tags("text").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OrganizerError>(),
            Some(OrganizerError::MalformedResponse { .. })
        ));
    }
}
