use super::http_client::{api_error, build_provider_client_with_timeout};
use super::traits::{GenerateFuture, LanguageModel};
use crate::error::LlmError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Local Ollama server via `/api/chat`.
pub struct OllamaModel {
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaModel {
    pub fn new(base_url: Option<&str>, model: &str, temperature: f64) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(DEFAULT_OLLAMA_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
            temperature,
            // Local models can be slow to answer long planner prompts.
            client: build_provider_client_with_timeout(300),
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: Options {
                temperature: self.temperature,
            },
        }
    }

    async fn call_api(&self, prompt: &str) -> anyhow::Result<String> {
        let request = self.build_request(prompt);
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(api_error("Ollama", response)
                .await
                .context("Is Ollama running? (ollama serve)"));
        }

        let chat: ChatResponse = response.json().await?;
        if chat.message.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: "Ollama".into(),
            }
            .into());
        }
        Ok(chat.message.content)
    }
}

impl LanguageModel for OllamaModel {
    fn name(&self) -> &str {
        "ollama"
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.call_api(prompt))
    }
}
