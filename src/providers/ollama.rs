use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::OllamaProviderConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Ollama client translating one text per `/api/generate` call
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    /// Base URL of the Ollama API
    base_url: String,
    /// Model name to use for generation
    model: String,
    /// System prompt template with `{source_language}` and `{target_language}`
    system_prompt: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl OllamaProvider {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            model: model.into(),
            system_prompt: system_prompt.into(),
            // Per-request deadlines are enforced by the gateway
            client: Client::new(),
        }
    }

    pub fn from_config(config: &OllamaProviderConfig) -> Self {
        Self::new(&config.endpoint, &config.model, &config.system_prompt)
    }

    /// Build the generation request for one text
    pub fn build_request(&self, request: &TranslationRequest) -> GenerationRequest {
        let system = self
            .system_prompt
            .replace("{source_language}", &request.source_language)
            .replace("{target_language}", &request.target_language);

        GenerationRequest {
            model: self.model.clone(),
            prompt: request.text.clone(),
            system: if system.is_empty() { None } else { Some(system) },
            stream: false,
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = self.build_request(request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Ollama API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let generated: GenerationResponse = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        debug!("Ollama model {} answered (done: {})", generated.model, generated.done);

        Ok(generated.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
