/*!
 * Translation gateway around a provider.
 *
 * The gateway screens out text that must not be translated, bounds every
 * provider call with a timeout, waits a fixed delay after every call to stay
 * under external rate limits, and turns escape sentinels back into PO escapes.
 */

use std::time::Duration;

use anyhow::Result;
use log::debug;

use crate::app_config::{Config, ProviderKind};
use crate::catalog::markup::restore_escapes;
use crate::errors::GatewayError;
use crate::providers::command::CommandProvider;
use crate::providers::mock::MockProvider;
use crate::providers::ollama::OllamaProvider;
use crate::providers::{Provider, TranslationRequest};

/// Asset extensions that mark a filename rather than prose
const ASSET_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".mp3"];

/// Marker of an engine resource path
const RESOURCE_MARKER: &str = "res://";

/// Default bound on a single provider call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause after each provider call
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_millis(300);

/// Reason a text is not sent to the provider at all, if any
pub fn screen_text(text: &str) -> Option<GatewayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(GatewayError::EmptyInput);
    }
    if trimmed.starts_with('@')
        || text.contains(RESOURCE_MARKER)
        || ASSET_EXTENSIONS.iter().any(|ext| text.ends_with(ext))
    {
        return Some(GatewayError::Skipped);
    }
    None
}

/// Sequential, rate-limited access to one translation provider
#[derive(Debug)]
pub struct TranslationGateway {
    provider: Box<dyn Provider>,
    source_language: String,
    target_language: String,
    timeout: Duration,
    rate_limit_delay: Duration,
}

impl TranslationGateway {
    /// Create a gateway with the default timeout and delay
    pub fn new(provider: Box<dyn Provider>, source_language: &str, target_language: &str) -> Self {
        Self {
            provider,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
        }
    }

    /// Build the configured provider and wrap it
    pub fn from_config(config: &Config) -> Result<Self> {
        let translation = &config.translation;
        let provider: Box<dyn Provider> = match translation.provider {
            ProviderKind::Command => Box::new(CommandProvider::from_config(&translation.command)),
            ProviderKind::Ollama => Box::new(OllamaProvider::from_config(&translation.ollama)),
            ProviderKind::Mock => Box::new(MockProvider::working()),
        };

        Ok(Self::new(provider, &config.source_language, &config.target_language)
            .with_timeout(Duration::from_secs(translation.timeout_secs))
            .with_rate_limit_delay(Duration::from_millis(translation.rate_limit_delay_ms)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate already-protected text
    pub async fn translate(&self, text: &str) -> Result<String, GatewayError> {
        if let Some(reason) = screen_text(text) {
            return Err(reason);
        }

        let request = TranslationRequest::new(text, &self.source_language, &self.target_language);
        let outcome = tokio::time::timeout(self.timeout, self.provider.complete(&request)).await;

        // Applies to every call that reached the provider, whatever the outcome
        tokio::time::sleep(self.rate_limit_delay).await;

        let translated = match outcome {
            Err(_) => return Err(GatewayError::Timeout),
            Ok(Err(e)) => {
                debug!("Provider {} failed: {}", self.provider.name(), e);
                return Err(e.into());
            }
            Ok(Ok(translated)) => translated,
        };

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(GatewayError::EmptyResult);
        }

        Ok(restore_escapes(translated))
    }
}
