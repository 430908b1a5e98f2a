/*!
 * Provider implementations for the external translation capability.
 *
 * - `command`: any command-line translator (translate-shell by default)
 * - `ollama`: local Ollama server
 * - `mock`: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single text to translate between two languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Protected text, markup already replaced by ids
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_language: &str, target_language: &str) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Common trait for all translation providers
///
/// A provider performs exactly one call to the external capability. Timeouts,
/// rate-limit delays and input screening belong to the gateway around it.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `request.text`, returning the raw provider output
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Short name used in console output
    fn name(&self) -> &str;
}

pub mod command;
pub mod mock;
pub mod ollama;
