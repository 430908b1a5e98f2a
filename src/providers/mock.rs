/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scripted provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged echo of the text
 * - `MockProvider::failing()` - Always fails like a crashed command
 * - `MockProvider::empty()` - Answers with blank output
 * - `MockProvider::slow(ms)` - Answers after a delay, for timeout testing
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on every Nth request
    Intermittent { fail_every: usize },
    /// Always fails with a non-zero exit status
    Failing,
    /// Returns empty output
    Empty,
    /// Succeeds after sleeping
    Slow { delay_ms: u64 },
    /// Cannot be started at all
    Unreachable,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every text received, in order
    received: Arc<Mutex<Vec<String>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts received so far
    pub fn received(&self) -> Vec<String> {
        self.received.lock().map(|texts| texts.clone()).unwrap_or_default()
    }

    fn respond(&self, request: &TranslationRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => format!("[{}] {}", request.target_language, request.text),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(request.text.clone());
        }

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(request)),
            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::CommandFailed {
                        status: 1,
                        stderr: "Simulated intermittent failure".to_string(),
                    })
                } else {
                    Ok(self.respond(request))
                }
            }
            MockBehavior::Failing => Err(ProviderError::CommandFailed {
                status: 1,
                stderr: "Simulated failure".to_string(),
            }),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.respond(request))
            }
            MockBehavior::Unreachable => Err(ProviderError::Spawn("mock: not installed".to_string())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
