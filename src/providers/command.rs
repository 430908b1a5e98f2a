use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::app_config::CommandProviderConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

// @module: Command-line translator provider

/// Runs an external translator process once per request.
///
/// Each configured argument may contain `{source}`, `{target}` and `{text}`.
/// The text travels as a single argv element, never through a shell.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &CommandProviderConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Arguments with placeholders filled in for `request`
    pub fn build_args(&self, request: &TranslationRequest) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                // {text} last so user text is never re-expanded
                arg.replace("{source}", &request.source_language)
                    .replace("{target}", &request.target_language)
                    .replace("{text}", &request.text)
            })
            .collect()
    }
}

#[async_trait]
impl Provider for CommandProvider {
    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let args = self.build_args(request);
        debug!("Running {} with {} argument(s)", self.program, args.len());

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ProviderError::Spawn(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(ProviderError::CommandFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
