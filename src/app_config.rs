use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which external capability performs the translation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Command-line translator (translate-shell by default)
    #[default]
    Command,
    // @provider: Ollama
    Ollama,
    // @provider: Scripted echo, no external calls
    Mock,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Command => "Command",
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Command => "command".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause after every provider call, in milliseconds
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Command provider settings
    #[serde(default)]
    pub command: CommandProviderConfig,

    /// Ollama provider settings
    #[serde(default)]
    pub ollama: OllamaProviderConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            timeout_secs: default_timeout_secs(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            command: CommandProviderConfig::default(),
            ollama: OllamaProviderConfig::default(),
        }
    }
}

/// Command-line translator configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandProviderConfig {
    /// Executable to run
    #[serde(default = "default_command_program")]
    pub program: String,

    /// Arguments; `{source}`, `{target}` and `{text}` are substituted
    #[serde(default = "default_command_args")]
    pub args: Vec<String>,
}

impl Default for CommandProviderConfig {
    fn default() -> Self {
        Self {
            program: default_command_program(),
            args: default_command_args(),
        }
    }
}

/// Ollama service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaProviderConfig {
    /// Service endpoint URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "llama3.2", "mistral")
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// System prompt template
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for OllamaProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ollama_endpoint(),
            model: default_ollama_model(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Naming of the files written next to the input catalog
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Appended to the input stem for the translated catalog
    #[serde(default = "default_translated_suffix")]
    pub translated_suffix: String,

    /// Between the input stem and the timestamp of the log file
    #[serde(default = "default_log_infix")]
    pub log_infix: String,

    /// Appended to the input stem for the mapping export
    #[serde(default = "default_mapping_suffix")]
    pub mapping_suffix: String,

    /// Catalog file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            translated_suffix: default_translated_suffix(),
            log_infix: default_log_infix(),
            mapping_suffix: default_mapping_suffix(),
            extension: default_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "id".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rate_limit_delay_ms() -> u64 {
    300
}

fn default_command_program() -> String {
    "trans".to_string()
}

fn default_command_args() -> Vec<String> {
    ["-brief", "-no-ansi", "{source}:{target}", "{text}"]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the user's text from {source_language} to {target_language}. \
     Keep every placeholder such as {1}, [2], (3), <4> and markers like <!NEWLINE!> exactly as they are. \
     Reply with the translation only."
        .to_string()
}

fn default_translated_suffix() -> String {
    "_translated".to_string()
}

fn default_log_infix() -> String {
    "_log_".to_string()
}

fn default_mapping_suffix() -> String {
    "_mapping".to_string()
}

fn default_extension() -> String {
    "po".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        language_utils::validate_source_language(&self.source_language)?;
        language_utils::validate_language_code(&self.target_language)?;

        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be at least one second"));
        }

        match self.translation.provider {
            ProviderKind::Command => {
                if self.translation.command.program.trim().is_empty() {
                    return Err(anyhow!("A program is required for the command provider"));
                }
                if !self.translation.command.args.iter().any(|arg| arg.contains("{text}")) {
                    return Err(anyhow!("Command provider arguments must contain {{text}}"));
                }
            }
            ProviderKind::Ollama => {
                Url::parse(&self.translation.ollama.endpoint)
                    .with_context(|| format!("Invalid Ollama endpoint: {}", self.translation.ollama.endpoint))?;
                if self.translation.ollama.model.trim().is_empty() {
                    return Err(anyhow!("A model is required for the Ollama provider"));
                }
            }
            ProviderKind::Mock => {}
        }

        if self.output.extension.trim().is_empty() {
            return Err(anyhow!("Catalog extension cannot be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
