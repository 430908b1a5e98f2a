/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::str::FromStr;

use potrans::app_config::{Config, LogLevel, ProviderKind};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "id");
    assert_eq!(config.translation.provider, ProviderKind::Command);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.translation.rate_limit_delay_ms, 300);
    assert_eq!(config.translation.command.program, "trans");
    assert_eq!(
        config.translation.command.args,
        vec!["-brief", "-no-ansi", "{source}:{target}", "{text}"]
    );
    assert_eq!(config.output.translated_suffix, "_translated");
    assert_eq!(config.output.extension, "po");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "auto".to_string();
    assert!(config.validate().is_ok());

    // Invalid target language
    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "zh-CN".to_string();
    assert!(config.validate().is_ok());

    // Zero timeout
    config.translation.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.translation.timeout_secs = 10;

    // Command without a text placeholder
    config.translation.command.args = vec!["-brief".to_string()];
    assert!(config.validate().is_err());

    // The command settings are irrelevant to other providers
    config.translation.provider = ProviderKind::Mock;
    assert!(config.validate().is_ok());

    // Ollama needs a parseable endpoint
    config.translation.provider = ProviderKind::Ollama;
    config.translation.ollama.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test that a partial file falls back to defaults for missing fields
#[test]
fn test_config_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "potrans.json",
        r#"{ "target_language": "ja", "translation": { "provider": "ollama" } }"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.translation.provider, ProviderKind::Ollama);
    assert_eq!(config.translation.ollama.endpoint, "http://localhost:11434");
    assert_eq!(config.translation.timeout_secs, 30);
    Ok(())
}

/// Test that a saved config loads back with the same values
#[test]
fn test_config_save_thenLoad_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("potrans.json");

    let mut config = Config::default();
    config.target_language = "fr".to_string();
    config.translation.rate_limit_delay_ms = 50;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.target_language, "fr");
    assert_eq!(loaded.translation.rate_limit_delay_ms, 50);
    Ok(())
}

/// Test that a broken file is reported, not replaced
#[test]
fn test_config_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "potrans.json", "{ not json")?;
    assert!(Config::load(&path).is_err());
    Ok(())
}

/// Test provider kind parsing
#[test]
fn test_providerKind_fromStr_shouldParseKnownNames() {
    assert_eq!(ProviderKind::from_str("Command").unwrap(), ProviderKind::Command);
    assert_eq!(ProviderKind::from_str("ollama").unwrap(), ProviderKind::Ollama);
    assert_eq!(ProviderKind::from_str("MOCK").unwrap(), ProviderKind::Mock);
    assert!(ProviderKind::from_str("openai").is_err());
    assert_eq!(ProviderKind::Ollama.to_string(), "ollama");
}

/// Test log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
