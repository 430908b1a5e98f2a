/*!
 * Integration tests for the translation gateway and its providers
 */

use anyhow::Result;
use std::time::Duration;

use potrans::app_config::ProviderKind;
use potrans::catalog::{CatalogScanner, MemoryJournal, RecordStatus};
use potrans::errors::GatewayError;
use potrans::providers::command::CommandProvider;
use potrans::providers::mock::MockProvider;
use potrans::translation::TranslationGateway;
use crate::common;

fn command_gateway(program: &str, args: &[&str]) -> TranslationGateway {
    let provider = CommandProvider::new(program, args.iter().map(|arg| arg.to_string()).collect());
    TranslationGateway::new(Box::new(provider), "en", "id").with_rate_limit_delay(Duration::ZERO)
}

/// Test a whole catalog through a real process
#[cfg(unix)]
#[tokio::test]
async fn test_scanner_withEchoCommand_shouldWriteCommandOutput() -> Result<()> {
    let gateway = command_gateway("echo", &["{target}:", "{text}"]);
    let content = "msgid \"Hello {name}\"\nmsgstr \"\"\n\nmsgid \"Line\\none\"\nmsgstr \"\"\n";
    let mut journal = MemoryJournal::default();

    let outcome = CatalogScanner::new(&gateway)
        .translate_catalog(content, &mut journal, |_, _| {})
        .await?;

    assert_eq!(
        outcome.content(),
        "msgid \"Hello {name}\"\nmsgstr \"id: Hello {1}\"\n\nmsgid \"Line\\none\"\nmsgstr \"id: Line\\none\"\n"
    );
    assert_eq!(outcome.stats.success, 2);
    assert!(journal.records.iter().all(|record| record.status == RecordStatus::Success));
    Ok(())
}

/// Test that text with shell metacharacters reaches the process verbatim
#[cfg(unix)]
#[tokio::test]
async fn test_translate_withShellMetacharacters_shouldPassTextVerbatim() {
    let gateway = command_gateway("echo", &["{text}"]);
    let text = "Don't $HOME `ls` ; & |";
    assert_eq!(gateway.translate(text).await.unwrap(), text);
}

/// Test that a hanging process is cut off by the timeout
#[cfg(unix)]
#[tokio::test]
async fn test_translate_withHangingCommand_shouldTimeOut() {
    let gateway = command_gateway("sh", &["-c", "sleep 5", "sh", "{text}"]).with_timeout(Duration::from_millis(200));
    let start = std::time::Instant::now();
    assert_eq!(gateway.translate("Hello").await, Err(GatewayError::Timeout));
    assert!(start.elapsed() < Duration::from_secs(5));
}

/// Test that a non-zero exit is reported as a command failure
#[cfg(unix)]
#[tokio::test]
async fn test_translate_withFailingCommand_shouldReportCommandFailure() {
    let gateway = command_gateway("sh", &["-c", "exit 3", "sh", "{text}"]);
    let result = gateway.translate("Hello").await;
    assert!(matches!(result, Err(GatewayError::CommandFailed(_))));
    assert_eq!(result.unwrap_err().to_string(), "Translation command failed");
}

/// Test that a missing program counts as an error, not just a failure
#[tokio::test]
async fn test_scanner_withMissingProgram_shouldCountErrors() -> Result<()> {
    let gateway = command_gateway("potrans-no-such-translator", &["{text}"]);
    let mut journal = MemoryJournal::default();

    let outcome = CatalogScanner::new(&gateway)
        .translate_catalog("msgid \"Hello\"\nmsgstr \"Old\"\n", &mut journal, |_, _| {})
        .await?;

    assert_eq!(outcome.content(), "msgid \"Hello\"\nmsgstr \"\"\n");
    assert_eq!(outcome.stats.failed, 1);
    assert_eq!(outcome.stats.errors, 1);
    assert!(journal.records[0].reason.as_deref().unwrap_or_default().starts_with("Error: "));
    Ok(())
}

/// Test that the configured provider is the one used
#[tokio::test]
async fn test_gateway_fromConfig_shouldHonourProviderAndLanguages() -> Result<()> {
    let mut config = common::mock_config();
    config.target_language = "ja".to_string();

    let gateway = TranslationGateway::from_config(&config)?;
    assert_eq!(gateway.provider_name(), "mock");
    assert_eq!(gateway.target_language(), "ja");
    assert_eq!(gateway.translate("Hello").await.unwrap(), "[ja] Hello");

    config.translation.provider = ProviderKind::Command;
    let gateway = TranslationGateway::from_config(&config)?;
    assert_eq!(gateway.provider_name(), "trans");
    Ok(())
}

/// Test that screened text never reaches the provider
#[test]
fn test_translate_withResourcePath_shouldSkipWithoutCall() {
    let provider = MockProvider::working();
    let gateway = TranslationGateway::new(Box::new(provider.clone()), "en", "id")
        .with_rate_limit_delay(Duration::ZERO);

    tokio_test::block_on(async {
        assert_eq!(gateway.translate("res://scenes/intro.tscn").await, Err(GatewayError::Skipped));
        assert_eq!(gateway.translate("bgm_theme.mp3").await, Err(GatewayError::Skipped));
        assert_eq!(gateway.translate(" \t ").await, Err(GatewayError::EmptyInput));
    });
    assert_eq!(provider.request_count(), 0);
}
