/*!
 * Integration tests for the catalog translation workflow
 */

use anyhow::Result;
use std::fs;

use potrans::app_controller::Controller;
use potrans::catalog::{CatalogScanner, MemoryJournal, RunStats};
use potrans::errors::AppError;
use potrans::providers::mock::MockProvider;
use potrans::translation::TranslationGateway;
use crate::common;

const EXPECTED_OUTPUT: &str = r##"# Sample catalog
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Hello {name}"
msgstr "[id] Hello {1}"

msgid "@jump_scene"
msgstr ""

msgid ""
"First line "
"second line"
msgstr ""
"[id] First"
"line second line"
"##;

/// Test the whole run: translated catalog, log file and mapping file
#[tokio::test]
async fn test_controller_run_withMockProvider_shouldWriteAllOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_catalog(temp_dir.path(), "game.po")?;

    let controller = Controller::with_config(common::mock_config())?;
    let report = controller.run(input.clone(), false).await?;

    assert_eq!(report.paths.translated, temp_dir.path().join("game_translated.po"));
    assert_eq!(report.paths.mapping, temp_dir.path().join("game_mapping.txt"));
    assert_eq!(fs::read_to_string(&report.paths.translated)?, EXPECTED_OUTPUT);

    assert_eq!(
        report.stats,
        RunStats {
            success: 3,
            failed: 0,
            errors: 0,
            skipped: 1,
            total_entries: 4,
        }
    );

    // Input is never modified
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_CATALOG);
    Ok(())
}

/// Test the log file header and per-record blocks
#[tokio::test]
async fn test_controller_run_shouldWriteLogBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_catalog(temp_dir.path(), "game.po")?;

    let controller = Controller::with_config(common::mock_config())?;
    let report = controller.run(input.clone(), false).await?;

    let log_name = report.paths.log.file_name().unwrap().to_string_lossy().to_string();
    assert!(log_name.starts_with("game_log_"), "unexpected log name {}", log_name);
    assert!(log_name.ends_with(".txt"));

    let log = fs::read_to_string(&report.paths.log)?;
    assert!(log.starts_with("=== PO TRANSLATE LOG ===\nDate: "));
    assert!(log.contains(&format!("Input: {}\n", input.display())));
    assert!(log.contains(&format!("Language: en -> id\n{}\n\n", "=".repeat(40))));

    assert!(log.contains("LINE 6 | STATUS: SUCCESS\nORIGINAL: Hello {name}\nRESULT  : [id] Hello {1}\n"));
    assert!(log.contains("LINE 9 | STATUS: SKIPPED\nORIGINAL: @jump_scene\nERROR   : Command skipped\n"));
    assert!(log.contains("LINE 13-14 | STATUS: SUCCESS\nORIGINAL: First line second line\n"));
    assert_eq!(log.matches(&"-".repeat(30)).count(), 3);
    Ok(())
}

/// Test the exported placeholder mapping
#[tokio::test]
async fn test_controller_run_shouldWriteMapping() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_catalog(temp_dir.path(), "game.po")?;

    let controller = Controller::with_config(common::mock_config())?;
    let report = controller.run(input, false).await?;

    let mapping = fs::read_to_string(&report.paths.mapping)?;
    assert_eq!(
        mapping,
        "=== TAG MAPPING ===\n{1} = {name}\n\n\
         === VARIABLE MAPPING ===\n\n\
         === EMOTION MAPPING ===\n\n\
         === BRACKET MAPPING ===\n"
    );
    Ok(())
}

/// Test that an existing translation is only replaced with force
#[tokio::test]
async fn test_controller_run_withExistingOutput_shouldRequireForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_catalog(temp_dir.path(), "game.po")?;
    let existing = common::create_test_file(temp_dir.path(), "game_translated.po", "keep me")?;

    let controller = Controller::with_config(common::mock_config())?;
    let error = controller.run(input.clone(), false).await.unwrap_err();
    assert!(matches!(error, AppError::OutputExists(_)));
    assert_eq!(error.exit_code(), 5);
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    controller.run(input, true).await?;
    assert_eq!(fs::read_to_string(&existing)?, EXPECTED_OUTPUT);
    Ok(())
}

/// Test that a missing input is reported with its own exit code
#[tokio::test]
async fn test_controller_run_withMissingInput_shouldFailWithInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::mock_config())?;

    let error = controller.run(temp_dir.path().join("absent.po"), false).await.unwrap_err();
    assert!(matches!(error, AppError::InputNotFound(_)));
    assert_eq!(error.exit_code(), 2);
    Ok(())
}

/// Test that interactive mode refuses an empty directory before prompting
#[tokio::test]
async fn test_controller_runInteractive_withNoCatalogs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a catalog")?;

    let mut controller = Controller::with_config(common::mock_config())?;
    let error = controller.run_interactive(temp_dir.path()).await.unwrap_err();
    assert!(matches!(error, AppError::NoCatalogFiles(_)));
    assert_eq!(error.exit_code(), 4);
    Ok(())
}

/// Test that a failing provider leaves msgstr blank and the run still completes
#[tokio::test]
async fn test_scanner_withFailingProvider_shouldCompleteAndCountFailures() -> Result<()> {
    let provider = MockProvider::failing();
    let gateway = TranslationGateway::new(Box::new(provider.clone()), "en", "id")
        .with_rate_limit_delay(std::time::Duration::ZERO);
    let mut journal = MemoryJournal::default();

    let outcome = CatalogScanner::new(&gateway)
        .translate_catalog(common::SAMPLE_CATALOG, &mut journal, |_, _| {})
        .await?;

    // Hello and the multiline entry reach the provider; the command token does not
    assert_eq!(provider.request_count(), 2);
    assert_eq!(outcome.stats.failed, 2);
    assert_eq!(outcome.stats.success, 1);
    assert_eq!(outcome.stats.skipped, 1);
    assert_eq!(outcome.content(), common::SAMPLE_CATALOG);
    assert_eq!(journal.records.len(), 3);
    Ok(())
}

/// Test that an intermittent provider only fails the affected records
#[tokio::test]
async fn test_scanner_withIntermittentProvider_shouldTranslateTheRest() -> Result<()> {
    let content = "msgid \"One\"\nmsgstr \"\"\n\nmsgid \"Two\"\nmsgstr \"\"\n\nmsgid \"Three\"\nmsgstr \"\"\n";
    let gateway = TranslationGateway::new(Box::new(MockProvider::intermittent(2)), "en", "de")
        .with_rate_limit_delay(std::time::Duration::ZERO);
    let mut journal = MemoryJournal::default();

    let outcome = CatalogScanner::new(&gateway)
        .translate_catalog(content, &mut journal, |_, _| {})
        .await?;

    assert_eq!(
        outcome.content(),
        "msgid \"One\"\nmsgstr \"[de] One\"\n\nmsgid \"Two\"\nmsgstr \"\"\n\nmsgid \"Three\"\nmsgstr \"[de] Three\"\n"
    );
    assert_eq!(outcome.stats.success, 2);
    assert_eq!(outcome.stats.failed, 1);
    Ok(())
}
