/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::PathBuf;

use potrans::app_config::OutputConfig;
use potrans::file_utils::{CatalogPaths, FileManager};
use crate::common;

/// Test catalog discovery in a directory
#[test]
fn test_find_catalog_files_withMixedFiles_shouldReturnSortedCatalogs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    common::create_test_file(dir, "b.po", "msgid \"b\"\n")?;
    common::create_test_file(dir, "a.PO", &"x".repeat(3000))?;
    common::create_test_file(dir, "readme.txt", "not a catalog")?;
    std::fs::create_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "c.po", "")?;

    let files = FileManager::find_catalog_files(dir, "po")?;
    let names: Vec<String> = files.iter().map(|file| file.display_name()).collect();
    assert_eq!(names, vec!["a.PO", "b.po"]);
    assert_eq!(files[0].size_bytes, 3000);
    assert_eq!(files[0].size_kb(), 2);
    Ok(())
}

/// Test that a leading dot in the extension is accepted
#[test]
fn test_find_catalog_files_withDottedExtension_shouldMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "game.po", "")?;

    let files = FileManager::find_catalog_files(temp_dir.path(), ".po")?;
    assert_eq!(files.len(), 1);
    Ok(())
}

/// Test derived output names
#[test]
fn test_catalogPaths_derive_shouldPlaceOutputsNextToInput() {
    let paths = CatalogPaths::derive("locale/game.po", &OutputConfig::default(), "20240102_030405");

    assert_eq!(paths.input, PathBuf::from("locale/game.po"));
    assert_eq!(paths.translated, PathBuf::from("locale/game_translated.po"));
    assert_eq!(paths.log, PathBuf::from("locale/game_log_20240102_030405.txt"));
    assert_eq!(paths.mapping, PathBuf::from("locale/game_mapping.txt"));
}

/// Test that custom naming is honoured
#[test]
fn test_catalogPaths_derive_withCustomNaming_shouldUseIt() {
    let output = OutputConfig {
        translated_suffix: ".out".to_string(),
        log_infix: "-journal-".to_string(),
        mapping_suffix: ".ids".to_string(),
        extension: "pot".to_string(),
    };
    let paths = CatalogPaths::derive("messages.pot", &output, "stamp");

    assert_eq!(paths.translated, PathBuf::from("messages.out.pot"));
    assert_eq!(paths.log, PathBuf::from("messages-journal-stamp.txt"));
    assert_eq!(paths.mapping, PathBuf::from("messages.ids.txt"));
}

/// Test writing and reading back files, including missing parents
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("game_translated.po");

    FileManager::write_to_file(&path, "msgid \"Hi\"\n")?;
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("out")));
    assert_eq!(FileManager::read_to_string(&path)?, "msgid \"Hi\"\n");
    Ok(())
}

/// Test that reading a missing file fails
#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::read_to_string(temp_dir.path().join("absent.po")).is_err());
    assert!(!FileManager::file_exists(temp_dir.path().join("absent.po")));
    Ok(())
}
