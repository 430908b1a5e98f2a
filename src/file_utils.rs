use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::OutputConfig;

// @module: File and directory utilities

/// A catalog file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl CatalogFile {
    /// Size in whole kilobytes, rounded down
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }

    /// File name for display
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Files written for one translated catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub input: PathBuf,
    pub translated: PathBuf,
    pub log: PathBuf,
    pub mapping: PathBuf,
}

impl CatalogPaths {
    /// Derive output paths next to `input`, stamping the log with `timestamp`
    pub fn derive<P: AsRef<Path>>(input: P, output: &OutputConfig, timestamp: &str) -> Self {
        let input = input.as_ref();
        let parent = input.parent().unwrap_or_else(|| Path::new(""));
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            input: input.to_path_buf(),
            translated: parent.join(format!("{}{}.{}", stem, output.translated_suffix, output.extension)),
            log: parent.join(format!("{}{}{}.txt", stem, output.log_infix, timestamp)),
            mapping: parent.join(format!("{}{}.txt", stem, output.mapping_suffix)),
        }
    }

    /// Derive output paths stamped with the current local time
    pub fn derive_now<P: AsRef<Path>>(input: P, output: &OutputConfig) -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::derive(input, output, &timestamp)
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Catalog files directly inside `dir` (not recursive), sorted by name
    pub fn find_catalog_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<CatalogFile>> {
        let extension = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
            if matches {
                let size_bytes = entry
                    .metadata()
                    .with_context(|| format!("Failed to read metadata: {:?}", path))?
                    .len();
                result.push(CatalogFile {
                    path: path.to_path_buf(),
                    size_bytes,
                });
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
