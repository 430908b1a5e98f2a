/*!
 * Per-run translation log.
 *
 * One block is appended per processed record, in record order, while the
 * catalog is being scanned.
 */

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

const HEADER_RULE_WIDTH: usize = 40;
const BLOCK_RULE_WIDTH: usize = 30;

/// Outcome tag of a logged record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Success,
    Error,
    Skipped,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Skipped => "SKIPPED",
        };
        write!(f, "{}", tag)
    }
}

/// One log block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRecord {
    /// 1-based line number, or `first-last` for multiline records
    pub line_range: String,
    pub status: RecordStatus,
    pub original: String,
    pub translated: Option<String>,
    pub reason: Option<String>,
}

impl JournalRecord {
    pub fn success(line_range: String, original: &str, translated: &str) -> Self {
        Self {
            line_range,
            status: RecordStatus::Success,
            original: original.to_string(),
            translated: Some(translated.to_string()),
            reason: None,
        }
    }

    pub fn error(line_range: String, original: &str, reason: impl Into<String>) -> Self {
        Self {
            line_range,
            status: RecordStatus::Error,
            original: original.to_string(),
            translated: None,
            reason: Some(reason.into()),
        }
    }

    pub fn skipped(line_range: String, original: &str, reason: impl Into<String>) -> Self {
        Self {
            line_range,
            status: RecordStatus::Skipped,
            original: original.to_string(),
            translated: None,
            reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for JournalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LINE {} | STATUS: {}", self.line_range, self.status)?;
        writeln!(f, "ORIGINAL: {}", self.original)?;
        if let Some(translated) = &self.translated {
            if !translated.is_empty() && *translated != self.original {
                writeln!(f, "RESULT  : {}", translated)?;
            }
        }
        if let Some(reason) = &self.reason {
            if !reason.is_empty() {
                writeln!(f, "ERROR   : {}", reason)?;
            }
        }
        writeln!(f, "{}", "-".repeat(BLOCK_RULE_WIDTH))
    }
}

/// Sink for per-record log blocks
pub trait TranslationJournal {
    /// Append one block
    fn record(&mut self, entry: &JournalRecord) -> io::Result<()>;
}

/// Journal kept in memory, used by tests and benchmarks
#[derive(Debug, Default)]
pub struct MemoryJournal {
    pub records: Vec<JournalRecord>,
}

impl TranslationJournal for MemoryJournal {
    fn record(&mut self, entry: &JournalRecord) -> io::Result<()> {
        self.records.push(entry.clone());
        Ok(())
    }
}

/// Journal appended to a text file
#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    file: File,
}

impl FileJournal {
    /// Create the log file, truncating any previous content, and write its header
    pub fn create<P: AsRef<Path>>(
        path: P,
        input: &Path,
        source_language: &str,
        target_language: &str,
    ) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::create(&path)?;
        writeln!(file, "=== PO TRANSLATE LOG ===")?;
        writeln!(file, "Date: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "Input: {}", input.display())?;
        writeln!(file, "Language: {} -> {}", source_language, target_language)?;
        writeln!(file, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
        writeln!(file)?;
        file.flush()?;
        drop(file);

        let file = OpenOptions::new().append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranslationJournal for FileJournal {
    fn record(&mut self, entry: &JournalRecord) -> io::Result<()> {
        write!(self.file, "{}", entry)?;
        self.file.flush()
    }
}
