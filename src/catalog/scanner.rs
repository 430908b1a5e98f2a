/*!
 * Line-oriented scanner that translates a PO catalog in place.
 *
 * Two record shapes are recognised:
 *
 * ```text
 * msgid "Single line"        msgid ""
 * msgstr ""                  "First part "
 *                            "second part"
 *                            msgstr ""
 * ```
 *
 * Every other line is copied through untouched. The first pass counts records
 * for progress reporting; the second pass rewrites them one at a time, in
 * file order, through the translation gateway.
 */

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::journal::{JournalRecord, TranslationJournal};
use super::markup::MarkupTables;
use super::reflow::split_translated_text;
use crate::errors::{CatalogError, GatewayError};
use crate::translation::TranslationGateway;

const MSGID_PREFIX: &str = "msgid \"";
const MSGID_EMPTY: &str = "msgid \"\"";
const MSGSTR_PREFIX: &str = "msgstr";
const MSGSTR_EMPTY: &str = "msgstr \"\"";

// @const: Inner text of a single-line msgid, escapes included
static MSGID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*msgid\s+"(.*)"\s*$"#).expect("Invalid msgid regex")
});

/// Outcome counters of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records translated, plus records passed through as commands or resources
    pub success: usize,
    /// Records the gateway failed to translate
    pub failed: usize,
    /// Failed records whose provider could not be reached at all
    pub errors: usize,
    /// Multiline records with nothing but whitespace
    pub skipped: usize,
    /// Records counted in the first pass
    pub total_entries: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} translated, {} failed ({} errors), {} skipped",
            self.total_entries, self.success, self.failed, self.errors, self.skipped
        )
    }
}

/// Rewritten catalog plus what was learned while producing it
#[derive(Debug, Clone)]
pub struct CatalogOutcome {
    /// Output lines, terminators included
    pub lines: Vec<String>,
    pub stats: RunStats,
    pub tables: MarkupTables,
}

impl CatalogOutcome {
    /// Full text of the rewritten catalog
    pub fn content(&self) -> String {
        self.lines.concat()
    }
}

/// Percentage of records done, rounded down
pub fn progress_percent(done: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    (done as u64 * 100) / total as u64
}

/// Split catalog text into lines, keeping each line's terminator
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// First pass: number of records the second pass may translate
pub fn count_records(lines: &[&str]) -> usize {
    let mut total = 0;
    let mut index = 0;
    while index < lines.len() {
        let trimmed = lines[index].trim();
        if is_single_line_msgid(trimmed) {
            total += 1;
        } else if trimmed == MSGID_EMPTY {
            while index + 1 < lines.len() && !lines[index + 1].trim().starts_with(MSGSTR_EMPTY) {
                index += 1;
            }
            total += 1;
        }
        index += 1;
    }
    total
}

fn is_single_line_msgid(trimmed: &str) -> bool {
    trimmed.starts_with(MSGID_PREFIX) && trimmed != MSGID_EMPTY
}

/// Inner text of a `msgid "..."` line
fn single_line_text(line: &str) -> Option<&str> {
    if !is_single_line_msgid(line.trim()) {
        return None;
    }
    MSGID_REGEX
        .captures(line.trim_end_matches(['\r', '\n']))
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str())
}

fn is_quoted(trimmed: &str) -> bool {
    trimmed.starts_with('"') && trimmed.ends_with('"')
}

/// Text between the outer quotes, no unescaping
fn quoted_inner(trimmed: &str) -> &str {
    if trimmed.len() >= 2 { &trimmed[1..trimmed.len() - 1] } else { "" }
}

/// The line's own terminator, possibly empty on the last line
fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn ending_or_default(line: &str) -> &str {
    match line_ending(line) {
        "" => "\n",
        ending => ending,
    }
}

/// `line` with a terminator, for lines that get new lines appended after them
fn terminated(line: &str) -> String {
    if line_ending(line).is_empty() {
        format!("{}\n", line)
    } else {
        line.to_string()
    }
}

/// Keep provider output inside one PO string: bare quotes and raw line breaks get escaped
fn po_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push(ch);
                match chars.next() {
                    Some(next) => out.push(next),
                    // A lone trailing backslash would escape the closing quote
                    None => out.push('\\'),
                }
            }
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// A multiline msgid collected up to its `msgstr ""` marker
#[derive(Debug)]
struct PendingRecord {
    /// 1-based line of the `msgid ""` marker
    start_line: usize,
    /// Raw lines held back until the record ends
    buffered: Vec<String>,
    continuation_count: usize,
    text: String,
}

impl PendingRecord {
    fn new(index: usize, marker_line: &str) -> Self {
        Self {
            start_line: index + 1,
            buffered: vec![marker_line.to_string()],
            continuation_count: 0,
            text: String::new(),
        }
    }

    fn push_continuation(&mut self, line: &str, inner: &str) {
        self.text.push_str(inner);
        self.buffered.push(line.to_string());
        self.continuation_count += 1;
    }

    /// Lines from the first to the last continuation, given the 0-based marker index
    fn line_range(&self, msgstr_index: usize) -> String {
        format!("{}-{}", self.start_line + 1, msgstr_index)
    }
}

/// Mutable bookkeeping of one scan
struct ScanState<'j, J: TranslationJournal + ?Sized> {
    output: Vec<String>,
    stats: RunStats,
    done: usize,
    journal: &'j mut J,
}

impl<J: TranslationJournal + ?Sized> ScanState<'_, J> {
    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn advance<F: FnMut(usize, usize)>(&mut self, on_progress: &mut F) {
        self.done += 1;
        debug!(
            "Translating... {}/{} ({}%)",
            self.done,
            self.stats.total_entries,
            progress_percent(self.done, self.stats.total_entries)
        );
        on_progress(self.done, self.stats.total_entries);
    }

    fn record_success(&mut self, entry: JournalRecord) -> Result<(), CatalogError> {
        self.stats.success += 1;
        self.journal.record(&entry)?;
        Ok(())
    }

    fn record_failure(&mut self, reason: &GatewayError, entry: JournalRecord) -> Result<(), CatalogError> {
        self.stats.failed += 1;
        if reason.is_transport() {
            self.stats.errors += 1;
        }
        self.journal.record(&entry)?;
        Ok(())
    }
}

/// Translates catalogs through one gateway, one record at a time
pub struct CatalogScanner<'g> {
    gateway: &'g TranslationGateway,
}

impl<'g> CatalogScanner<'g> {
    pub fn new(gateway: &'g TranslationGateway) -> Self {
        Self { gateway }
    }

    /// Rewrite `content`, logging every attempted record to `journal`.
    ///
    /// `on_progress` receives `(done, total)` each time a record is attempted.
    /// Only journal I/O errors abort the scan.
    pub async fn translate_catalog<J, F>(
        &self,
        content: &str,
        journal: &mut J,
        mut on_progress: F,
    ) -> Result<CatalogOutcome, CatalogError>
    where
        J: TranslationJournal + ?Sized,
        F: FnMut(usize, usize),
    {
        let tables = MarkupTables::build(content);
        let lines = split_lines(content);
        let mut state = ScanState {
            output: Vec::with_capacity(lines.len()),
            stats: RunStats {
                total_entries: count_records(&lines),
                ..RunStats::default()
            },
            done: 0,
            journal,
        };

        let mut pending: Option<PendingRecord> = None;
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];
            let trimmed = line.trim();

            match pending.take() {
                Some(mut record) => {
                    if is_quoted(trimmed) {
                        record.push_continuation(line, quoted_inner(trimmed));
                        pending = Some(record);
                    } else if trimmed.starts_with(MSGSTR_EMPTY) {
                        self.finish_multiline(record, index, line, &tables, &mut state, &mut on_progress)
                            .await?;
                    } else {
                        // Stray line inside a record: kept in place, not part of the text
                        record.buffered.push(line.to_string());
                        pending = Some(record);
                    }
                }
                None if trimmed == MSGID_EMPTY => {
                    pending = Some(PendingRecord::new(index, line));
                }
                None => match single_line_text(line) {
                    Some(text) if !text.trim().is_empty() => {
                        let next = lines.get(index + 1).copied();
                        let consumed = self
                            .translate_single(index, line, text, next, &tables, &mut state, &mut on_progress)
                            .await?;
                        if consumed {
                            index += 1;
                        }
                    }
                    _ => state.emit(line),
                },
            }

            index += 1;
        }

        if let Some(record) = pending {
            debug!("Unterminated multiline msgid at line {}, copied unchanged", record.start_line);
            state.output.extend(record.buffered);
        }

        Ok(CatalogOutcome {
            lines: state.output,
            stats: state.stats,
            tables,
        })
    }

    /// Translate one `msgid "..."` record. Returns whether the following msgstr line was consumed.
    #[allow(clippy::too_many_arguments)]
    async fn translate_single<J, F>(
        &self,
        index: usize,
        line: &str,
        original: &str,
        next: Option<&str>,
        tables: &MarkupTables,
        state: &mut ScanState<'_, J>,
        on_progress: &mut F,
    ) -> Result<bool, CatalogError>
    where
        J: TranslationJournal + ?Sized,
        F: FnMut(usize, usize),
    {
        state.advance(on_progress);
        let protected = tables.protect(original);
        let line_number = (index + 1).to_string();
        let msgstr_line = next.filter(|next| next.trim().starts_with(MSGSTR_PREFIX));

        match self.gateway.translate(&protected).await {
            Ok(translated) => {
                let translated = po_safe(&translated);
                let ending = match msgstr_line {
                    Some(msgstr) => line_ending(msgstr),
                    None => line_ending(line),
                };
                state.emit(terminated(line));
                state.emit(format!("msgstr \"{}\"{}", translated, ending));
                state.record_success(JournalRecord::success(line_number, original, &translated))?;
                Ok(msgstr_line.is_some())
            }
            Err(reason) if reason.is_skip() => {
                state.emit(line);
                state.record_success(JournalRecord::skipped(line_number, original, reason.to_string()))?;
                Ok(false)
            }
            Err(reason) => {
                // A stale translation is never written back
                match msgstr_line {
                    Some(msgstr) => {
                        state.emit(terminated(line));
                        state.emit(format!("{}{}", MSGSTR_EMPTY, line_ending(msgstr)));
                    }
                    None => state.emit(line),
                }
                let entry = JournalRecord::error(line_number, original, reason.to_string());
                state.record_failure(&reason, entry)?;
                Ok(msgstr_line.is_some())
            }
        }
    }

    /// Close a multiline record at its `msgstr ""` marker
    async fn finish_multiline<J, F>(
        &self,
        record: PendingRecord,
        index: usize,
        msgstr_line: &str,
        tables: &MarkupTables,
        state: &mut ScanState<'_, J>,
        on_progress: &mut F,
    ) -> Result<(), CatalogError>
    where
        J: TranslationJournal + ?Sized,
        F: FnMut(usize, usize),
    {
        let line_range = record.line_range(index);
        let PendingRecord {
            buffered,
            continuation_count,
            text,
            ..
        } = record;
        state.output.extend(buffered);

        if text.trim().is_empty() {
            state.emit(msgstr_line);
            state.stats.skipped += 1;
            return Ok(());
        }

        state.advance(on_progress);
        let protected = tables.protect(&text);

        match self.gateway.translate(&protected).await {
            Ok(translated) => {
                let translated = po_safe(&translated);
                let reflowed = split_translated_text(&translated, continuation_count);
                let ending = ending_or_default(msgstr_line);
                if reflowed.is_empty() {
                    state.emit(msgstr_line);
                } else {
                    state.emit(terminated(msgstr_line));
                }
                for reflowed_line in reflowed {
                    state.emit(format!("{}{}", reflowed_line, ending));
                }
                state.record_success(JournalRecord::success(line_range, &text, &translated))
            }
            Err(reason) if reason.is_skip() => {
                state.emit(msgstr_line);
                state.record_success(JournalRecord::skipped(line_range, &text, reason.to_string()))
            }
            Err(reason) => {
                state.emit(msgstr_line);
                let entry = JournalRecord::error(line_range, &text, reason.to_string());
                state.record_failure(&reason, entry)
            }
        }
    }
}
