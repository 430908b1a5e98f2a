/*!
 * Gettext catalog handling.
 *
 * - `markup`: substitution tables and protection of markup and escapes
 * - `scanner`: the record state machine that rewrites a catalog
 * - `reflow`: redistribution of translated words over the original lines
 * - `journal`: the per-run translation log
 * - `mapping`: export of the substitution tables
 */

pub use self::journal::{FileJournal, JournalRecord, MemoryJournal, RecordStatus, TranslationJournal};
pub use self::mapping::render_mapping;
pub use self::markup::{MarkupKind, MarkupTables, SubstitutionTable};
pub use self::reflow::split_translated_text;
pub use self::scanner::{CatalogOutcome, CatalogScanner, RunStats};

pub mod journal;
pub mod mapping;
pub mod markup;
pub mod reflow;
pub mod scanner;
