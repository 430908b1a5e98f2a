/*!
 * Markup protection for catalog text.
 *
 * Bracketed markup (`{tag}`, `[var]`, `(note)`, `<token>`) is replaced with
 * numeric ids before text reaches a translation provider, and the five PO
 * escape sequences are swapped for sentinel markers. Ids are not put back
 * after translation: the exported mapping file lists what each id stands for.
 */

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Non-nesting patterns, one per markup kind. A match never spans its own delimiters.
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("Invalid tag regex"));
static VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("Invalid variable regex"));
static PAREN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]+)\)").expect("Invalid parenthetical regex"));
static ANGLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^<>]+)>").expect("Invalid angle regex"));

/// Escape sequences as they appear in PO text, paired with their sentinels
pub const ESCAPE_SENTINELS: [(&str, &str); 5] = [
    ("\\n", "<!NEWLINE!>"),
    ("\\t", "<!TAB!>"),
    ("\\\"", "<!QUOTE!>"),
    ("\\\\", "<!BACKSLASH!>"),
    ("\\r", "<!CARRIAGE!>"),
];

/// The four classes of protected markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupKind {
    /// `{...}`
    Tag,
    /// `[...]`
    Variable,
    /// `(...)`
    Parenthetical,
    /// `<...>`
    Angle,
}

impl MarkupKind {
    /// All kinds, in substitution order
    pub const ALL: [MarkupKind; 4] = [Self::Tag, Self::Variable, Self::Parenthetical, Self::Angle];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Tag => &TAG_REGEX,
            Self::Variable => &VARIABLE_REGEX,
            Self::Parenthetical => &PAREN_REGEX,
            Self::Angle => &ANGLE_REGEX,
        }
    }

    /// Opening and closing delimiter
    pub fn delimiters(self) -> (char, char) {
        match self {
            Self::Tag => ('{', '}'),
            Self::Variable => ('[', ']'),
            Self::Parenthetical => ('(', ')'),
            Self::Angle => ('<', '>'),
        }
    }

    /// Section label used in the mapping export
    pub fn label(self) -> &'static str {
        match self {
            Self::Tag => "TAG",
            Self::Variable => "VARIABLE",
            Self::Parenthetical => "EMOTION",
            Self::Angle => "BRACKET",
        }
    }

    /// Wrap `inner` in this kind's delimiters
    pub fn wrap(self, inner: &str) -> String {
        let (open, close) = self.delimiters();
        format!("{}{}{}", open, inner, close)
    }

    // Numbers in parentheses ("(1.5)", "(1,000)") are left alone
    fn excludes(self, inner: &str) -> bool {
        self == Self::Parenthetical && is_numeric_note(inner)
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}

/// True when `inner` has at least one digit and nothing but digits, dots and commas
fn is_numeric_note(inner: &str) -> bool {
    let digits: String = inner.chars().filter(|c| *c != '.' && *c != ',').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Dense id assignment for the distinct inner texts of one markup kind
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    kind: MarkupKind,
    ids: HashMap<String, u32>,
    // inner texts in id order; entry i has id i + 1
    entries: Vec<String>,
}

impl SubstitutionTable {
    /// Create an empty table
    pub fn new(kind: MarkupKind) -> Self {
        Self {
            kind,
            ids: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Scan `content` and assign ids in first-discovery order
    pub fn build(kind: MarkupKind, content: &str) -> Self {
        let mut table = Self::new(kind);
        for captures in kind.regex().captures_iter(content) {
            let inner = &captures[1];
            if kind.excludes(inner) {
                continue;
            }
            table.insert(inner);
        }
        table
    }

    /// Add `inner` if absent and return its id
    pub fn insert(&mut self, inner: &str) -> u32 {
        if let Some(id) = self.ids.get(inner) {
            return *id;
        }
        self.entries.push(inner.to_string());
        let id = self.entries.len() as u32;
        self.ids.insert(inner.to_string(), id);
        id
    }

    /// Id assigned to `inner`, if any
    pub fn lookup(&self, inner: &str) -> Option<u32> {
        self.ids.get(inner).copied()
    }

    /// Markup kind this table covers
    pub fn kind(&self) -> MarkupKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, inner text)` pairs by ascending id
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, inner)| (index as u32 + 1, inner.as_str()))
    }

    /// Replacement text for one matched span
    fn substitute(&self, inner: &str) -> String {
        match (self.lookup(inner), self.kind) {
            (Some(id), kind) => kind.wrap(&id.to_string()),
            (None, MarkupKind::Parenthetical) => self.kind.wrap(inner),
            (None, kind) => kind.wrap("?"),
        }
    }

    fn protect(&self, text: &str) -> String {
        self.kind
            .regex()
            .replace_all(text, |captures: &Captures| self.substitute(&captures[1]))
            .into_owned()
    }
}

/// The four substitution tables of one processed file
#[derive(Debug, Clone)]
pub struct MarkupTables {
    pub tags: SubstitutionTable,
    pub variables: SubstitutionTable,
    pub parentheticals: SubstitutionTable,
    pub angles: SubstitutionTable,
}

impl MarkupTables {
    /// Build all four tables from the full text of a catalog
    pub fn build(content: &str) -> Self {
        Self {
            tags: SubstitutionTable::build(MarkupKind::Tag, content),
            variables: SubstitutionTable::build(MarkupKind::Variable, content),
            parentheticals: SubstitutionTable::build(MarkupKind::Parenthetical, content),
            angles: SubstitutionTable::build(MarkupKind::Angle, content),
        }
    }

    /// Table for `kind`
    pub fn table(&self, kind: MarkupKind) -> &SubstitutionTable {
        match kind {
            MarkupKind::Tag => &self.tags,
            MarkupKind::Variable => &self.variables,
            MarkupKind::Parenthetical => &self.parentheticals,
            MarkupKind::Angle => &self.angles,
        }
    }

    /// Tables in export order
    pub fn iter(&self) -> impl Iterator<Item = &SubstitutionTable> {
        MarkupKind::ALL.into_iter().map(move |kind| self.table(kind))
    }

    /// Replace markup with ids, then escape sequences with sentinels
    pub fn protect(&self, text: &str) -> String {
        // Braces go first, so `[a {b}]` no longer matches its table and degrades to `[?]`
        let substituted = MarkupKind::ALL
            .into_iter()
            .fold(text.to_string(), |acc, kind| self.table(kind).protect(&acc));
        protect_escapes(&substituted)
    }
}

/// Swap each two-character escape sequence for its sentinel.
///
/// The text is scanned left to right so `\\n` reads as an escaped backslash
/// followed by `n`, never as a backslash followed by a newline escape.
pub fn protect_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let sentinel = chars.peek().and_then(|next| sentinel_for(*next));
            if let Some(sentinel) = sentinel {
                out.push_str(sentinel);
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Put the escape sequences back in place of their sentinels
pub fn restore_escapes(text: &str) -> String {
    ESCAPE_SENTINELS
        .iter()
        .fold(text.to_string(), |acc, (escape, sentinel)| acc.replace(sentinel, escape))
}

fn sentinel_for(escaped: char) -> Option<&'static str> {
    ESCAPE_SENTINELS
        .iter()
        .find(|(escape, _)| escape.ends_with(escaped))
        .map(|(_, sentinel)| *sentinel)
}
