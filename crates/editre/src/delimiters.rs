// Word delimiter configuration
// Word-character semantics (`\w`, `<`, `>`, `\b`) are delimiter-driven:
// a byte is a word character iff it is not in the active delimiter table.
// A process-wide default can be replaced at runtime; individual exec calls
// may override it without touching the global.

use once_cell::sync::Lazy;
use std::sync::RwLock;

use crate::program::CharBitmap;

/// Delimiters used when no explicit set has been installed.
pub const DEFAULT_DELIMITERS: &str = ".,/\\`'!|@#%^&*()-=+{}[]\":;<>?~";

/// Set of bytes treated as word delimiters. NUL, space, tab, and newline
/// are always delimiters regardless of the configured string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelimiterTable {
    set: CharBitmap,
}

impl DelimiterTable {
    pub fn new(delimiters: &str) -> Self {
        let mut set = CharBitmap::empty();
        set.insert_str(delimiters);
        set.insert(0);
        set.insert(b' ');
        set.insert(b'\t');
        set.insert(b'\n');
        DelimiterTable { set }
    }

    #[inline(always)]
    pub fn is_delimiter(&self, byte: u8) -> bool {
        self.set.contains(byte)
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        DelimiterTable::new(DEFAULT_DELIMITERS)
    }
}

static DEFAULT_TABLE: Lazy<RwLock<DelimiterTable>> =
    Lazy::new(|| RwLock::new(DelimiterTable::default()));

/// Install the process-wide default delimiter set; `None` restores the
/// built-in default.
pub fn set_default_delimiters(delimiters: Option<&str>) {
    let table = match delimiters {
        Some(d) => DelimiterTable::new(d),
        None => DelimiterTable::default(),
    };
    if let Ok(mut guard) = DEFAULT_TABLE.write() {
        *guard = table;
    }
}

/// Snapshot of the current process-wide default.
pub(crate) fn default_table() -> DelimiterTable {
    DEFAULT_TABLE
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}
