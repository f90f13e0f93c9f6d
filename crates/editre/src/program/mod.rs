// Compiled pattern representation
// A flat node array with relative links, executed by exec::ExecState.

mod charset;
mod opcode;

pub use charset::CharBitmap;
pub use opcode::{ClassId, Op, Operand};

/// First-character analysis attached to a compiled program.
///
/// Lets the scan loop skip start positions that provably cannot begin a
/// match. Pure optimization; the node program alone is already correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartHint {
    /// No usable hint; every position must be attempted.
    Any,
    /// The match must begin with this exact byte.
    Literal(u8),
    /// The match must begin at a line start.
    LineStart,
}

/// A single program node: an operation plus the relative offset of the node
/// that follows it. Negative offsets are loop-back edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub op: Op,
    pub next: i32,
}

/// Compiled form of a pattern. Immutable once built; one program may be
/// executed any number of times, in either scan direction, and shared
/// read-only across calls.
#[derive(Clone, Debug)]
pub struct Program {
    pub(crate) nodes: Vec<Node>,
    pub(crate) classes: Vec<CharBitmap>,
    pub(crate) group_count: u8,
    pub(crate) counter_count: u8,
    pub(crate) start: StartHint,
    pub(crate) top_entry: Option<usize>,
    pub(crate) case_insensitive: bool,
}

impl Program {
    /// Number of capture slots this program populates, whole match included.
    pub fn group_count(&self) -> usize {
        self.group_count as usize
    }

    pub fn start_hint(&self) -> StartHint {
        self.start
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
