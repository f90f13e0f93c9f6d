/// Index into `Program::classes`.
pub type ClassId = u16;

/// One-byte operand carried by `Op::Repeat`.
///
/// Quantifiers over anything wider compile to branch/loop node skeletons
/// instead; keeping the single-byte case in one node lets the matcher count
/// a whole run without recursing per repetition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Literal(u8),                             // exact byte
    LiteralCi(u8),                           // folded byte, compared case-insensitively
    Any,                                     // any byte except newline
    AnyNl,                                   // any byte
    Class { class: ClassId, negated: bool }, // class bitmap membership
    WordChar { negated: bool },              // non-delimiter byte per the delimiter table
}

/// Program node operations.
///
/// `Node::next` is the relative offset to the node that follows on success.
/// `Branch` chains its alternatives through `next` instead; the body of a
/// branch, group, or lookaround always starts at the node directly after it.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Match,   // end of program: the attempt succeeded
    Nothing, // no-op join point (also the loop-back carrier when next < 0)

    Branch, // choice point; body at self+1, next alternative via `next`

    // Zero-width assertions
    Bol,                        // beginning of line
    Eol,                        // end of line
    WordStart,                  // \< delimiter/word edge, word on the right
    WordEnd,                    // \> word/delimiter edge, word on the left
    Boundary { negated: bool }, // \b / \B

    // Consuming ops
    Literal(Box<[u8]>),                      // exact byte run
    LiteralCi(Box<[u8]>),                    // folded byte run, case-insensitive
    Any,                                     // . (newline excluded)
    AnyNl,                                   // . under the `n` scoped flag
    Class { class: ClassId, negated: bool }, // [...] / [^...]
    WordChar { negated: bool },              // \w / \W
    BackRef { group: u8, ci: bool },         // \1 .. \9

    // Quantified single-byte operand
    Repeat { operand: Operand, min: u32, max: u32, lazy: bool },

    // Capture groups
    Open(u8),  // record group start at the cursor
    Close(u8), // record group end at the cursor

    // Bounded-repetition counters
    InitCount(u8),                        // counter := 0
    IncCount(u8),                         // counter += 1
    CountLt { counter: u8, limit: u32 },  // zero-width: counter < limit
    CountGe { counter: u8, limit: u32 },  // zero-width: counter >= limit

    // Lookaround; body at self+1, continuation via `next`
    LookAheadOpen { negated: bool },
    LookAheadClose,
    LookBehindOpen { negated: bool, min: u16, max: u16 },
    LookBehindClose,
}
