// Matcher - Public execution surface
// Drives candidate start positions over the subject (forward or reverse)
// and hands each attempt to the backtracking engine.

mod engine;

use std::ops::Range;

use thiserror::Error;

use crate::MAX_CAPTURES;
use crate::delimiters::{self, DelimiterTable};
use crate::program::Program;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("compiled program is corrupt")]
    Internal,
    #[error("step limit exceeded")]
    StepLimitExceeded,
}

/// Per-call execution settings. `Default` gives a plain forward search over
/// the whole range with the process-wide delimiter table.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecOptions<'a> {
    /// Try candidate starts from `start` downward instead of upward. The
    /// match at each candidate still runs left to right.
    pub reverse: bool,
    /// Byte notionally preceding the range when it is a sub-range of a
    /// larger text; drives `^`, `<`, and boundary checks at offset 0.
    pub prev_char: Option<u8>,
    /// Byte notionally following the range; drives `$`, `>`, and boundary
    /// checks at the end.
    pub succ_char: Option<u8>,
    /// Delimiter set for this call only; falls back to the global default.
    pub delimiters: Option<&'a DelimiterTable>,
    /// Lowest offset lookbehind may reach; defaults to `start`.
    pub look_behind_to: Option<usize>,
    /// Offset the match proper may not cross; lookahead assertions may still
    /// inspect beyond it. Defaults to the search range end.
    pub match_till: Option<usize>,
    /// Abort with `StepLimitExceeded` after this many engine steps.
    pub step_limit: Option<u64>,
}

/// Capture slots recorded by a successful match. Slot 0 is the whole match.
#[derive(Clone, Copy, Debug)]
pub struct Captures {
    slots: [Option<(usize, usize)>; MAX_CAPTURES],
    len: usize,
}

impl Captures {
    /// Number of slots, counting slot 0 and unmatched groups.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte range of group `n`, or `None` when the group did not
    /// participate in the match.
    pub fn group(&self, n: usize) -> Option<Range<usize>> {
        if n >= self.len {
            return None;
        }
        self.slots[n].map(|(s, e)| s..e)
    }

    /// Matched text of group `n` within the original subject.
    pub fn group_text<'t>(&self, n: usize, text: &'t str) -> Option<&'t str> {
        self.group(n).and_then(|r| text.get(r))
    }

    /// Range of the whole match (slot 0).
    pub fn whole(&self) -> Range<usize> {
        self.group(0).unwrap_or(0..0)
    }
}

/// How far the attempt reached while matching, including text consumed only
/// by lookaround assertions. Useful for deciding how much of a rendered
/// region a change could have invalidated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchExtent {
    /// Lowest offset examined (lookbehind may push this before the match).
    pub backward: usize,
    /// Highest offset examined (lookahead may push this past the match).
    pub forward: usize,
}

/// A successful match: captures, examined extent, and which top-level
/// alternation branch produced it.
#[derive(Clone, Copy, Debug)]
pub struct MatchResult {
    pub captures: Captures,
    pub extent: MatchExtent,
    /// Index of the top-level `|` branch that matched; 0 when the pattern
    /// has no top-level alternation.
    pub top_branch: usize,
}

impl MatchResult {
    pub fn start(&self) -> usize {
        self.captures.whole().start
    }

    pub fn end(&self) -> usize {
        self.captures.whole().end
    }
}

impl Program {
    /// Search `text[start..end]` for the first match.
    ///
    /// `end == None` means the end of `text`. Forward search tries candidate
    /// starts `start, start+1, ..`; with `opts.reverse` it tries `start,
    /// start-1, ..` down to `look_behind_to`. Offsets in the result are
    /// always relative to the whole of `text`.
    pub fn exec(
        &self,
        text: &str,
        start: usize,
        end: Option<usize>,
        opts: &ExecOptions,
    ) -> Result<Option<MatchResult>, ExecError> {
        let bytes = text.as_bytes();
        let hard_end = end.unwrap_or(bytes.len()).min(bytes.len());
        let start = start.min(hard_end);
        let look_behind_to = opts.look_behind_to.unwrap_or(start).min(start);
        let match_till = opts.match_till.unwrap_or(hard_end).min(hard_end);
        let delims = match opts.delimiters {
            Some(t) => *t,
            None => delimiters::default_table(),
        };

        let mut state = engine::ExecState::new(
            self,
            bytes,
            hard_end,
            look_behind_to,
            opts.prev_char,
            opts.succ_char,
            delims,
            opts.step_limit,
        );

        if !opts.reverse {
            for pos in start..=hard_end {
                if !state.viable_start(pos) {
                    continue;
                }
                if let Some(result) = state.attempt(pos, match_till)? {
                    return Ok(Some(result));
                }
            }
        } else {
            let mut pos = start;
            loop {
                if state.viable_start(pos) {
                    if let Some(result) = state.attempt(pos, match_till)? {
                        return Ok(Some(result));
                    }
                }
                if pos == look_behind_to {
                    break;
                }
                pos -= 1;
            }
        }
        Ok(None)
    }
}
