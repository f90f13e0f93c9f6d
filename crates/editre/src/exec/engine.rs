// Backtracking interpreter
// One ExecState per ExecRE-style call. run() walks node links iteratively
// and recurses only where a choice or an undoable state change is made;
// every mutation (capture slot, loop counter) is restored when the
// continuation it guarded fails, so abandoned alternatives leave no residue.

use crate::MAX_CAPTURES;
use crate::delimiters::DelimiterTable;
use crate::program::{CharBitmap, ClassId, Node, Op, Operand, Program, StartHint};

use super::{Captures, ExecError, MatchExtent, MatchResult};

type Slots = [Option<usize>; MAX_CAPTURES];

pub(crate) struct ExecState<'p, 't> {
    prog: &'p Program,
    text: &'t [u8],
    hard_end: usize,
    look_behind_to: usize,
    prev_char: Option<u8>,
    succ_char: Option<u8>,
    delims: DelimiterTable,
    step_limit: Option<u64>,

    match_bound: usize,
    behind_target: Option<usize>,
    cap_start: Slots,
    cap_end: Slots,
    counters: Vec<u32>,
    extent_bw: usize,
    extent_fw: usize,
    top_branch: usize,
    steps: u64,
}

impl<'p, 't> ExecState<'p, 't> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        prog: &'p Program,
        text: &'t [u8],
        hard_end: usize,
        look_behind_to: usize,
        prev_char: Option<u8>,
        succ_char: Option<u8>,
        delims: DelimiterTable,
        step_limit: Option<u64>,
    ) -> Self {
        ExecState {
            prog,
            text,
            hard_end,
            look_behind_to,
            prev_char,
            succ_char,
            delims,
            step_limit,
            match_bound: hard_end,
            behind_target: None,
            cap_start: [None; MAX_CAPTURES],
            cap_end: [None; MAX_CAPTURES],
            counters: vec![0; prog.counter_count as usize],
            extent_bw: 0,
            extent_fw: 0,
            top_branch: 0,
            steps: 0,
        }
    }

    /// Whether the start hint allows an attempt at `pos`.
    pub(crate) fn viable_start(&self, pos: usize) -> bool {
        match self.prog.start {
            StartHint::Any => true,
            StartHint::Literal(b) => pos < self.hard_end && self.text[pos] == b,
            StartHint::LineStart => self.at_bol(pos),
        }
    }

    /// Run one full attempt anchored at `pos`.
    pub(crate) fn attempt(
        &mut self,
        pos: usize,
        match_till: usize,
    ) -> Result<Option<MatchResult>, ExecError> {
        self.cap_start = [None; MAX_CAPTURES];
        self.cap_end = [None; MAX_CAPTURES];
        self.counters.fill(0);
        self.extent_bw = pos;
        self.extent_fw = pos;
        self.top_branch = 0;
        self.match_bound = match_till;
        self.behind_target = None;

        let Some(end) = self.run(0, pos)? else {
            return Ok(None);
        };
        self.cap_start[0] = Some(pos);
        self.cap_end[0] = Some(end);

        let len = self.prog.group_count();
        let mut captures = Captures {
            slots: [None; MAX_CAPTURES],
            len,
        };
        for i in 0..len {
            if let (Some(s), Some(e)) = (self.cap_start[i], self.cap_end[i]) {
                if s <= e {
                    captures.slots[i] = Some((s, e));
                }
            }
        }
        Ok(Some(MatchResult {
            captures,
            extent: MatchExtent {
                backward: self.extent_bw.min(pos),
                forward: self.extent_fw.max(end),
            },
            top_branch: self.top_branch,
        }))
    }

    fn node(&self, idx: usize) -> Result<&'p Node, ExecError> {
        self.prog.nodes.get(idx).ok_or(ExecError::Internal)
    }

    fn next_of(&self, idx: usize) -> Result<usize, ExecError> {
        let node = self.node(idx)?;
        let target = idx as i64 + node.next as i64;
        if target < 0 || target as usize >= self.prog.node_count() {
            return Err(ExecError::Internal);
        }
        Ok(target as usize)
    }

    fn class_of(&self, id: ClassId) -> Result<&'p CharBitmap, ExecError> {
        self.prog.classes.get(id as usize).ok_or(ExecError::Internal)
    }

    /// Match the program from `node_idx` at `pos`; returns the subject
    /// offset where `Match` (or a lookaround close) was reached.
    fn run(&mut self, mut node_idx: usize, mut pos: usize) -> Result<Option<usize>, ExecError> {
        loop {
            if let Some(limit) = self.step_limit {
                if self.steps >= limit {
                    return Err(ExecError::StepLimitExceeded);
                }
            }
            self.steps = self.steps.saturating_add(1);

            let node = self.node(node_idx)?;
            match &node.op {
                Op::Match => return Ok(Some(pos)),
                Op::LookAheadClose => {
                    self.extent_fw = self.extent_fw.max(pos);
                    return Ok(Some(pos));
                }
                Op::LookBehindClose => {
                    // only the width that lands exactly on the assertion
                    // point counts; anything else keeps backtracking
                    return match self.behind_target {
                        Some(t) if t == pos => Ok(Some(pos)),
                        _ => Ok(None),
                    };
                }
                Op::Nothing => {}

                Op::Bol => {
                    if !self.at_bol(pos) {
                        return Ok(None);
                    }
                }
                Op::Eol => {
                    if !self.at_eol(pos) {
                        return Ok(None);
                    }
                }
                Op::WordStart => {
                    if self.word_before(pos) || !self.word_at(pos) {
                        return Ok(None);
                    }
                }
                Op::WordEnd => {
                    if !self.word_before(pos) || self.word_at(pos) {
                        return Ok(None);
                    }
                }
                Op::Boundary { negated } => {
                    let boundary = self.word_before(pos) != self.word_at(pos);
                    if boundary == *negated {
                        return Ok(None);
                    }
                }

                Op::Literal(bytes) => {
                    if !self.bytes_at(pos, bytes, false) {
                        return Ok(None);
                    }
                    pos += bytes.len();
                }
                Op::LiteralCi(bytes) => {
                    if !self.bytes_at(pos, bytes, true) {
                        return Ok(None);
                    }
                    pos += bytes.len();
                }
                Op::Any => {
                    if pos >= self.match_bound || self.text[pos] == b'\n' {
                        return Ok(None);
                    }
                    pos += 1;
                }
                Op::AnyNl => {
                    if pos >= self.match_bound {
                        return Ok(None);
                    }
                    pos += 1;
                }
                Op::Class { class, negated } => {
                    if pos >= self.match_bound {
                        return Ok(None);
                    }
                    let hit = self.class_of(*class)?.contains(self.text[pos]);
                    if hit == *negated {
                        return Ok(None);
                    }
                    pos += 1;
                }
                Op::WordChar { negated } => {
                    if pos >= self.match_bound {
                        return Ok(None);
                    }
                    let word = !self.delims.is_delimiter(self.text[pos]);
                    if word == *negated {
                        return Ok(None);
                    }
                    pos += 1;
                }
                Op::BackRef { group, ci } => {
                    let g = *group as usize;
                    let (Some(s), Some(e)) = (self.cap_start[g], self.cap_end[g]) else {
                        return Ok(None);
                    };
                    let len = e - s;
                    if pos + len > self.match_bound {
                        return Ok(None);
                    }
                    let captured = &self.text[s..e];
                    let here = &self.text[pos..pos + len];
                    let equal = if *ci {
                        captured
                            .iter()
                            .zip(here)
                            .all(|(a, b)| a.to_ascii_lowercase() == b.to_ascii_lowercase())
                    } else {
                        captured == here
                    };
                    if !equal {
                        return Ok(None);
                    }
                    pos += len;
                }

                Op::Repeat {
                    operand,
                    min,
                    max,
                    lazy,
                } => {
                    let next = self.next_of(node_idx)?;
                    return self.run_repeat(next, pos, operand, *min as usize, *max as usize, *lazy);
                }

                Op::Branch => {
                    let top = self.prog.top_entry == Some(node_idx);
                    let mut scan = node_idx;
                    let mut branch_index = 0usize;
                    loop {
                        if !matches!(self.node(scan)?.op, Op::Branch) {
                            return Ok(None);
                        }
                        if top {
                            self.top_branch = branch_index;
                        }
                        let r = self.run(scan + 1, pos)?;
                        if r.is_some() {
                            return Ok(r);
                        }
                        scan = self.next_of(scan)?;
                        branch_index += 1;
                    }
                }

                Op::Open(group) => {
                    let g = *group as usize;
                    let next = self.next_of(node_idx)?;
                    let saved = self.cap_start[g];
                    self.cap_start[g] = Some(pos);
                    let r = self.run(next, pos)?;
                    if r.is_none() {
                        self.cap_start[g] = saved;
                    }
                    return Ok(r);
                }
                Op::Close(group) => {
                    let g = *group as usize;
                    let next = self.next_of(node_idx)?;
                    let saved = self.cap_end[g];
                    self.cap_end[g] = Some(pos);
                    let r = self.run(next, pos)?;
                    if r.is_none() {
                        self.cap_end[g] = saved;
                    }
                    return Ok(r);
                }

                Op::InitCount(counter) => {
                    let c = *counter as usize;
                    let next = self.next_of(node_idx)?;
                    let saved = self.counters[c];
                    self.counters[c] = 0;
                    let r = self.run(next, pos)?;
                    if r.is_none() {
                        self.counters[c] = saved;
                    }
                    return Ok(r);
                }
                Op::IncCount(counter) => {
                    let c = *counter as usize;
                    let next = self.next_of(node_idx)?;
                    self.counters[c] += 1;
                    let r = self.run(next, pos)?;
                    if r.is_none() {
                        self.counters[c] -= 1;
                    }
                    return Ok(r);
                }
                Op::CountLt { counter, limit } => {
                    if self.counters[*counter as usize] >= *limit {
                        return Ok(None);
                    }
                }
                Op::CountGe { counter, limit } => {
                    if self.counters[*counter as usize] < *limit {
                        return Ok(None);
                    }
                }

                Op::LookAheadOpen { negated } => {
                    // the assertion may inspect past match_till
                    let saved_bound = self.match_bound;
                    self.match_bound = self.hard_end;
                    let snapshot = if *negated {
                        Some((self.cap_start, self.cap_end))
                    } else {
                        None
                    };
                    let r = self.run(node_idx + 1, pos)?;
                    self.match_bound = saved_bound;
                    if r.is_some() == *negated {
                        if let Some((cs, ce)) = snapshot {
                            self.cap_start = cs;
                            self.cap_end = ce;
                        }
                        return Ok(None);
                    }
                }
                Op::LookBehindOpen { negated, min, max } => {
                    let snap_s = self.cap_start;
                    let snap_e = self.cap_end;
                    let saved_target = self.behind_target;
                    let saved_bound = self.match_bound;
                    self.behind_target = Some(pos);
                    let mut hit = false;
                    let mut width = *min as usize;
                    while width <= *max as usize {
                        if width > pos || pos - width < self.look_behind_to {
                            break;
                        }
                        let from = pos - width;
                        self.extent_bw = self.extent_bw.min(from);
                        self.match_bound = pos;
                        let r = self.run(node_idx + 1, from)?;
                        self.match_bound = saved_bound;
                        if r.is_some() {
                            hit = true;
                            break;
                        }
                        self.cap_start = snap_s;
                        self.cap_end = snap_e;
                        width += 1;
                    }
                    self.behind_target = saved_target;
                    self.match_bound = saved_bound;
                    if hit == *negated {
                        self.cap_start = snap_s;
                        self.cap_end = snap_e;
                        return Ok(None);
                    }
                }
            }
            node_idx = self.next_of(node_idx)?;
        }
    }

    fn run_repeat(
        &mut self,
        next: usize,
        pos: usize,
        operand: &Operand,
        min: usize,
        max: usize,
        lazy: bool,
    ) -> Result<Option<usize>, ExecError> {
        if !lazy {
            let mut count = 0usize;
            while count < max && self.operand_at(operand, pos + count)? {
                count += 1;
            }
            for k in (min..=count).rev() {
                if let Some(end) = self.run(next, pos + k)? {
                    return Ok(Some(end));
                }
            }
            Ok(None)
        } else {
            for k in 0..min {
                if !self.operand_at(operand, pos + k)? {
                    return Ok(None);
                }
            }
            let mut k = min;
            loop {
                if let Some(end) = self.run(next, pos + k)? {
                    return Ok(Some(end));
                }
                if k < max && self.operand_at(operand, pos + k)? {
                    k += 1;
                } else {
                    return Ok(None);
                }
            }
        }
    }

    fn operand_at(&self, operand: &Operand, pos: usize) -> Result<bool, ExecError> {
        if pos >= self.match_bound {
            return Ok(false);
        }
        let b = self.text[pos];
        Ok(match operand {
            Operand::Literal(c) => b == *c,
            Operand::LiteralCi(c) => b.to_ascii_lowercase() == *c,
            Operand::Any => b != b'\n',
            Operand::AnyNl => true,
            Operand::Class { class, negated } => self.class_of(*class)?.contains(b) != *negated,
            Operand::WordChar { negated } => !self.delims.is_delimiter(b) != *negated,
        })
    }

    fn bytes_at(&self, pos: usize, bytes: &[u8], ci: bool) -> bool {
        let end = pos + bytes.len();
        if end > self.match_bound {
            return false;
        }
        if ci {
            self.text[pos..end]
                .iter()
                .zip(bytes)
                .all(|(a, b)| a.to_ascii_lowercase() == *b)
        } else {
            &self.text[pos..end] == bytes
        }
    }

    /// Byte at `pos`, falling back to the caller-supplied successor byte at
    /// the subject end; `None` is the true end of the text.
    fn char_at(&self, pos: usize) -> Option<u8> {
        if pos < self.hard_end {
            Some(self.text[pos])
        } else {
            self.succ_char
        }
    }

    fn char_before(&self, pos: usize) -> Option<u8> {
        if pos > 0 {
            Some(self.text[pos - 1])
        } else {
            self.prev_char
        }
    }

    pub(crate) fn at_bol(&self, pos: usize) -> bool {
        matches!(self.char_before(pos), None | Some(b'\n') | Some(0))
    }

    fn at_eol(&self, pos: usize) -> bool {
        matches!(self.char_at(pos), None | Some(b'\n') | Some(0))
    }

    fn word_at(&self, pos: usize) -> bool {
        matches!(self.char_at(pos), Some(c) if !self.delims.is_delimiter(c))
    }

    fn word_before(&self, pos: usize) -> bool {
        matches!(self.char_before(pos), Some(c) if !self.delims.is_delimiter(c))
    }
}
