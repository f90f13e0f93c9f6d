// Pattern parser
// Recursive descent over the pattern bytes, producing an Ast plus the
// capture-group count. Every error carries the offset where parsing stopped.

pub mod ast;
pub mod error;

use crate::MAX_CAPTURES;
use crate::program::CharBitmap;
use ast::{AssertKind, Ast, LookDir, quantifier_needs_counter};
use error::{CompileError, CompileErrorKind};

use super::CompileFlags;

/// Parse output handed to the emitter.
pub(crate) struct ParsedPattern {
    pub ast: Ast,
    pub group_count: u8,
}

/// Scoped parse state toggled by `(?i...)` / `(?n...)` groups.
#[derive(Clone, Copy)]
struct Flags {
    ci: bool,
    newline: bool,
}

pub(crate) fn parse(pattern: &str, flags: CompileFlags) -> Result<ParsedPattern, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::new(CompileErrorKind::EmptyPattern, 0));
    }
    let mut p = Parser {
        pat: pattern.as_bytes(),
        pos: 0,
        next_group: 1,
        closed: [false; MAX_CAPTURES],
        counters: 0,
    };
    let f = Flags {
        ci: flags.case_insensitive,
        newline: false,
    };
    let ast = p.alternation(f)?;
    if p.pos != p.pat.len() {
        // only a stray ')' can stop the walk early
        return Err(CompileError::new(CompileErrorKind::UnmatchedParen, p.pos));
    }
    Ok(ParsedPattern {
        ast,
        group_count: p.next_group,
    })
}

enum ClassItem {
    Byte(u8),
    Set(CharBitmap),
}

enum GroupKind {
    Capture,
    Plain,
    Look(LookDir, bool),
}

struct Parser<'a> {
    pat: &'a [u8],
    pos: usize,
    next_group: u8,
    closed: [bool; MAX_CAPTURES],
    counters: u32,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.pat.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.pat.get(self.pos + ahead).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn err(&self, kind: CompileErrorKind, offset: usize) -> CompileError {
        CompileError::new(kind, offset)
    }

    fn alternation(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let mut branches = vec![self.concat(f)?];
        while self.eat(b'|') {
            branches.push(self.concat(f)?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap_or(Ast::Empty))
        } else {
            Ok(Ast::Alternation(branches))
        }
    }

    fn concat(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let mut items = Vec::new();
        while let Some(b) = self.peek() {
            if b == b'|' || b == b')' {
                break;
            }
            items.push(self.piece(f)?);
        }
        match items.len() {
            0 => Ok(Ast::Empty),
            1 => Ok(items.pop().unwrap_or(Ast::Empty)),
            _ => Ok(Ast::Concat(items)),
        }
    }

    fn piece(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let atom = self.atom(f)?;
        let off = self.pos;
        let bounds = match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                Some((0, None))
            }
            Some(b'+') => {
                self.pos += 1;
                Some((1, None))
            }
            Some(b'?') => {
                self.pos += 1;
                Some((0, Some(1)))
            }
            Some(b'{') if self.bounds_ahead() => Some(self.parse_bounds()?),
            _ => None,
        };
        let Some((min, max)) = bounds else {
            return Ok(atom);
        };
        let lazy = self.eat(b'?');

        let (wmin, wmax) = atom.width();
        if wmax == Some(0) {
            return Err(self.err(CompileErrorKind::RepeatOfAssertion, off));
        }
        if max.is_none() && wmin == 0 {
            return Err(self.err(CompileErrorKind::RepeatCouldMatchEmpty, off));
        }
        if quantifier_needs_counter(min, max) && !atom.is_single_byte() {
            self.counters += 1;
            if self.counters > 255 {
                return Err(self.err(CompileErrorKind::TooManyCounters, off));
            }
        }
        Ok(Ast::Repeat {
            body: Box::new(atom),
            min,
            max,
            lazy,
        })
    }

    fn atom(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let off = self.pos;
        let b = match self.peek() {
            Some(b) => b,
            None => return Err(self.err(CompileErrorKind::EmptyPattern, off)),
        };
        match b {
            b'^' => {
                self.pos += 1;
                Ok(Ast::Assert(AssertKind::LineStart))
            }
            b'$' => {
                self.pos += 1;
                Ok(Ast::Assert(AssertKind::LineEnd))
            }
            b'.' => {
                self.pos += 1;
                Ok(Ast::AnyChar { newline: f.newline })
            }
            b'[' => self.class(f),
            b'(' => self.group(f),
            b'\\' => self.escape(f),
            b'*' | b'+' | b'?' => Err(self.err(CompileErrorKind::RepeatWithoutOperand, off)),
            b'{' if self.bounds_ahead() => {
                self.parse_bounds()?;
                Err(self.err(CompileErrorKind::RepeatWithoutOperand, off))
            }
            _ => Ok(self.literal_run(f)),
        }
    }

    /// Collect a run of plain literal bytes. When the run is followed by a
    /// quantifier, the quantifier binds only to the last byte, so that byte
    /// is handed back for the next piece.
    fn literal_run(&mut self, f: Flags) -> Ast {
        let mut bytes = Vec::new();
        while let Some(b) = self.peek() {
            if b"^$.[()|\\*+?".contains(&b) {
                break;
            }
            if b == b'{' && self.bounds_ahead() {
                break;
            }
            bytes.push(b);
            self.pos += 1;
        }
        if bytes.len() > 1 && self.quantifier_ahead() {
            bytes.pop();
            self.pos -= 1;
        }
        Ast::Literal { bytes, ci: f.ci }
    }

    fn quantifier_ahead(&self) -> bool {
        match self.peek() {
            Some(b'*') | Some(b'+') | Some(b'?') => true,
            Some(b'{') => self.bounds_ahead(),
            _ => false,
        }
    }

    /// True when the cursor sits on a `{m}` / `{m,}` / `{,n}` / `{m,n}`
    /// bounds expression; a lone `{` is an ordinary literal.
    fn bounds_ahead(&self) -> bool {
        let mut j = self.pos + 1;
        let mut any = false;
        while j < self.pat.len() && self.pat[j].is_ascii_digit() {
            j += 1;
            any = true;
        }
        if j < self.pat.len() && self.pat[j] == b',' {
            j += 1;
            any = true;
            while j < self.pat.len() && self.pat[j].is_ascii_digit() {
                j += 1;
            }
        }
        any && j < self.pat.len() && self.pat[j] == b'}'
    }

    fn parse_bounds(&mut self) -> Result<(u32, Option<u32>), CompileError> {
        let off = self.pos;
        self.pos += 1; // '{'
        let min = self.bound_number(off)?;
        let (min, max) = if self.eat(b',') {
            (min.unwrap_or(0), self.bound_number(off)?)
        } else {
            let m = min.unwrap_or(0);
            (m, Some(m))
        };
        if !self.eat(b'}') {
            return Err(self.err(CompileErrorKind::InvalidRepeatBounds, off));
        }
        if let Some(mx) = max {
            if min > mx {
                return Err(self.err(CompileErrorKind::InvalidRepeatBounds, off));
            }
        }
        Ok((min, max))
    }

    fn bound_number(&mut self, off: usize) -> Result<Option<u32>, CompileError> {
        let mut val: u32 = 0;
        let mut any = false;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            any = true;
            val = val * 10 + (b - b'0') as u32;
            if val > 65535 {
                return Err(self.err(CompileErrorKind::InvalidRepeatBounds, off));
            }
            self.pos += 1;
        }
        Ok(any.then_some(val))
    }

    fn escape(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let off = self.pos; // backslash
        self.pos += 1;
        let Some(b) = self.peek() else {
            return Err(self.err(CompileErrorKind::TrailingBackslash, off));
        };
        self.pos += 1;
        let lit = |byte: u8| Ast::Literal {
            bytes: vec![byte],
            ci: f.ci,
        };
        Ok(match b {
            b'1'..=b'9' => {
                let g = b - b'0';
                if !self.closed[g as usize] {
                    return Err(self.err(CompileErrorKind::DanglingBackRef(g), off));
                }
                Ast::BackRef { group: g, ci: f.ci }
            }
            b'0' => return Err(self.err(CompileErrorKind::DanglingBackRef(0), off)),
            b'<' => Ast::Assert(AssertKind::WordStart),
            b'>' => Ast::Assert(AssertKind::WordEnd),
            b'b' => Ast::Assert(AssertKind::Boundary),
            b'B' => Ast::Assert(AssertKind::NotBoundary),
            b'w' => Ast::WordChar { negated: false },
            b'W' => Ast::WordChar { negated: true },
            b'd' => class_ast(digit_set(), false, f),
            b'D' => class_ast(digit_set(), true, f),
            b's' => class_ast(space_set(f.newline), false, f),
            b'S' => class_ast(space_set(f.newline), true, f),
            b'l' => class_ast(letter_set(), false, f),
            b'L' => class_ast(letter_set(), true, f),
            b't' => lit(b'\t'),
            b'n' => lit(b'\n'),
            b'r' => lit(b'\r'),
            b'f' => lit(0x0c),
            b'v' => lit(0x0b),
            b'a' => lit(0x07),
            b'e' => lit(0x1b),
            other => lit(other),
        })
    }

    fn class(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let off = self.pos; // '['
        self.pos += 1;
        let negated = self.eat(b'^');
        let mut set = CharBitmap::empty();
        let mut first = true;
        loop {
            let Some(b) = self.peek() else {
                return Err(self.err(CompileErrorKind::UnterminatedClass, off));
            };
            if b == b']' && !first {
                self.pos += 1;
                break;
            }
            first = false;
            let item_off = self.pos;
            match self.class_item(off)? {
                ClassItem::Set(s) => set.union_with(&s),
                ClassItem::Byte(lo) => {
                    let ranged = self.peek() == Some(b'-')
                        && self.peek_at(1).is_some_and(|c| c != b']');
                    if ranged {
                        self.pos += 1; // '-'
                        let hi_off = self.pos;
                        match self.class_item(off)? {
                            ClassItem::Byte(hi) => {
                                if lo > hi {
                                    return Err(
                                        self.err(CompileErrorKind::InvalidClassRange, item_off)
                                    );
                                }
                                set.insert_range(lo, hi);
                            }
                            ClassItem::Set(_) => {
                                return Err(
                                    self.err(CompileErrorKind::InvalidClassRange, hi_off)
                                );
                            }
                        }
                    } else {
                        set.insert(lo);
                    }
                }
            }
        }
        if f.ci {
            set.fold_case();
        }
        // a negated class must not swallow the line break unless asked to
        if negated && !f.newline {
            set.insert(b'\n');
        }
        Ok(Ast::Class { set, negated })
    }

    fn class_item(&mut self, class_off: usize) -> Result<ClassItem, CompileError> {
        let off = self.pos;
        let Some(b) = self.peek() else {
            return Err(self.err(CompileErrorKind::UnterminatedClass, class_off));
        };
        self.pos += 1;
        if b != b'\\' {
            return Ok(ClassItem::Byte(b));
        }
        let Some(e) = self.peek() else {
            return Err(self.err(CompileErrorKind::TrailingBackslash, off));
        };
        self.pos += 1;
        Ok(match e {
            b't' => ClassItem::Byte(b'\t'),
            b'n' => ClassItem::Byte(b'\n'),
            b'r' => ClassItem::Byte(b'\r'),
            b'f' => ClassItem::Byte(0x0c),
            b'v' => ClassItem::Byte(0x0b),
            b'a' => ClassItem::Byte(0x07),
            b'e' => ClassItem::Byte(0x1b),
            b'd' => ClassItem::Set(digit_set()),
            b's' => ClassItem::Set(space_set(false)),
            b'l' => ClassItem::Set(letter_set()),
            // the word set is fixed inside a class; delimiters are a
            // run-time input and cannot land in a compiled bitmap
            b'w' => ClassItem::Set(word_set()),
            b'D' | b'S' | b'W' | b'L' | b'0'..=b'9' => {
                return Err(self.err(CompileErrorKind::InvalidClassEscape, off));
            }
            other => ClassItem::Byte(other),
        })
    }

    fn group(&mut self, f: Flags) -> Result<Ast, CompileError> {
        let off = self.pos; // '('
        self.pos += 1;
        let mut inner = f;
        let kind = if self.eat(b'?') {
            match self.peek() {
                Some(b':') => {
                    self.pos += 1;
                    GroupKind::Plain
                }
                Some(b'=') => {
                    self.pos += 1;
                    GroupKind::Look(LookDir::Ahead, false)
                }
                Some(b'!') => {
                    self.pos += 1;
                    GroupKind::Look(LookDir::Ahead, true)
                }
                Some(b'<') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'=') => {
                            self.pos += 1;
                            GroupKind::Look(LookDir::Behind, false)
                        }
                        Some(b'!') => {
                            self.pos += 1;
                            GroupKind::Look(LookDir::Behind, true)
                        }
                        _ => return Err(self.err(CompileErrorKind::InvalidGroup, off)),
                    }
                }
                Some(b'i') | Some(b'I') | Some(b'n') | Some(b'N') => {
                    while let Some(c) = self.peek() {
                        match c {
                            b'i' => inner.ci = true,
                            b'I' => inner.ci = false,
                            b'n' => inner.newline = true,
                            b'N' => inner.newline = false,
                            _ => break,
                        }
                        self.pos += 1;
                    }
                    GroupKind::Plain
                }
                _ => return Err(self.err(CompileErrorKind::InvalidGroup, off)),
            }
        } else {
            GroupKind::Capture
        };

        let index = if matches!(kind, GroupKind::Capture) {
            if self.next_group as usize >= MAX_CAPTURES {
                return Err(self.err(CompileErrorKind::TooManyCaptures, off));
            }
            let i = self.next_group;
            self.next_group += 1;
            Some(i)
        } else {
            None
        };

        let body = self.alternation(inner)?;
        if !self.eat(b')') {
            return Err(self.err(CompileErrorKind::UnmatchedParen, off));
        }

        match kind {
            GroupKind::Look(dir, negated) => {
                if dir == LookDir::Behind {
                    let (_, wmax) = body.width();
                    if !matches!(wmax, Some(m) if m <= 65535) {
                        return Err(self.err(CompileErrorKind::UnboundedLookBehind, off));
                    }
                }
                Ok(Ast::Look {
                    dir,
                    negated,
                    body: Box::new(body),
                })
            }
            _ => {
                if let Some(i) = index {
                    self.closed[i as usize] = true;
                }
                Ok(Ast::Group {
                    index,
                    body: Box::new(body),
                })
            }
        }
    }
}

fn class_ast(mut set: CharBitmap, negated: bool, f: Flags) -> Ast {
    if f.ci {
        set.fold_case();
    }
    if negated && !f.newline {
        set.insert(b'\n');
    }
    Ast::Class { set, negated }
}

fn digit_set() -> CharBitmap {
    let mut set = CharBitmap::empty();
    set.insert_range(b'0', b'9');
    set
}

fn letter_set() -> CharBitmap {
    let mut set = CharBitmap::empty();
    set.insert_range(b'a', b'z');
    set.insert_range(b'A', b'Z');
    set
}

fn word_set() -> CharBitmap {
    let mut set = letter_set();
    set.insert_range(b'0', b'9');
    set.insert(b'_');
    set
}

fn space_set(newline: bool) -> CharBitmap {
    let mut set = CharBitmap::empty();
    set.insert(b' ');
    set.insert(b'\t');
    set.insert(b'\r');
    set.insert(0x0c);
    set.insert(0x0b);
    if newline {
        set.insert(b'\n');
    }
    set
}
