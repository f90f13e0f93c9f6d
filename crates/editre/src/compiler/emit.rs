// Node emission
// Lowers the parsed Ast into the flat node program. Alternation and complex
// quantifiers become Branch chains whose bodies sit directly after their
// Branch node; bounded repetition of complex operands becomes a counter loop.

use super::CompileFlags;
use super::parser::ParsedPattern;
use super::parser::ast::{AssertKind, Ast, LookDir};
use crate::program::{CharBitmap, ClassId, Node, Op, Operand, Program, StartHint};

pub(crate) fn emit_program(parsed: &ParsedPattern, flags: CompileFlags) -> Program {
    let mut em = Emitter {
        nodes: Vec::new(),
        classes: Vec::new(),
        counter_count: 0,
    };
    let (entry, exits) = em.emit_ast(&parsed.ast);
    debug_assert_eq!(entry, 0);
    let end = em.push(Op::Match);
    em.patch_all(&exits, end);

    let top_entry = match parsed.ast {
        Ast::Alternation(_) => Some(entry),
        _ => None,
    };
    Program {
        nodes: em.nodes,
        classes: em.classes,
        group_count: parsed.group_count,
        counter_count: em.counter_count,
        start: start_hint(&parsed.ast),
        top_entry,
        case_insensitive: flags.case_insensitive,
    }
}

struct Emitter {
    nodes: Vec<Node>,
    classes: Vec<CharBitmap>,
    counter_count: u8,
}

impl Emitter {
    fn push(&mut self, op: Op) -> usize {
        self.nodes.push(Node { op, next: 0 });
        self.nodes.len() - 1
    }

    fn set_next(&mut self, from: usize, to: usize) {
        self.nodes[from].next = (to as i64 - from as i64) as i32;
    }

    fn patch_all(&mut self, exits: &[usize], to: usize) {
        for &e in exits {
            self.set_next(e, to);
        }
    }

    fn add_class(&mut self, set: CharBitmap) -> ClassId {
        if let Some(i) = self.classes.iter().position(|c| *c == set) {
            return i as ClassId;
        }
        self.classes.push(set);
        (self.classes.len() - 1) as ClassId
    }

    fn alloc_counter(&mut self) -> u8 {
        let c = self.counter_count;
        self.counter_count += 1;
        c
    }

    /// Emit one Ast. Returns the entry node index (always the first node
    /// emitted) and the dangling exits to patch to whatever follows.
    fn emit_ast(&mut self, ast: &Ast) -> (usize, Vec<usize>) {
        match ast {
            Ast::Empty => {
                let n = self.push(Op::Nothing);
                (n, vec![n])
            }
            Ast::Literal { bytes, ci } => {
                let op = if *ci {
                    let folded: Vec<u8> =
                        bytes.iter().map(|b| b.to_ascii_lowercase()).collect();
                    Op::LiteralCi(folded.into_boxed_slice())
                } else {
                    Op::Literal(bytes.clone().into_boxed_slice())
                };
                let n = self.push(op);
                (n, vec![n])
            }
            Ast::Class { set, negated } => {
                let class = self.add_class(*set);
                let n = self.push(Op::Class {
                    class,
                    negated: *negated,
                });
                (n, vec![n])
            }
            Ast::AnyChar { newline } => {
                let n = self.push(if *newline { Op::AnyNl } else { Op::Any });
                (n, vec![n])
            }
            Ast::WordChar { negated } => {
                let n = self.push(Op::WordChar { negated: *negated });
                (n, vec![n])
            }
            Ast::Assert(kind) => {
                let op = match kind {
                    AssertKind::LineStart => Op::Bol,
                    AssertKind::LineEnd => Op::Eol,
                    AssertKind::WordStart => Op::WordStart,
                    AssertKind::WordEnd => Op::WordEnd,
                    AssertKind::Boundary => Op::Boundary { negated: false },
                    AssertKind::NotBoundary => Op::Boundary { negated: true },
                };
                let n = self.push(op);
                (n, vec![n])
            }
            Ast::BackRef { group, ci } => {
                let n = self.push(Op::BackRef {
                    group: *group,
                    ci: *ci,
                });
                (n, vec![n])
            }
            Ast::Concat(items) => {
                let mut entry = None;
                let mut exits: Vec<usize> = Vec::new();
                for item in items {
                    let (e, x) = self.emit_ast(item);
                    if entry.is_none() {
                        entry = Some(e);
                    } else {
                        self.patch_all(&exits, e);
                    }
                    exits = x;
                }
                match entry {
                    Some(e) => (e, exits),
                    None => {
                        let n = self.push(Op::Nothing);
                        (n, vec![n])
                    }
                }
            }
            Ast::Alternation(branches) => self.emit_alternation(branches),
            Ast::Group { index, body } => match index {
                Some(i) => {
                    let open = self.push(Op::Open(*i));
                    let (be, bx) = self.emit_ast(body);
                    self.set_next(open, be);
                    let close = self.push(Op::Close(*i));
                    self.patch_all(&bx, close);
                    (open, vec![close])
                }
                None => self.emit_ast(body),
            },
            Ast::Repeat {
                body,
                min,
                max,
                lazy,
            } => self.emit_repeat(body, *min, *max, *lazy),
            Ast::Look { dir, negated, body } => {
                let open = match dir {
                    LookDir::Ahead => self.push(Op::LookAheadOpen { negated: *negated }),
                    LookDir::Behind => {
                        let (wmin, wmax) = body.width();
                        self.push(Op::LookBehindOpen {
                            negated: *negated,
                            min: wmin.min(65535) as u16,
                            max: wmax.unwrap_or(65535).min(65535) as u16,
                        })
                    }
                };
                let (be, bx) = self.emit_ast(body);
                debug_assert_eq!(be, open + 1);
                let close = self.push(match dir {
                    LookDir::Ahead => Op::LookAheadClose,
                    LookDir::Behind => Op::LookBehindClose,
                });
                self.patch_all(&bx, close);
                // continuation hangs off the open node
                (open, vec![open])
            }
        }
    }

    fn emit_alternation(&mut self, branches: &[Ast]) -> (usize, Vec<usize>) {
        let mut branch_nodes = Vec::with_capacity(branches.len());
        let mut body_exits = Vec::new();
        for branch in branches {
            let b = self.push(Op::Branch);
            branch_nodes.push(b);
            let (be, bx) = self.emit_ast(branch);
            debug_assert_eq!(be, b + 1);
            body_exits.extend(bx);
        }
        let join = self.push(Op::Nothing);
        for pair in branch_nodes.windows(2) {
            self.set_next(pair[0], pair[1]);
        }
        if let Some(&last) = branch_nodes.last() {
            self.set_next(last, join);
        }
        self.patch_all(&body_exits, join);
        (branch_nodes[0], vec![join])
    }

    fn emit_repeat(&mut self, body: &Ast, min: u32, max: Option<u32>, lazy: bool) -> (usize, Vec<usize>) {
        if max == Some(0) {
            let n = self.push(Op::Nothing);
            return (n, vec![n]);
        }
        if let Some(operand) = self.simple_operand(body) {
            let n = self.push(Op::Repeat {
                operand,
                min,
                max: max.unwrap_or(u32::MAX),
                lazy,
            });
            return (n, vec![n]);
        }
        match (min, max) {
            (0, None) => self.emit_star(body, lazy),
            (1, None) => self.emit_plus(body, lazy),
            (0, Some(1)) => self.emit_question(body, lazy),
            _ => self.emit_counter_loop(body, min, max, lazy),
        }
    }

    /// `x*` as `BRANCH(x, loop) | BRANCH(exit)`; lazy swaps the order.
    fn emit_star(&mut self, body: &Ast, lazy: bool) -> (usize, Vec<usize>) {
        if !lazy {
            let b1 = self.push(Op::Branch);
            let (be, bx) = self.emit_ast(body);
            debug_assert_eq!(be, b1 + 1);
            let back = self.push(Op::Nothing);
            self.patch_all(&bx, back);
            self.set_next(back, b1);
            let b2 = self.push(Op::Branch);
            let exit = self.push(Op::Nothing);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            (b1, vec![exit])
        } else {
            let b1 = self.push(Op::Branch);
            let exit = self.push(Op::Nothing);
            let b2 = self.push(Op::Branch);
            let (be, bx) = self.emit_ast(body);
            debug_assert_eq!(be, b2 + 1);
            let back = self.push(Op::Nothing);
            self.patch_all(&bx, back);
            self.set_next(back, b1);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            (b1, vec![exit])
        }
    }

    /// `x+` as `x` followed by the choice of looping or leaving.
    fn emit_plus(&mut self, body: &Ast, lazy: bool) -> (usize, Vec<usize>) {
        let (be, bx) = self.emit_ast(body);
        let b1 = self.push(Op::Branch);
        self.patch_all(&bx, b1);
        if !lazy {
            let back = self.push(Op::Nothing);
            self.set_next(back, be);
            let b2 = self.push(Op::Branch);
            let exit = self.push(Op::Nothing);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            (be, vec![exit])
        } else {
            let exit = self.push(Op::Nothing);
            let b2 = self.push(Op::Branch);
            let back = self.push(Op::Nothing);
            self.set_next(back, be);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            (be, vec![exit])
        }
    }

    /// `x?` as a two-way branch over the body or nothing.
    fn emit_question(&mut self, body: &Ast, lazy: bool) -> (usize, Vec<usize>) {
        if !lazy {
            let b1 = self.push(Op::Branch);
            let (be, bx) = self.emit_ast(body);
            debug_assert_eq!(be, b1 + 1);
            let b2 = self.push(Op::Branch);
            let exit = self.push(Op::Nothing);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            self.patch_all(&bx, exit);
            (b1, vec![exit])
        } else {
            let b1 = self.push(Op::Branch);
            let skip = self.push(Op::Nothing);
            let b2 = self.push(Op::Branch);
            let (be, bx) = self.emit_ast(body);
            debug_assert_eq!(be, b2 + 1);
            let exit = self.push(Op::Nothing);
            self.set_next(b1, b2);
            self.set_next(b2, exit);
            self.set_next(skip, exit);
            self.patch_all(&bx, exit);
            (b1, vec![exit])
        }
    }

    /// `x{min,max}` over a complex operand: a branch loop guarded by a
    /// counter, taking another round while `count < max` and leaving once
    /// `count >= min`.
    fn emit_counter_loop(&mut self, body: &Ast, min: u32, max: Option<u32>, lazy: bool) -> (usize, Vec<usize>) {
        let c = self.alloc_counter();
        let limit = max.unwrap_or(u32::MAX);
        let init = self.push(Op::InitCount(c));
        let b1 = self.push(Op::Branch);
        self.set_next(init, b1);
        if !lazy {
            let lt = self.push(Op::CountLt { counter: c, limit });
            let (be, bx) = self.emit_ast(body);
            self.set_next(lt, be);
            let inc = self.push(Op::IncCount(c));
            self.patch_all(&bx, inc);
            let back = self.push(Op::Nothing);
            self.set_next(inc, back);
            self.set_next(back, b1);
            let b2 = self.push(Op::Branch);
            self.set_next(b1, b2);
            let ge = self.push(Op::CountGe { counter: c, limit: min });
            let exit = self.push(Op::Nothing);
            self.set_next(ge, exit);
            self.set_next(b2, exit);
            (init, vec![exit])
        } else {
            let ge = self.push(Op::CountGe { counter: c, limit: min });
            let exit = self.push(Op::Nothing);
            self.set_next(ge, exit);
            let b2 = self.push(Op::Branch);
            self.set_next(b1, b2);
            let lt = self.push(Op::CountLt { counter: c, limit });
            let (be, bx) = self.emit_ast(body);
            self.set_next(lt, be);
            let inc = self.push(Op::IncCount(c));
            self.patch_all(&bx, inc);
            let back = self.push(Op::Nothing);
            self.set_next(inc, back);
            self.set_next(back, b1);
            self.set_next(b2, exit);
            (init, vec![exit])
        }
    }

    fn simple_operand(&mut self, body: &Ast) -> Option<Operand> {
        match body {
            Ast::Literal { bytes, ci } if bytes.len() == 1 => Some(if *ci {
                Operand::LiteralCi(bytes[0].to_ascii_lowercase())
            } else {
                Operand::Literal(bytes[0])
            }),
            Ast::Class { set, negated } => {
                let class = self.add_class(*set);
                Some(Operand::Class {
                    class,
                    negated: *negated,
                })
            }
            Ast::AnyChar { newline } => Some(if *newline {
                Operand::AnyNl
            } else {
                Operand::Any
            }),
            Ast::WordChar { negated } => Some(Operand::WordChar { negated: *negated }),
            _ => None,
        }
    }
}

/// Cheap first-character analysis for the scan loop; bails to `Any` as soon
/// as the leading element is not a plain literal or line anchor.
fn start_hint(ast: &Ast) -> StartHint {
    match ast {
        Ast::Concat(items) => items.first().map_or(StartHint::Any, start_hint),
        Ast::Literal { bytes, ci } if !ci && !bytes.is_empty() => StartHint::Literal(bytes[0]),
        Ast::Group { body, .. } => start_hint(body),
        Ast::Repeat { body, min, .. } if *min >= 1 => start_hint(body),
        Ast::Assert(AssertKind::LineStart) => StartHint::LineStart,
        _ => StartHint::Any,
    }
}
