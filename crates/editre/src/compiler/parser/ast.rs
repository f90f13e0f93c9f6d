use crate::program::CharBitmap;

/// Zero-width assertion kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssertKind {
    LineStart,
    LineEnd,
    WordStart,
    WordEnd,
    Boundary,
    NotBoundary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookDir {
    Ahead,
    Behind,
}

/// Parsed pattern tree. The emitter turns this into the flat node program;
/// width analysis runs on it before emission.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    Alternation(Vec<Ast>),
    Concat(Vec<Ast>),
    Empty,
    Literal { bytes: Vec<u8>, ci: bool },
    Class { set: CharBitmap, negated: bool },
    AnyChar { newline: bool },
    WordChar { negated: bool },
    Assert(AssertKind),
    Group { index: Option<u8>, body: Box<Ast> },
    Repeat { body: Box<Ast>, min: u32, max: Option<u32>, lazy: bool },
    BackRef { group: u8, ci: bool },
    Look { dir: LookDir, negated: bool, body: Box<Ast> },
}

impl Ast {
    /// (min, max) match width in bytes; `None` means unbounded.
    pub fn width(&self) -> (u32, Option<u32>) {
        match self {
            Ast::Alternation(branches) => {
                let mut min = u32::MAX;
                let mut max = Some(0u32);
                for b in branches {
                    let (bmin, bmax) = b.width();
                    min = min.min(bmin);
                    max = match (max, bmax) {
                        (Some(a), Some(b)) => Some(a.max(b)),
                        _ => None,
                    };
                }
                if branches.is_empty() { (0, Some(0)) } else { (min, max) }
            }
            Ast::Concat(items) => {
                let mut min = 0u32;
                let mut max = Some(0u32);
                for item in items {
                    let (imin, imax) = item.width();
                    min = min.saturating_add(imin);
                    max = match (max, imax) {
                        (Some(a), Some(b)) => Some(a.saturating_add(b)),
                        _ => None,
                    };
                }
                (min, max)
            }
            Ast::Empty | Ast::Assert(_) | Ast::Look { .. } => (0, Some(0)),
            Ast::Literal { bytes, .. } => (bytes.len() as u32, Some(bytes.len() as u32)),
            Ast::Class { .. } | Ast::AnyChar { .. } | Ast::WordChar { .. } => (1, Some(1)),
            Ast::Group { body, .. } => body.width(),
            Ast::Repeat { body, min, max, .. } => {
                let (bmin, bmax) = body.width();
                let wmin = bmin.saturating_mul(*min);
                let wmax = match max {
                    Some(m) => bmax.map(|b| b.saturating_mul(*m)),
                    // unbounded repetition of a zero-width body is still zero-width
                    None if bmax == Some(0) => Some(0),
                    None => None,
                };
                (wmin, wmax)
            }
            Ast::BackRef { .. } => (0, None),
        }
    }

    /// True when this matches exactly one byte and carries no captures, so a
    /// quantifier over it fits in a single `Repeat` node.
    pub fn is_single_byte(&self) -> bool {
        match self {
            Ast::Class { .. } | Ast::AnyChar { .. } | Ast::WordChar { .. } => true,
            Ast::Literal { bytes, .. } => bytes.len() == 1,
            _ => false,
        }
    }
}

/// Whether a `{m,n}` quantifier over a complex operand needs a loop counter,
/// as opposed to mapping onto a star/plus/question branch skeleton.
pub fn quantifier_needs_counter(min: u32, max: Option<u32>) -> bool {
    if max == Some(0) {
        return false;
    }
    !matches!((min, max), (0, None) | (1, None) | (0, Some(1)))
}
