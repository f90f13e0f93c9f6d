use thiserror::Error;

/// Why compilation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    #[error("empty pattern")]
    EmptyPattern,
    #[error("unmatched parenthesis")]
    UnmatchedParen,
    #[error("unterminated character class")]
    UnterminatedClass,
    #[error("invalid character class range")]
    InvalidClassRange,
    #[error("invalid escape inside character class")]
    InvalidClassEscape,
    #[error("invalid repetition bounds")]
    InvalidRepeatBounds,
    #[error("more than 49 capturing groups")]
    TooManyCaptures,
    #[error("back-reference to unclosed or missing group {0}")]
    DanglingBackRef(u8),
    #[error("trailing backslash")]
    TrailingBackslash,
    #[error("quantifier has nothing to repeat")]
    RepeatWithoutOperand,
    #[error("quantifier applied to a zero-width assertion")]
    RepeatOfAssertion,
    #[error("quantified expression could match the empty string")]
    RepeatCouldMatchEmpty,
    #[error("look-behind does not have a bounded width")]
    UnboundedLookBehind,
    #[error("unrecognized group syntax")]
    InvalidGroup,
    #[error("too many bounded repetitions")]
    TooManyCounters,
}

/// Compile failure, carrying the 0-based offset into the pattern where
/// parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub offset: usize,
}

impl CompileError {
    pub(crate) fn new(kind: CompileErrorKind, offset: usize) -> Self {
        CompileError { kind, offset }
    }
}
