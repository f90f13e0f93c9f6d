// editre - a byte-oriented regular expression engine for text editors.
// Patterns compile to a flat node program; matching is a backtracking walk
// over that program with editor-specific features: reverse candidate scan,
// sub-range boundary context, configurable word delimiters, and match
// extent reporting for display invalidation.

pub mod compiler;
pub mod delimiters;
pub mod exec;
pub mod program;
pub mod substitute;

#[cfg(test)]
mod test;

/// Capture slot count, including slot 0 for the whole match.
pub const MAX_CAPTURES: usize = 50;

pub use compiler::{CompileError, CompileErrorKind, CompileFlags, compile};
pub use delimiters::{DEFAULT_DELIMITERS, DelimiterTable, set_default_delimiters};
pub use exec::{Captures, ExecError, ExecOptions, MatchExtent, MatchResult};
pub use program::{Program, StartHint};
pub use substitute::{SubstituteError, substitute};
