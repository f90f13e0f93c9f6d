// Pattern compiler - Main module
// Parses a pattern string into an Ast, analyzes it, and emits the flat
// node program executed by the matcher.

mod emit;
pub mod parser;

pub use parser::error::{CompileError, CompileErrorKind};

use crate::program::Program;

/// Default settings applied to a whole pattern; `(?i...)` / `(?I...)`
/// groups override case folding locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileFlags {
    pub case_insensitive: bool,
}

impl CompileFlags {
    pub fn case_insensitive() -> Self {
        CompileFlags {
            case_insensitive: true,
        }
    }
}

/// Compile `pattern` into an executable program.
///
/// Errors carry the kind of failure and the 0-based offset into the pattern
/// where parsing stopped.
pub fn compile(pattern: &str, flags: CompileFlags) -> Result<Program, CompileError> {
    let parsed = parser::parse(pattern, flags)?;
    Ok(emit::emit_program(&parsed, flags))
}
