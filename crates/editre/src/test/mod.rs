pub mod test_compile;
pub mod test_lookaround;
pub mod test_match;
pub mod test_word;

use crate::*;

/// Compile `pattern` with default flags and search the whole of `text`.
pub fn find(pattern: &str, text: &str) -> Option<MatchResult> {
    let prog = compile(pattern, CompileFlags::default()).unwrap();
    prog.exec(text, 0, None, &ExecOptions::default()).unwrap()
}

pub fn find_ci(pattern: &str, text: &str) -> Option<MatchResult> {
    let prog = compile(pattern, CompileFlags::case_insensitive()).unwrap();
    prog.exec(text, 0, None, &ExecOptions::default()).unwrap()
}

pub fn compile_err(pattern: &str) -> CompileError {
    compile(pattern, CompileFlags::default()).unwrap_err()
}

/// Whole-match range, panicking when there is no match.
pub fn span(pattern: &str, text: &str) -> std::ops::Range<usize> {
    find(pattern, text).unwrap().captures.whole()
}
