use super::compile_err;
use crate::*;

#[test]
fn empty_pattern() {
    let e = compile_err("");
    assert_eq!(e.kind, CompileErrorKind::EmptyPattern);
    assert_eq!(e.offset, 0);
}

#[test]
fn unmatched_parens() {
    let e = compile_err("(ab");
    assert_eq!(e.kind, CompileErrorKind::UnmatchedParen);
    assert_eq!(e.offset, 0);

    let e = compile_err("ab)");
    assert_eq!(e.kind, CompileErrorKind::UnmatchedParen);
    assert_eq!(e.offset, 2);

    let e = compile_err("a(b(c)");
    assert_eq!(e.kind, CompileErrorKind::UnmatchedParen);
    assert_eq!(e.offset, 1);
}

#[test]
fn unterminated_class() {
    let e = compile_err("x[ab");
    assert_eq!(e.kind, CompileErrorKind::UnterminatedClass);
    assert_eq!(e.offset, 1);
}

#[test]
fn bad_class_contents() {
    assert_eq!(compile_err("[z-a]").kind, CompileErrorKind::InvalidClassRange);
    assert_eq!(compile_err("[\\D]").kind, CompileErrorKind::InvalidClassEscape);
    assert_eq!(compile_err("[\\1]").kind, CompileErrorKind::InvalidClassEscape);
}

#[test]
fn bad_repeat_bounds() {
    let e = compile_err("a{3,1}");
    assert_eq!(e.kind, CompileErrorKind::InvalidRepeatBounds);
    assert_eq!(e.offset, 1);

    assert_eq!(
        compile_err("a{70000}").kind,
        CompileErrorKind::InvalidRepeatBounds
    );
}

#[test]
fn brace_without_digits_is_literal() {
    assert!(compile("a{b", CompileFlags::default()).is_ok());
    assert!(compile("{x}", CompileFlags::default()).is_ok());
}

#[test]
fn repeat_without_operand() {
    assert_eq!(compile_err("*a").kind, CompileErrorKind::RepeatWithoutOperand);
    assert_eq!(compile_err("+").kind, CompileErrorKind::RepeatWithoutOperand);
    assert_eq!(
        compile_err("{2,3}").kind,
        CompileErrorKind::RepeatWithoutOperand
    );
}

#[test]
fn repeat_of_assertion_rejected() {
    assert_eq!(compile_err("\\b*").kind, CompileErrorKind::RepeatOfAssertion);
    assert_eq!(compile_err("^+").kind, CompileErrorKind::RepeatOfAssertion);
    assert_eq!(
        compile_err("(?=a)*").kind,
        CompileErrorKind::RepeatOfAssertion
    );
}

#[test]
fn unbounded_repeat_of_empty_rejected() {
    assert_eq!(
        compile_err("(a*)*").kind,
        CompileErrorKind::RepeatCouldMatchEmpty
    );
    assert_eq!(
        compile_err("(a|b?)+").kind,
        CompileErrorKind::RepeatCouldMatchEmpty
    );
    // bounded repetition of a possibly-empty body is fine
    assert!(compile("(a*){2,4}", CompileFlags::default()).is_ok());
}

#[test]
fn dangling_backrefs() {
    assert_eq!(
        compile_err("\\1").kind,
        CompileErrorKind::DanglingBackRef(1)
    );
    assert_eq!(
        compile_err("(a)\\2").kind,
        CompileErrorKind::DanglingBackRef(2)
    );
    // a group cannot reference itself before it closes
    assert_eq!(
        compile_err("(a\\1)").kind,
        CompileErrorKind::DanglingBackRef(1)
    );
    assert_eq!(compile_err("\\0").kind, CompileErrorKind::DanglingBackRef(0));
}

#[test]
fn trailing_backslash() {
    let e = compile_err("ab\\");
    assert_eq!(e.kind, CompileErrorKind::TrailingBackslash);
    assert_eq!(e.offset, 2);
}

#[test]
fn capture_limit() {
    let forty_nine = "()".repeat(49);
    assert!(compile(&forty_nine, CompileFlags::default()).is_ok());

    let fifty = "()".repeat(50);
    assert_eq!(compile_err(&fifty).kind, CompileErrorKind::TooManyCaptures);
}

#[test]
fn lookbehind_must_be_bounded() {
    assert_eq!(
        compile_err("(?<=a+)b").kind,
        CompileErrorKind::UnboundedLookBehind
    );
    assert_eq!(
        compile_err("(?<!x.*)y").kind,
        CompileErrorKind::UnboundedLookBehind
    );
    assert!(compile("(?<=a{1,10})b", CompileFlags::default()).is_ok());
}

#[test]
fn unknown_group_syntax() {
    assert_eq!(compile_err("(?x)").kind, CompileErrorKind::InvalidGroup);
    assert_eq!(compile_err("(?<a)").kind, CompileErrorKind::InvalidGroup);
}

#[test]
fn start_hints() {
    let hint = |p: &str| compile(p, CompileFlags::default()).unwrap().start_hint();
    assert_eq!(hint("cat"), StartHint::Literal(b'c'));
    assert_eq!(hint("^foo"), StartHint::LineStart);
    assert_eq!(hint("(dog)+"), StartHint::Literal(b'd'));
    assert_eq!(hint("[ab]x"), StartHint::Any);
    assert_eq!(hint("a|b"), StartHint::Any);
}

#[test]
fn group_counting() {
    let prog = compile("(a)((b)c)", CompileFlags::default()).unwrap();
    assert_eq!(prog.group_count(), 4);

    let prog = compile("(?:a)(b)", CompileFlags::default()).unwrap();
    assert_eq!(prog.group_count(), 2);
}

#[test]
fn error_display() {
    let e = compile_err("(ab");
    assert_eq!(e.to_string(), "unmatched parenthesis at offset 0");
}
