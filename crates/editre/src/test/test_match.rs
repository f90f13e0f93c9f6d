use super::{find, find_ci, span};
use crate::*;

#[test]
fn plain_literals() {
    assert_eq!(span("cat", "the cat sat"), 4..7);
    assert!(find("cat", "the dog sat").is_none());
    assert_eq!(span("a{b", "xa{b"), 1..4);
}

#[test]
fn greedy_star_takes_longest() {
    assert_eq!(span("a*", "aaab"), 0..3);
    // zero-width match at the start when nothing matches
    assert_eq!(span("b*", "aaab"), 0..0);
}

#[test]
fn plus_requires_one() {
    assert_eq!(span("ba+", "xbaaay"), 1..5);
    assert!(find("xa+", "x").is_none());
}

#[test]
fn question_is_optional() {
    assert_eq!(span("colou?r", "color"), 0..5);
    assert_eq!(span("colou?r", "colour"), 0..6);
}

#[test]
fn lazy_quantifiers_take_shortest() {
    assert_eq!(span("a+?", "aaa"), 0..1);
    assert_eq!(span("<.+?>", "<a><b>"), 0..3);
    assert_eq!(span("a*?b", "aaab"), 0..4);
}

#[test]
fn quantifier_binds_last_literal_byte() {
    // "abc*" repeats only the 'c'
    assert_eq!(span("abc*", "abccc"), 0..5);
    assert_eq!(span("abc*", "abd"), 0..2);
}

#[test]
fn bounded_repetition_of_single_byte() {
    assert_eq!(span("a{2,3}", "aaaa"), 0..3);
    assert_eq!(span("a{2}", "aaaa"), 0..2);
    assert!(find("a{3,}", "aa").is_none());
    assert_eq!(span("a{0,2}", "b"), 0..0);
}

#[test]
fn bounded_repetition_of_groups() {
    assert_eq!(span("(ab){2,3}", "abababab"), 0..6);
    assert_eq!(span("(ab){2,3}?", "abababab"), 0..4);
    assert!(find("(ab){2}", "abx").is_none());
    // backtracking gives a round back when the tail needs it
    assert_eq!(span("(ab){1,3}abx", "abababx"), 0..7);
}

#[test]
fn alternation_prefers_leftmost_branch() {
    assert_eq!(span("a|ab", "ab"), 0..1);
    assert_eq!(span("cat|dog", "hotdog"), 3..6);
}

#[test]
fn character_classes() {
    assert_eq!(span("[0-9]+", "abc123def"), 3..6);
    assert_eq!(span("[^0-9]+", "123abc"), 3..6);
    assert_eq!(span("[]]", "x]"), 1..2);
    assert_eq!(span("[-a]+", "b-a"), 1..3);
    assert_eq!(span("[\\t\\n]", "x\ty"), 1..2);
    assert_eq!(span("[\\w]+", "ab_9."), 0..4);
}

#[test]
fn negated_class_stops_at_newline() {
    assert!(find("[^a]", "\n").is_none());
    assert_eq!(span("[^a]+", "bc\nd"), 0..2);
}

#[test]
fn dot_stops_at_newline() {
    assert_eq!(span(".+", "ab\ncd"), 0..2);
    assert!(find("a.b", "a\nb").is_none());
    // (?n...) lets it through
    assert_eq!(span("(?na.b)", "a\nb"), 0..3);
}

#[test]
fn shorthand_classes() {
    assert_eq!(span("\\d+", "order 42!"), 6..8);
    assert_eq!(span("\\l+", "123abc"), 3..6);
    assert_eq!(span("\\s+", "ab \t cd"), 2..5);
    assert!(find("\\s", "\n").is_none());
    assert_eq!(span("(?n\\s)", "\n"), 0..1);
}

#[test]
fn line_anchors() {
    assert_eq!(span("^bar", "foo\nbar"), 4..7);
    assert_eq!(span("foo$", "foo\nbar"), 0..3);
    assert_eq!(span("^$", "foo\n\nbar"), 4..4);
    assert!(find("^bar", "foobar").is_none());
}

#[test]
fn backreferences() {
    assert_eq!(span("(cat)\\1", "catcat"), 0..6);
    assert!(find("(cat)\\1", "catdog").is_none());
    assert_eq!(span("(\\w+) \\1", "say dog dog now"), 4..11);
}

#[test]
fn case_insensitive_flag() {
    assert_eq!(find_ci("cat", "a CaT b").unwrap().captures.whole(), 2..5);
    assert_eq!(find_ci("[a-c]+", "xABC").unwrap().captures.whole(), 1..4);
    // the backreference folds as well
    assert_eq!(
        find_ci("(cat)\\1", "CATcat").unwrap().captures.whole(),
        0..6
    );
    assert!(find("cat", "CAT").is_none());
}

#[test]
fn scoped_case_flags() {
    assert_eq!(span("(?icat)", "a CAT"), 2..5);
    // (?I...) turns folding back off inside a case-insensitive pattern
    let prog = compile("(?Icat)", CompileFlags::case_insensitive()).unwrap();
    assert!(
        prog.exec("CAT", 0, None, &ExecOptions::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn escaped_metacharacters() {
    assert_eq!(span("\\(\\)", "f()"), 1..3);
    assert_eq!(span("a\\.b", "xa.b"), 1..4);
    assert!(find("a\\.b", "axb").is_none());
    assert_eq!(span("\\t", "a\tb"), 1..2);
}

#[test]
fn match_at_end_of_text() {
    assert_eq!(span("c$", "abc"), 2..3);
    assert_eq!(span("x*$", "abc"), 3..3);
}
