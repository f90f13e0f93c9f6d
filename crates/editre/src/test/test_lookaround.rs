use super::{find, span};
use crate::*;

#[test]
fn positive_lookahead() {
    let m = find("foo(?=bar)", "xfoobar").unwrap();
    assert_eq!(m.captures.whole(), 1..4);
    // the assertion examined text past the match
    assert_eq!(m.extent, MatchExtent { backward: 1, forward: 7 });

    assert!(find("foo(?=bar)", "foobaz").is_none());
}

#[test]
fn negative_lookahead() {
    assert_eq!(span("foo(?!bar)", "foobaz"), 0..3);
    assert!(find("foo(?!bar)", "foobar").is_none());
}

#[test]
fn positive_lookbehind() {
    let m = find("(?<=@)\\w+", "user@host").unwrap();
    assert_eq!(m.captures.whole(), 5..9);
    assert_eq!(m.extent, MatchExtent { backward: 4, forward: 9 });

    assert!(find("(?<=@)\\w+", "userhost").is_none());
}

#[test]
fn negative_lookbehind() {
    assert_eq!(span("(?<!\\d)cat", "xcat"), 1..4);
    assert!(find("(?<!\\d)cat", "1cat").is_none());
    // nothing before the start counts as "not a digit"
    assert_eq!(span("(?<!\\d)cat", "cat"), 0..3);
}

#[test]
fn variable_width_lookbehind() {
    assert_eq!(span("(?<=ab?)c", "abc"), 2..3);
    assert_eq!(span("(?<=ab?)c", "xac"), 2..3);
    assert_eq!(span("(?<=a{1,3})b", "aaab"), 3..4);
}

#[test]
fn lookahead_captures_are_kept() {
    let text = "abc!";
    let m = find("(?=(\\w+))", text).unwrap();
    assert_eq!(m.captures.whole(), 0..0);
    assert_eq!(m.captures.group_text(1, text), Some("abc"));
}

#[test]
fn negated_assertion_leaves_no_captures() {
    let m = find("(?!(x))a", "a").unwrap();
    assert_eq!(m.captures.group(1), None);
}

#[test]
fn lookbehind_stops_at_search_start() {
    let prog = compile("(?<=ab)c", CompileFlags::default()).unwrap();

    // the default floor is the search start, so the context is invisible
    let m = prog.exec("abc", 2, None, &ExecOptions::default()).unwrap();
    assert!(m.is_none());

    let opts = ExecOptions {
        look_behind_to: Some(0),
        ..ExecOptions::default()
    };
    let m = prog.exec("abc", 2, None, &opts).unwrap().unwrap();
    assert_eq!(m.captures.whole(), 2..3);
    assert_eq!(m.extent.backward, 0);
}

#[test]
fn lookahead_inside_alternation() {
    let m = find("a(?=1)|a(?=2)", "a2").unwrap();
    assert_eq!(m.captures.whole(), 0..1);
    assert_eq!(m.top_branch, 1);
}
