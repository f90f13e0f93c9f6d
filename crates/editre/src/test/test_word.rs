use super::{find, span};
use crate::*;

#[test]
fn word_edges() {
    assert_eq!(span("\\<cat\\>", "a cat sat"), 2..5);
    assert!(find("\\<cat\\>", "concat").is_none());
    assert!(find("\\<cat\\>", "cats").is_none());
    // edges of the whole text are word edges
    assert_eq!(span("\\<cat\\>", "cat"), 0..3);
}

#[test]
fn word_boundaries() {
    assert_eq!(span("\\bcat", "the cat"), 4..7);
    assert!(find("\\bcat", "concat").is_none());
    assert_eq!(span("\\Bcat", "concat"), 3..6);
    assert!(find("\\Bcat", "the cat").is_none());
}

#[test]
fn word_chars_follow_default_delimiters() {
    // '.' is a delimiter out of the box, '_' is not
    assert_eq!(span("\\w+", "foo.bar"), 0..3);
    assert_eq!(span("\\w+", "a_b c"), 0..3);
    assert_eq!(span("\\W", "ab."), 2..3);
}

#[test]
fn always_on_delimiters() {
    let table = DelimiterTable::new("");
    assert!(table.is_delimiter(0));
    assert!(table.is_delimiter(b' '));
    assert!(table.is_delimiter(b'\t'));
    assert!(table.is_delimiter(b'\n'));
    assert!(!table.is_delimiter(b'.'));
}

#[test]
fn per_call_delimiter_override() {
    let prog = compile("\\w+", CompileFlags::default()).unwrap();
    let table = DelimiterTable::new("-");
    let opts = ExecOptions {
        delimiters: Some(&table),
        ..ExecOptions::default()
    };
    // '.' is a word character under this table, '-' is not
    let m = prog.exec("a.b-c", 0, None, &opts).unwrap().unwrap();
    assert_eq!(m.captures.whole(), 0..3);

    // the global default is untouched
    assert_eq!(span("\\w+", "a.b-c"), 0..1);
}

#[test]
fn word_edges_with_custom_table() {
    let prog = compile("\\<x\\>", CompileFlags::default()).unwrap();
    let table = DelimiterTable::new(":");
    let opts = ExecOptions {
        delimiters: Some(&table),
        ..ExecOptions::default()
    };
    let m = prog.exec("a:x:b", 0, None, &opts).unwrap().unwrap();
    assert_eq!(m.captures.whole(), 2..3);
}

#[test]
fn global_default_table_can_be_replaced() {
    let prog = compile("\\w+", CompileFlags::default()).unwrap();

    // extend rather than replace, so concurrent tests see a table that
    // still behaves like the default for everything they touch
    let extended = format!("{DEFAULT_DELIMITERS}5");
    set_default_delimiters(Some(&extended));
    let m = prog.exec("a5b", 0, None, &ExecOptions::default());
    set_default_delimiters(None);

    assert_eq!(m.unwrap().unwrap().captures.whole(), 0..1);

    // restored: digits are word characters again
    assert_eq!(span("\\w+", "a5b"), 0..3);
}
