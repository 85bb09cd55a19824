//! Console builtins against a captured console

mod common;

use common::{call, ints, CapturedConsole};
use dusk_runtime::Value;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// print / println
// ============================================================================

#[test]
fn test_print_writes_display_forms_back_to_back() {
    let console = CapturedConsole::new("");
    let result = call(
        "print",
        &[Value::Integer(1), Value::string("a"), ints(&[2, 3]), Value::Nil],
    );
    assert_eq!(result, Value::Nil);
    assert_eq!(console.output(), "1a[2, 3]nil");
}

#[test]
fn test_println_terminates_each_argument() {
    let console = CapturedConsole::new("");
    call("println", &[Value::string("hello"), Value::Boolean(true)]);
    assert_eq!(console.output(), "hello\ntrue\n");
}

#[rstest]
#[case("print")]
#[case("println")]
fn test_print_without_arguments(#[case] name: &str) {
    let console = CapturedConsole::new("");
    assert_eq!(call(name, &[]), Value::Nil);
    assert_eq!(console.output(), "");
}

#[test]
fn test_println_error_value_prints_message() {
    let console = CapturedConsole::new("");
    let err = call("len", &[Value::Nil]);
    call("println", &[err]);
    assert_eq!(console.output(), "argument to 'len' not supported, got 'NIL'\n");
}

#[test]
fn test_println_builtin_value() {
    let console = CapturedConsole::new("");
    call("println", &[dusk_runtime::builtin_value("push").unwrap()]);
    assert_eq!(console.output(), "<builtin push>\n");
}

// ============================================================================
// readln
// ============================================================================

#[test]
fn test_readln_lines() {
    let _console = CapturedConsole::new("first line\r\nsecond\nno newline");
    assert_eq!(call("readln", &[]), Value::string("first line"));
    assert_eq!(call("readln", &[]), Value::string("second"));
    assert_eq!(call("readln", &[]), Value::string("no newline"));
    assert_eq!(call("readln", &[]), Value::string(""));
}

#[test]
fn test_readln_empty_line() {
    let _console = CapturedConsole::new("\nnext\n");
    assert_eq!(call("readln", &[]), Value::string(""));
    assert_eq!(call("readln", &[]), Value::string("next"));
}

// ============================================================================
// read
// ============================================================================

#[test]
fn test_read_tokens() {
    let _console = CapturedConsole::new("  12 apples\n\n  pears");
    assert_eq!(call("read", &[]), Value::string("12"));
    assert_eq!(call("read", &[]), Value::string("apples"));
    assert_eq!(call("read", &[]), Value::string("pears"));
    assert_eq!(call("read", &[]), Value::string(""));
}

#[test]
fn test_read_then_readln_continues_after_delimiter() {
    let _console = CapturedConsole::new("word tail of line\nnext\n");
    assert_eq!(call("read", &[]), Value::string("word"));
    assert_eq!(call("readln", &[]), Value::string("tail of line"));
    assert_eq!(call("readln", &[]), Value::string("next"));
}

// ============================================================================
// readc
// ============================================================================

#[test]
fn test_readc_characters() {
    let _console = CapturedConsole::new("aé\n");
    assert_eq!(call("readc", &[]), Value::string("a"));
    assert_eq!(call("readc", &[]), Value::string("é"));
    assert_eq!(call("readc", &[]), Value::string("\n"));
    assert_eq!(call("readc", &[]), Value::string(""));
}

#[test]
fn test_readc_truncated_sequence() {
    let _console = CapturedConsole::from_bytes(vec![0xE2, 0x82]);
    assert_eq!(call("readc", &[]), Value::string([0xE2u8, 0x82]));
}

// ============================================================================
// readall
// ============================================================================

#[test]
fn test_readall_takes_everything_left() {
    let _console = CapturedConsole::new("head\nline two\nline three\n");
    assert_eq!(call("readln", &[]), Value::string("head"));
    assert_eq!(
        call("readall", &[]),
        Value::string("line two\nline three\n")
    );
    assert_eq!(call("readall", &[]), Value::string(""));
}

#[test]
fn test_readall_keeps_raw_bytes() {
    let _console = CapturedConsole::from_bytes(vec![b'o', b'k', 0xFF]);
    let content = call("readall", &[]);
    assert_eq!(content.as_bytes(), Some(&[b'o', b'k', 0xFF][..]));
}

// ============================================================================
// Arity
// ============================================================================

#[rstest]
#[case("readln")]
#[case("read")]
#[case("readc")]
#[case("readall")]
fn test_readers_reject_arguments_without_reading(#[case] name: &str) {
    let _console = CapturedConsole::new("untouched\n");
    let result = call(name, &[Value::Integer(1)]);
    common::assert_error(&result, "wrong number of arguments. got '1', expected '0'");
    assert_eq!(call("readln", &[]), Value::string("untouched"));
}
