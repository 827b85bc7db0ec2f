//! Tests for `print`, `read-int` and `read-string`.

use brew_ir::build::AstBuilder;
use brew_ir::{BinaryOp, StringInterner};
use pretty_assertions::assert_eq;

use super::{run, run_err, run_with_input, with_main};
use crate::ErrorKind;

#[test]
fn print_concatenates_arguments() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.print(vec![b.str("x = "), b.int(3), b.str(", "), b.bool(false), b.nil()]),
            b.print(vec![]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "x = 3, falsenil\n\n");
}

#[test]
fn print_returns_nil() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("r", b.call("print", vec![b.str("side")])),
            b.print(vec![b.var("r")]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "side\nnil\n");
}

#[test]
fn read_int_parses_trimmed_line() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("n", b.call("read-int", vec![b.str("number? ")])),
            b.print(vec![b.binary(BinaryOp::Mul, b.var("n"), b.int(2))]),
        ],
        vec![],
    );
    assert_eq!(
        run_with_input(&interner, &program, &["  21 "]).unwrap(),
        "number? \n42\n"
    );
}

#[test]
fn read_string_returns_line_verbatim() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("s", b.call("read-string", vec![])),
            b.print(vec![b.str("["), b.var("s"), b.str("]")]),
        ],
        vec![],
    );
    assert_eq!(
        run_with_input(&interner, &program, &[" hello "]).unwrap(),
        "[ hello ]\n"
    );
}

#[test]
fn short_aliases_read_input() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.print(vec![b.call("inputi", vec![])]),
            b.print(vec![b.call("inputs", vec![])]),
        ],
        vec![],
    );
    assert_eq!(
        run_with_input(&interner, &program, &["7", "seven"]).unwrap(),
        "7\nseven\n"
    );
}

#[test]
fn read_int_rejects_non_numeric_input() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(&b, vec![b.call_stmt("read-int", vec![])], vec![]);
    let err = run_with_input(&interner, &program, &["twelve"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn exhausted_input_reads_empty() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.print(vec![b.str("<"), b.call("read-string", vec![]), b.str(">")])],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "<>\n");

    let program = with_main(&b, vec![b.call_stmt("read-int", vec![])], vec![]);
    assert_eq!(run_err(&interner, &program), ErrorKind::Type);
}

#[test]
fn read_with_two_prompts_is_name_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("read-string", vec![b.str("a"), b.str("b")])],
        vec![],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Name);
}

#[test]
fn builtins_take_precedence_over_user_functions() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.print(vec![b.str("builtin")])],
        vec![b.func("print", &["x"], vec![b.call_stmt("print", vec![b.str("user")])])],
    );
    assert_eq!(run(&interner, &program).unwrap(), "builtin\n");
}
