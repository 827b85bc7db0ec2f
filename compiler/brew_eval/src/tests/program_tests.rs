//! Whole-program tests: variables, blocks, calls and reference parameters.

use brew_ir::build::AstBuilder;
use brew_ir::{BinaryOp, StringInterner};
use pretty_assertions::assert_eq;

use super::{run, run_err, with_main};
use crate::{buffer_handler, ErrorKind, EvalMode, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

#[test]
fn assignment_then_read_yields_last_value() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(5)),
            b.assign("x", b.str("five")),
            b.print(vec![b.var("x")]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "five\n");
}

#[test]
fn read_before_assignment_is_name_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.print(vec![b.var("x")]), b.assign("x", b.int(1))],
        vec![],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Name);
}

#[test]
fn block_locals_do_not_escape() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.if_then(b.bool(true), vec![b.assign("y", b.int(1))]),
            b.print(vec![b.var("y")]),
        ],
        vec![],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Name);
}

#[test]
fn block_updates_outer_variable() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(1)),
            b.if_else(
                b.bool(false),
                vec![],
                vec![b.assign("x", b.int(2)), b.assign("tmp", b.int(3))],
            ),
            b.print(vec![b.var("x")]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "2\n");
}

#[test]
fn while_body_gets_fresh_frame_each_iteration() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let i = || b.var("i");
    let program = with_main(
        &b,
        vec![
            b.assign("i", b.int(0)),
            b.while_loop(
                b.binary(BinaryOp::Lt, i(), b.int(3)),
                vec![
                    b.print(vec![i()]),
                    b.assign("i", b.binary(BinaryOp::Add, i(), b.int(1))),
                ],
            ),
            b.print(vec![b.str("done "), i()]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "0\n1\n2\ndone 3\n");
}

#[test]
fn return_inside_loop_leaves_function() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.print(vec![b.call("first_over", vec![b.int(10)])])],
        vec![b.func(
            "first_over",
            &["limit"],
            vec![
                b.assign("n", b.int(1)),
                b.while_loop(
                    b.bool(true),
                    vec![
                        b.if_then(
                            b.binary(BinaryOp::Gt, b.var("n"), b.var("limit")),
                            vec![b.ret(b.var("n"))],
                        ),
                        b.assign("n", b.binary(BinaryOp::Mul, b.var("n"), b.int(2))),
                    ],
                ),
            ],
        )],
    );
    assert_eq!(run(&interner, &program).unwrap(), "16\n");
}

#[test]
fn integer_conditions_are_accepted() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.if_else(b.int(0), vec![b.print(vec![b.str("zero")])], vec![b.print(vec![b.str("else")])]),
            b.if_then(b.int(-2), vec![b.print(vec![b.str("nonzero")])]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "else\nnonzero\n");
}

#[test]
fn string_condition_is_type_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(&b, vec![b.while_loop(b.str("yes"), vec![])], vec![]);
    assert_eq!(run_err(&interner, &program), ErrorKind::Type);
}

#[test]
fn reference_parameter_writes_back() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(0)),
            b.call_stmt("foo", vec![b.var("x")]),
            b.print(vec![b.var("x")]),
        ],
        vec![b.func("foo", &["ref x"], vec![b.assign("x", b.int(42)), b.ret_nothing()])],
    );
    assert_eq!(run(&interner, &program).unwrap(), "42\n");
}

#[test]
fn reference_parameter_with_expression_actual_does_not_write_back() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(0)),
            b.call_stmt("foo", vec![b.binary(BinaryOp::Add, b.var("x"), b.int(0))]),
            b.call_stmt("foo", vec![b.int(7)]),
            b.print(vec![b.var("x")]),
        ],
        vec![b.func("foo", &["ref p"], vec![b.assign("p", b.int(42))])],
    );
    assert_eq!(run(&interner, &program).unwrap(), "0\n");
}

#[test]
fn reference_parameters_chain_through_calls() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(0)),
            b.call_stmt("outer", vec![b.var("x")]),
            b.print(vec![b.var("x")]),
        ],
        vec![
            b.func("outer", &["ref p"], vec![b.call_stmt("inner", vec![b.var("p")])]),
            b.func(
                "inner",
                &["ref q"],
                vec![b.if_then(b.bool(true), vec![b.assign("q", b.int(7))])],
            ),
        ],
    );
    assert_eq!(run(&interner, &program).unwrap(), "7\n");
}

#[test]
fn value_parameter_is_a_copy() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.assign("x", b.int(0)),
            b.call_stmt("foo", vec![b.var("x")]),
            b.print(vec![b.var("x")]),
        ],
        vec![b.func("foo", &["x"], vec![b.assign("x", b.int(1))])],
    );
    assert_eq!(run(&interner, &program).unwrap(), "0\n");
}

#[test]
fn callee_sees_caller_variables() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.assign("v", b.int(3)), b.call_stmt("show", vec![])],
        vec![b.func("show", &[], vec![b.print(vec![b.var("v")])])],
    );
    assert_eq!(run(&interner, &program).unwrap(), "3\n");
}

#[test]
fn overloads_dispatch_on_arity() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.print(vec![b.call("f", vec![])]),
            b.print(vec![b.call("f", vec![b.int(1)])]),
        ],
        vec![
            b.func("f", &[], vec![b.ret(b.str("none"))]),
            b.func("f", &["a"], vec![b.ret(b.str("one"))]),
        ],
    );
    assert_eq!(run(&interner, &program).unwrap(), "none\none\n");
}

#[test]
fn missing_arity_is_name_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("f", vec![b.int(1), b.int(2)])],
        vec![b.func("f", &["a"], vec![])],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Name);
}

#[test]
fn fall_through_returns_nil() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.print(vec![b.call("f", vec![])]),
            b.print(vec![b.call("g", vec![])]),
        ],
        vec![
            b.func("f", &[], vec![b.assign("a", b.int(1))]),
            b.func("g", &[], vec![b.ret_nothing()]),
        ],
    );
    assert_eq!(run(&interner, &program).unwrap(), "nil\nnil\n");
}

#[test]
fn recursion_computes_factorial() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let n = || b.var("n");
    let program = with_main(
        &b,
        vec![b.print(vec![b.call("fact", vec![b.int(10)])])],
        vec![b.func(
            "fact",
            &["n"],
            vec![
                b.if_then(b.binary(BinaryOp::LtEq, n(), b.int(1)), vec![b.ret(b.int(1))]),
                b.ret(b.binary(
                    BinaryOp::Mul,
                    n(),
                    b.call("fact", vec![b.binary(BinaryOp::Sub, n(), b.int(1))]),
                )),
            ],
        )],
    );
    assert_eq!(run(&interner, &program).unwrap(), "3628800\n");
}

#[test]
fn missing_main_fails_before_running() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.program(vec![
        b.func("helper", &[], vec![b.print(vec![b.str("ran")])]),
        b.func("main", &["argv"], vec![b.print(vec![b.str("ran")])]),
    ]);
    let err = run(&interner, &program).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    assert!(err.backtrace().is_empty());
}

#[test]
fn runaway_recursion_is_runtime_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("spin", vec![])],
        vec![b.func("spin", &[], vec![b.ret(b.call("spin", vec![]))])],
    );
    let err = run(&interner, &program).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.backtrace().first().map(String::as_str), Some("main"));
    assert_eq!(err.backtrace().len(), 500);
}

#[test]
fn interpret_mode_caps_runaway_recursion() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("f", vec![])],
        vec![b.func("f", &[], vec![b.call_stmt("f", vec![])])],
    );
    let mut interp = InterpreterBuilder::new(&interner, &program)
        .mode(EvalMode::Interpret)
        .io_handler(buffer_handler(Vec::<String>::new()))
        .build();
    let err = interp.run().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.backtrace().len(), DEFAULT_MAX_CALL_DEPTH);
    assert_eq!(interp.get_output(), "");
}

#[test]
fn explicit_depth_limit_overrides_mode() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.print(vec![b.call("depth", vec![b.int(5)])])],
        vec![b.func(
            "depth",
            &["n"],
            vec![
                b.if_then(
                    b.binary(BinaryOp::Eq, b.var("n"), b.int(0)),
                    vec![b.ret(b.str("bottom"))],
                ),
                b.ret(b.call("depth", vec![b.binary(BinaryOp::Sub, b.var("n"), b.int(1))])),
            ],
        )],
    );
    let mut shallow = InterpreterBuilder::new(&interner, &program)
        .mode(EvalMode::TestRun)
        .max_call_depth(4)
        .build();
    assert_eq!(shallow.run().unwrap_err().kind(), ErrorKind::Runtime);

    let mut deep = InterpreterBuilder::new(&interner, &program)
        .mode(EvalMode::TestRun)
        .max_call_depth(7)
        .build();
    deep.run().unwrap();
    assert_eq!(deep.get_output(), "bottom\n");
}

#[test]
fn error_backtrace_names_active_functions() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("outer", vec![])],
        vec![
            b.func("outer", &[], vec![b.call_stmt("inner", vec![])]),
            b.func(
                "inner",
                &[],
                vec![b.print(vec![b.binary(BinaryOp::Div, b.int(1), b.int(0))])],
            ),
        ],
    );
    let err = run(&interner, &program).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.backtrace(), ["main", "outer", "inner"]);
}

#[test]
fn variable_and_function_with_same_name_is_ambiguous() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.assign("f", b.int(1)), b.print(vec![b.var("f")])],
        vec![b.func("f", &[], vec![])],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Name);
}

#[test]
fn non_closure_variable_shadowing_function_is_type_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.assign("f", b.int(1)), b.call_stmt("f", vec![])],
        vec![b.func("f", &[], vec![])],
    );
    assert_eq!(run_err(&interner, &program), ErrorKind::Type);
}

#[test]
fn floor_division_in_programs() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![
            b.print(vec![b.binary(BinaryOp::Div, b.neg(b.int(7)), b.int(2))]),
            b.print(vec![b.binary(BinaryOp::Div, b.int(7), b.neg(b.int(2)))]),
            b.print(vec![b.binary(BinaryOp::Div, b.neg(b.int(7)), b.neg(b.int(2)))]),
        ],
        vec![],
    );
    assert_eq!(run(&interner, &program).unwrap(), "-4\n-4\n3\n");
}

#[test]
fn profile_counts_calls() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = with_main(
        &b,
        vec![b.call_stmt("f", vec![]), b.call_stmt("f", vec![])],
        vec![b.func("f", &[], vec![])],
    );
    let mut interp = InterpreterBuilder::new(&interner, &program)
        .mode(EvalMode::TestRun)
        .profile(true)
        .build();
    interp.run().unwrap();
    let counters = interp.counters().unwrap();
    assert_eq!(counters.function_calls, 2);
    assert_eq!(counters.statements_executed, 2);
    assert_eq!(counters.method_calls, 0);
}
