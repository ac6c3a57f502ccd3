//! End-to-end tests for error classification

use pretty_assertions::assert_eq;
use rill::{InterpretError, Value, Vm};

#[test]
fn syntax_errors_are_compile_errors() {
    assert_eq!(rill::interpret("1 +"), Err(InterpretError::Compile));
    assert_eq!(rill::interpret("* 2"), Err(InterpretError::Compile));
    assert_eq!(rill::interpret("(1 + 2"), Err(InterpretError::Compile));
    assert_eq!(rill::interpret(""), Err(InterpretError::Compile));
}

#[test]
fn lexical_errors_are_compile_errors() {
    assert_eq!(rill::interpret("\"open"), Err(InterpretError::Compile));
    assert_eq!(rill::interpret("1 @ 2"), Err(InterpretError::Compile));
}

#[test]
fn keywords_without_expression_rules_fail_to_parse() {
    assert_eq!(rill::interpret("var"), Err(InterpretError::Compile));
    assert_eq!(rill::interpret("print 1"), Err(InterpretError::Compile));
}

#[test]
fn type_mismatches_are_runtime_errors() {
    assert_eq!(rill::interpret("\"a\" - 1"), Err(InterpretError::Runtime));
    assert_eq!(rill::interpret("\"a\" + 1"), Err(InterpretError::Runtime));
    assert_eq!(rill::interpret("true * 2"), Err(InterpretError::Runtime));
    assert_eq!(rill::interpret("-\"x\""), Err(InterpretError::Runtime));
    assert_eq!(rill::interpret("nil < 1"), Err(InterpretError::Runtime));
}

#[test]
fn plus_string_overload_does_not_extend_to_minus() {
    assert_eq!(
        rill::interpret("\"ab\" - \"a\""),
        Err(InterpretError::Runtime)
    );
}

#[test]
fn division_by_zero_follows_ieee() {
    // Not an error: IEEE 754 semantics apply
    match rill::interpret("1 / 0") {
        Ok(Value::Number(n)) => assert!(n.is_infinite()),
        other => panic!("expected infinite number, got {:?}", other),
    }
}

#[test]
fn constant_pool_overflow_is_a_compile_error() {
    let literals: Vec<String> = (0..257).map(|i| i.to_string()).collect();
    let source = literals.join(" + ");
    assert_eq!(rill::interpret(&source), Err(InterpretError::Compile));
}

#[test]
fn errors_do_not_poison_the_vm() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 +"), Err(InterpretError::Compile));
    assert_eq!(vm.interpret("\"a\" - 1"), Err(InterpretError::Runtime));
    assert_eq!(vm.interpret("40 + 2"), Ok(Value::Number(42.0)));
}
