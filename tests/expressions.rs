//! End-to-end tests for expression evaluation

use pretty_assertions::assert_eq;
use rill::{Value, Vm};

fn eval_number(source: &str) -> f64 {
    match rill::interpret(source) {
        Ok(Value::Number(n)) => n,
        other => panic!("expected number from '{}', got {:?}", source, other),
    }
}

fn eval_bool(source: &str) -> bool {
    match rill::interpret(source) {
        Ok(Value::Bool(b)) => b,
        other => panic!("expected bool from '{}', got {:?}", source, other),
    }
}

fn eval_display(source: &str) -> String {
    let mut vm = Vm::new();
    match vm.interpret(source) {
        Ok(value) => value.display(&vm.heap),
        other => panic!("expected success from '{}', got {:?}", source, other),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(eval_number("1 + 2 * 3"), 7.0);
    assert_eq!(eval_number("(1 + 2) * 3"), 9.0);
    assert_eq!(eval_number("1 - 2 - 3"), -4.0);
    assert_eq!(eval_number("2 * 3 + 4 / 2"), 8.0);
    assert_eq!(eval_number("-(-3)"), 3.0);
}

#[test]
fn mixed_precedence_with_unary() {
    assert_eq!(eval_number("-2 * 3"), -6.0);
    assert_eq!(eval_number("3 * -2"), -6.0);
    assert_eq!(eval_bool("-1 < 1"), true);
}

#[test]
fn fractional_numbers() {
    assert_eq!(eval_number("1.5 + 2.25"), 3.75);
    assert_eq!(eval_display("0.1 + 0.2"), format!("{}", 0.1 + 0.2));
}

#[test]
fn comparisons_and_equality() {
    assert_eq!(eval_bool("1 < 2"), true);
    assert_eq!(eval_bool("2 <= 2"), true);
    assert_eq!(eval_bool("3 >= 4"), false);
    assert_eq!(eval_bool("1 + 2 == 3"), true);
    assert_eq!(eval_bool("1 + 2 != 4"), true);
    assert_eq!(eval_bool("2 > 1 == true"), true);
}

#[test]
fn equality_never_crosses_tags() {
    assert_eq!(eval_bool("1 == \"1\""), false);
    assert_eq!(eval_bool("nil == false"), false);
    assert_eq!(eval_bool("0 == nil"), false);
}

#[test]
fn falsiness_rules() {
    assert_eq!(eval_bool("!0"), false);
    assert_eq!(eval_bool("!nil"), true);
    assert_eq!(eval_bool("!false"), true);
    assert_eq!(eval_bool("!\"\""), false);
}

#[test]
fn string_concatenation() {
    assert_eq!(eval_display("\"ab\" + \"cd\""), "abcd");
    assert_eq!(eval_display("\"a\" + \"b\" + \"c\""), "abc");
    assert_eq!(eval_display("\"\" + \"\""), "");
}

#[test]
fn string_equality_is_structural() {
    assert_eq!(eval_bool("\"ab\" + \"cd\" == \"abcd\""), true);
    assert_eq!(eval_bool("\"ab\" == \"ba\""), false);
}

#[test]
fn value_printing() {
    assert_eq!(eval_display("true"), "true");
    assert_eq!(eval_display("nil"), "nil");
    assert_eq!(eval_display("3"), "3");
    assert_eq!(eval_display("1.5"), "1.5");
    assert_eq!(eval_display("\"raw text\""), "raw text");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(eval_number("1 + // the rest is ignored\n2"), 3.0);
}

#[test]
fn repl_style_session_reuses_the_vm() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("1 + 1").unwrap(), Value::Number(2.0));
    let greeting = vm.interpret("\"hi \" + \"there\"").unwrap();
    assert_eq!(greeting.display(&vm.heap), "hi there");
    assert_eq!(vm.interpret("2 * 2").unwrap(), Value::Number(4.0));
}
