// ABOUTME: Integration tests exercising the crate end to end through lisp_core::run

use lisp_core::{run, Environment, LangError};

fn eval_output(source: &str) -> (String, String) {
    let env = Environment::new();
    let mut out = Vec::new();
    let result = run(&env, &mut out, source).expect("evaluation failed");
    (result.to_string(), String::from_utf8(out).unwrap())
}

fn eval_err(source: &str) -> LangError {
    let env = Environment::new();
    let mut out = Vec::new();
    run(&env, &mut out, source).expect_err("expected evaluation to fail")
}

#[test]
fn test_print_line_of_sum() {
    let (_, out) = eval_output("(print-line (+ 1 2 3 4))");
    assert_eq!(out, "10 \n");
}

#[test]
fn test_define_and_reuse_across_top_level_forms() {
    let (result, _) = eval_output("(define x 3) (define-func add-x (y) (+ x y)) (add-x 4)");
    assert_eq!(result, "7");
}

#[test]
fn test_map_over_user_function() {
    let (result, _) = eval_output(
        "(define-func square (n) (* n n)) (map square (1 2 3 4))",
    );
    assert_eq!(result, "(1 4 9 16)");
}

#[test]
fn test_foldl_and_foldr_agree_for_commutative_op() {
    let (left, _) = eval_output("(foldl (+) 0 (1 2 3 4 5))");
    let (right, _) = eval_output("(foldr (+) 0 (1 2 3 4 5))");
    assert_eq!(left, "15");
    assert_eq!(right, "15");
}

#[test]
fn test_let_nested_scoping() {
    let (result, _) = eval_output("(let ((a 1)) (let ((b 2)) (+ a b)))");
    assert_eq!(result, "3");
}

#[test]
fn test_division_by_zero_is_argument_error() {
    let err = eval_err("(/ 10 0)");
    assert!(matches!(err, LangError::Argument { .. }));
    assert_eq!(err.to_string(), "cannot divide by zero (line 1)");
}

#[test]
fn test_unbound_identifier_is_not_found_error() {
    let err = eval_err("(some-undefined-thing)");
    assert!(matches!(err, LangError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        "'some-undefined-thing' does not exist in this namespace (line 1)"
    );
}

#[test]
fn test_mismatched_parens_is_parse_error() {
    let env = Environment::new();
    let mut out = Vec::new();
    let err = run(&env, &mut out, "(+ 1 2").unwrap_err();
    assert!(matches!(err, LangError::Parse { .. }));
}

#[test]
fn test_user_function_call_is_dynamically_scoped() {
    // get-x is defined before x exists anywhere; it resolves x only because
    // it is invoked from inside a let that binds x, and the call frame's
    // parent is the caller's environment, not the definition environment.
    let (result, _) = eval_output(
        "(define-func get-x () x) (let ((x 7)) (get-x))",
    );
    assert_eq!(result, "7");
}

#[test]
fn test_later_call_argument_sees_earlier_parameter_binding() {
    // x is otherwise unbound; it resolves as the just-bound first
    // parameter because arguments are evaluated against the callee's
    // fresh frame as it is built, not against the caller's environment.
    let (result, _) = eval_output("(define-func f (x y) (+ x y)) (f 1 (+ x 2))");
    assert_eq!(result, "4");
}

#[test]
fn test_quote_prevents_evaluation_of_operator_list() {
    let (result, _) = eval_output("(quote (+ 1 2))");
    assert_eq!(result, "(+ 1 2)");
}

#[test]
fn test_string_append_and_comparison() {
    let (result, _) = eval_output(r#"(if (= (string-append "a" "b") "ab") 1 0)"#);
    assert_eq!(result, "1");
}

#[test]
fn test_car_cdr_and_empty_predicate() {
    let (car, _) = eval_output("(car (quote (10 20 30)))");
    let (cdr, _) = eval_output("(cdr (quote (10 20 30)))");
    let (empty_of_empty, _) = eval_output("(empty? (quote ()))");
    assert_eq!(car, "10");
    assert_eq!(cdr, "(20 30)");
    assert_eq!(empty_of_empty, "#T");
}
