use std::{cell::RefCell, rc::Rc};

use crate::{
    environment::prelude::{Environment, Value},
    parser::prelude::Expr,
    utils::prelude::Error,
};

use super::{error::RuntimeError, eval, pervasives, run};

fn run_value(src: &str) -> Value {
    match run(src) {
        Ok(value) => value,
        Err(err) => panic!("program failed: {err:?}")
    }
}

fn run_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(Error::Runtime { error }) => error,
        other => panic!("expected a runtime error, got {other:?}")
    }
}

fn int(value: i64) -> Value {
    Value::Integer { value }
}

fn string(value: &str) -> Value {
    Value::String { value: value.to_string() }
}

#[test]
fn test_numbers_evaluate_to_themselves() {
    assert_eq!(run_value("1"), int(1));
}

#[test]
fn test_string_literals_evaluate_to_themselves() {
    assert_eq!(run_value("\"hello\""), string("hello"));
}

#[test]
fn test_empty_program_evaluates_to_nothing() {
    assert_eq!(run_value(""), Value::Unit);
}

#[test]
fn test_addition() {
    assert_eq!(run_value("(+ 1 2)"), int(3));
}

#[test]
fn test_expressions_as_addends() {
    assert_eq!(run_value("(+ (+ 3 2) 5)"), int(10));
}

#[test]
fn test_var_declaration_and_lookup() {
    assert_eq!(run_value("(var x 10) x"), int(10));
}

#[test]
fn test_eval_against_a_given_env() {
    // Trees can also be built by hand and run against an existing scope.
    let env = Rc::new(RefCell::new(Environment::with_parent(pervasives())));

    let declaration = Expr::List(vec![
        Expr::Word("var".to_string()),
        Expr::Word("x".to_string()),
        Expr::Int(10),
    ]);

    assert_eq!(eval(&declaration, env.clone()), Ok(int(10)));
    assert_eq!(eval(&Expr::Word("x".to_string()), env), Ok(int(10)));
}

#[test]
fn test_if_and_greater_than() {
    assert_eq!(run_value("
(var x 10)
(var y 0)
(if (> x 10)
    (set y 20)
    (set y 30))
y"), int(30));
}

#[test]
fn test_if_evaluates_only_the_branch_taken() {
    assert_eq!(run_value("
(var x 0)
(if false (set x 1) 0)
x"), int(0));
}

#[test]
fn test_if_condition_must_be_exactly_true() {
    // A merely truthy condition picks the alternate.
    assert_eq!(run_value("(if 1 10 20)"), int(20));
}

#[test]
fn test_while() {
    assert_eq!(run_value("
(var counter 0)
(while (< counter 10)
    (set counter (+ counter 1)))
counter"), int(10));
}

#[test]
fn test_while_that_never_runs() {
    assert_eq!(run_value("(while false 1)"), Value::Unit);
}

#[test]
fn test_blocks() {
    assert_eq!(run_value("
(begin
    (var x 10)
    (var y 20)
    (+ (* x y) 30))"), int(230));
}

#[test]
fn test_blocks_share_the_enclosing_scope() {
    // Blocks are transparent: only function calls introduce a scope, so
    // the inner `var` rebinds the outer x.
    assert_eq!(run_value("
(var x 10)
(begin
    (var x 20)
    x)
x"), int(20));
}

#[test]
fn test_blocks_can_write_to_enclosing_vars() {
    assert_eq!(run_value("
(var data 10)
(begin
    (set data 100))
data"), int(100));
}

#[test]
fn test_function_definition_and_evaluation() {
    assert_eq!(run_value("
(var square
    (fun (x)
        (* x x)
    )
)

(square 2)"), int(4));
}

#[test]
fn test_function_containing_block() {
    assert_eq!(run_value("
(var calc (fun (x y)
              (begin
                  (var z 30)
                  (+ (* x y) z))))

(calc 10 20)"), int(230));
}

#[test]
fn test_functions_get_their_own_scope() {
    // A `var` inside a function binds in the activation environment and
    // doesn't leak out.
    assert_eq!(run_value("
(var x 1)
(var stomp (fun () (var x 99)))
(stomp)
x"), int(1));
}

#[test]
fn test_first_class_lambda() {
    assert_eq!(run_value("
(var on-click
    (fun (callback)
        (begin
            (var x 10)
            (var y 20)
            (callback (+ x y))
        )
    )
)

(on-click (fun (data) (* data 10)))"), int(300));
}

#[test]
fn test_closures_and_first_class_functions() {
    // The returned adder keeps access to how_much after make_adder returns.
    assert_eq!(run_value("
(var make_adder
    (fun (how_much)
        (begin
            (var adder
                (fun (addend)
                    (+ addend how_much))))))

(var my_adder (make_adder 100))
(my_adder 50)"), int(150));
}

#[test]
fn test_closures_can_write_to_closed_over_vars() {
    assert_eq!(run_value("
(var make-counter
    (fun ()
        (begin
            (var count 0)
            (fun ()
                (begin
                    (set count (+ count 1))
                    count)))))

(var tick (make-counter))
(tick)
(tick)"), int(2));
}

#[test]
fn test_recursion() {
    assert_eq!(run_value("
(var factorial
    (fun (x)
        (if (== x 1)
            1
            (* x (factorial (- x 1))))))

(factorial 5)"), int(120));
}

#[test]
fn test_indentation_style_factorial() {
    assert_eq!(run_value("var factorial
    fun (x)
        if (== x 1)
            1
            * x (factorial (- x 1))
factorial 5"), int(120));
}

#[test]
fn test_indentation_style_while() {
    assert_eq!(run_value("var counter 0
while (< counter 10)
    set counter (+ counter 1)
counter"), int(10));
}

#[test]
fn test_unary_minus() {
    assert_eq!(run_value("(- 5)"), int(-5));
    assert_eq!(run_value("(- 10 4)"), int(6));
}

#[test]
fn test_floor_division() {
    assert_eq!(run_value("(/ 7 2)"), int(3));
    // Rounds toward negative infinity, not zero.
    assert_eq!(run_value("(/ (- 7) 2)"), int(-4));
    assert_eq!(run_error("(/ 1 0)"), RuntimeError::DivisionByZero);
}

#[test]
fn test_string_concatenation() {
    assert_eq!(run_value("(+ \"foo\" \"bar\")"), string("foobar"));
}

#[test]
fn test_equality() {
    assert_eq!(run_value("(== 1 1)"), Value::Boolean { value: true });
    assert_eq!(run_value("(== \"a\" \"b\")"), Value::Boolean { value: false });
    assert_eq!(run_value("(== true false)"), Value::Boolean { value: false });
}

#[test]
fn test_comparisons() {
    assert_eq!(run_value("(> 2 1)"), Value::Boolean { value: true });
    assert_eq!(run_value("(< 2 1)"), Value::Boolean { value: false });
    assert_eq!(run_value("(>= 2 2)"), Value::Boolean { value: true });
    assert_eq!(run_value("(<= 3 2)"), Value::Boolean { value: false });
}

#[test]
fn test_extra_arguments_are_dropped() {
    assert_eq!(run_value("((fun (x) x) 1 2)"), int(1));
}

#[test]
fn test_missing_arguments_stay_unbound() {
    assert_eq!(run_value("((fun (x y) x) 1)"), int(1));
    assert_eq!(
        run_error("((fun (x y) y) 1)"),
        RuntimeError::UndefinedVariable { name: "y".to_string() }
    );
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        run_error("x"),
        RuntimeError::UndefinedVariable { name: "x".to_string() }
    );
}

#[test]
fn test_set_requires_an_existing_binding() {
    assert_eq!(
        run_error("(set x 1)"),
        RuntimeError::UndefinedVariable { name: "x".to_string() }
    );
}

#[test]
fn test_calling_a_non_callable() {
    assert_eq!(
        run_error("(1 2 3)"),
        RuntimeError::NotCallable { value: "1".to_string() }
    );
}

#[test]
fn test_malformed_special_forms() {
    assert!(matches!(run_error("(if true 1)"), RuntimeError::MalformedForm { form: "if", .. }));
    assert!(matches!(run_error("(while true)"), RuntimeError::MalformedForm { form: "while", .. }));
    assert!(matches!(run_error("(var x)"), RuntimeError::MalformedForm { form: "var", .. }));
    assert!(matches!(run_error("(fun x 1)"), RuntimeError::MalformedForm { form: "fun", .. }));
}

#[test]
fn test_operator_type_mismatch() {
    assert!(matches!(
        run_error("(+ 1 \"two\")"),
        RuntimeError::InvalidOperands { operator: "+", .. }
    ));
    assert!(matches!(
        run_error("(+ 1 2 3)"),
        RuntimeError::WrongArgumentCount { operator: "+", given: 3 }
    ));
}
