#[cfg(test)]
mod tests;

pub mod error;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::{Environment, Function, NativeOp, Value, FALSE, TRUE},
    parser::prelude::{parse_program, Expr, Program},
    utils::prelude::Error,
};

use self::error::RuntimeError;

/// The root scope of builtin operators. It is built once per run, never
/// mutated afterwards, and shared read-only as the outermost parent of
/// every scope chain.
pub fn pervasives() -> Rc<RefCell<Environment>> {
    let mut env = Environment::new();

    env.define("true", TRUE);
    env.define("false", FALSE);

    env.define("+", Value::Native { op: NativeOp::Add });
    env.define("-", Value::Native { op: NativeOp::Sub });
    env.define("*", Value::Native { op: NativeOp::Mul });
    env.define("/", Value::Native { op: NativeOp::Div });
    env.define(">", Value::Native { op: NativeOp::GreaterThan });
    env.define("<", Value::Native { op: NativeOp::LessThan });
    env.define(">=", Value::Native { op: NativeOp::GreaterThanOrEqual });
    env.define("<=", Value::Native { op: NativeOp::LessThanOrEqual });
    env.define("==", Value::Native { op: NativeOp::Equal });

    Rc::new(RefCell::new(env))
}

/// Evaluate a string containing a Dabble program in a fresh scope over the
/// pervasives.
pub fn run(src: &str) -> Result<Value, Error> {
    let program = parse_program(src)
        .map_err(|error| Error::Parse {
            path: PathBuf::new(),
            src: src.to_string(),
            error
        })?;

    let env = Rc::new(RefCell::new(Environment::with_parent(pervasives())));

    eval_program(&program, env).map_err(|error| Error::Runtime { error })
}

/// Evaluate a source file, wrapping failures with enough context to render
/// a diagnostic against the file.
pub fn run_path(path: PathBuf) -> Result<Value, Error> {
    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(err) => return Err(Error::StdIo { err: err.kind() })
    };

    let program = parse_program(&src)
        .map_err(|error| Error::Parse { path, src: src.clone(), error })?;

    let env = Rc::new(RefCell::new(Environment::with_parent(pervasives())));

    eval_program(&program, env).map_err(|error| Error::Runtime { error })
}

/// Top-level forms evaluate like a `begin` body: in order, in one scope,
/// with the last form's value as the program's value.
pub fn eval_program(program: &Program, env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    eval_sequence(&program.forms, env)
}

pub fn eval(exp: &Expr, env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    match exp {
        Expr::Int(value) => Ok(Value::Integer { value: *value }),
        Expr::Str(value) => Ok(Value::String { value: value.clone() }),
        Expr::Word(name) => {
            if !is_variable_name(name) {
                return Err(RuntimeError::Unimplemented { expression: name.clone() });
            }

            match Environment::look_up(&env, name) {
                Some(value) => Ok(value),
                None => Err(RuntimeError::UndefinedVariable { name: name.clone() })
            }
        },
        Expr::List(items) => eval_list(items, env),
    }
}

fn eval_list(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let Some((verb, args)) = items.split_first() else {
        return Err(RuntimeError::Unimplemented { expression: "()".to_string() });
    };

    if let Expr::Word(word) = verb {
        match word.as_str() {
            "begin" => return eval_sequence(args, env),
            "var" => return eval_var(items, env),
            "set" => return eval_set(items, env),
            "if" => return eval_if(items, env),
            "while" => return eval_while(items, env),
            "fun" => return eval_fun(items, env),
            _ => {}
        }
    }

    // A function call: evaluate the verb, then the arguments left to right.
    let fun = eval(verb, env.clone())?;
    let args = args.iter()
        .map(|arg| eval(arg, env.clone()))
        .collect::<Result<Vec<Value>, RuntimeError>>()?;

    apply(fun, args)
}

/// Sequences don't introduce a new scope; their value is that of their last
/// expression.
fn eval_sequence(forms: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let mut result = Value::Unit;

    for form in forms {
        result = eval(form, env.clone())?;
    }

    Ok(result)
}

fn eval_var(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let (name, exp) = match items {
        [_, Expr::Word(name), exp] => (name, exp),
        _ => return Err(RuntimeError::MalformedForm {
            form: "var",
            expected: "a name and a value"
        })
    };

    let value = eval(exp, env.clone())?;
    env.borrow_mut().define(name, value.clone());

    Ok(value)
}

fn eval_set(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let (name, exp) = match items {
        [_, Expr::Word(name), exp] => (name, exp),
        _ => return Err(RuntimeError::MalformedForm {
            form: "set",
            expected: "a name and a value"
        })
    };

    let value = eval(exp, env.clone())?;

    if !Environment::assign(&env, name, value.clone()) {
        return Err(RuntimeError::UndefinedVariable { name: name.clone() });
    }

    Ok(value)
}

fn eval_if(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let (condition, consequent, alternate) = match items {
        [_, condition, consequent, alternate] => (condition, consequent, alternate),
        _ => return Err(RuntimeError::MalformedForm {
            form: "if",
            expected: "a condition and two branches"
        })
    };

    // The condition must come out as `true` itself, not merely truthy, and
    // only the branch taken gets evaluated.
    if eval(condition, env.clone())? == TRUE {
        eval(consequent, env)
    } else {
        eval(alternate, env)
    }
}

fn eval_while(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let (condition, body) = match items {
        [_, condition, body] => (condition, body),
        _ => return Err(RuntimeError::MalformedForm {
            form: "while",
            expected: "a condition and a body"
        })
    };

    let mut result = Value::Unit;

    while eval(condition, env.clone())? == TRUE {
        result = eval(body, env.clone())?;
    }

    Ok(result)
}

fn eval_fun(items: &[Expr], env: Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    let (params, body) = match items {
        [_, Expr::List(params), body] => (params, body),
        _ => return Err(RuntimeError::MalformedForm {
            form: "fun",
            expected: "a parameter list and a body"
        })
    };

    let params = params.iter()
        .map(|param| match param {
            Expr::Word(name) => Ok(name.clone()),
            _ => Err(RuntimeError::MalformedForm {
                form: "fun",
                expected: "parameter names to be words"
            })
        })
        .collect::<Result<Vec<String>, RuntimeError>>()?;

    // The body is not evaluated here, and the current env is captured so
    // the function closes over its definition site.
    Ok(Value::Function {
        function: Rc::new(Function {
            params,
            body: body.clone(),
            env
        })
    })
}

pub fn apply(fun: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    match fun {
        Value::Native { op } => apply_native(op, &args),
        Value::Function { function } => {
            // An empty env holding nothing but the bound param names (the
            // activation environment), pointing at the closed-over env as
            // its parent. Params and args zip shortest: extra arguments are
            // dropped, extra params stay unbound.
            let mut activation = Environment::with_parent(function.env.clone());

            for (param, arg) in function.params.iter().zip(args) {
                activation.define(param, arg);
            }

            eval(&function.body, Rc::new(RefCell::new(activation)))
        },
        value => Err(RuntimeError::NotCallable { value: value.to_string() })
    }
}

fn apply_native(op: NativeOp, args: &[Value]) -> Result<Value, RuntimeError> {
    // Minus is the one operator that also works on a single operand.
    if let (NativeOp::Sub, [Value::Integer { value }]) = (op, args) {
        return match value.checked_neg() {
            Some(value) => Ok(Value::Integer { value }),
            None => Err(RuntimeError::IntegerOverflow)
        };
    }

    let (left, right) = match args {
        [left, right] => (left, right),
        _ => return Err(RuntimeError::WrongArgumentCount {
            operator: op.as_literal(),
            given: args.len()
        })
    };

    match (op, left, right) {
        (NativeOp::Add, Value::Integer { value: a }, Value::Integer { value: b }) => {
            match a.checked_add(*b) {
                Some(value) => Ok(Value::Integer { value }),
                None => Err(RuntimeError::IntegerOverflow)
            }
        },
        (NativeOp::Add, Value::String { value: a }, Value::String { value: b }) => {
            Ok(Value::String { value: format!("{a}{b}") })
        },
        (NativeOp::Sub, Value::Integer { value: a }, Value::Integer { value: b }) => {
            match a.checked_sub(*b) {
                Some(value) => Ok(Value::Integer { value }),
                None => Err(RuntimeError::IntegerOverflow)
            }
        },
        (NativeOp::Mul, Value::Integer { value: a }, Value::Integer { value: b }) => {
            match a.checked_mul(*b) {
                Some(value) => Ok(Value::Integer { value }),
                None => Err(RuntimeError::IntegerOverflow)
            }
        },
        (NativeOp::Div, Value::Integer { value: a }, Value::Integer { value: b }) => {
            if *b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }

            match floor_div(*a, *b) {
                Some(value) => Ok(Value::Integer { value }),
                None => Err(RuntimeError::IntegerOverflow)
            }
        },
        (NativeOp::GreaterThan, Value::Integer { value: a }, Value::Integer { value: b }) => {
            Ok(Value::Boolean { value: a > b })
        },
        (NativeOp::LessThan, Value::Integer { value: a }, Value::Integer { value: b }) => {
            Ok(Value::Boolean { value: a < b })
        },
        (NativeOp::GreaterThanOrEqual, Value::Integer { value: a }, Value::Integer { value: b }) => {
            Ok(Value::Boolean { value: a >= b })
        },
        (NativeOp::LessThanOrEqual, Value::Integer { value: a }, Value::Integer { value: b }) => {
            Ok(Value::Boolean { value: a <= b })
        },
        (NativeOp::Equal, left, right) => {
            Ok(Value::Boolean { value: left == right })
        },
        (op, left, right) => Err(RuntimeError::InvalidOperands {
            operator: op.as_literal(),
            left: left.type_name(),
            right: right.type_name()
        })
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;

    if a % b != 0 && (a < 0) != (b < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// Words that can name a variable: letters, digits, `_`, and the operator
/// characters. The lexer never puts digits inside words, but trees can also
/// be built by hand.
fn is_variable_name(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|ch| {
        matches!(ch, '-' | '+' | '*' | '/' | '<' | '>' | '=' | '_' | 'a'..='z' | 'A'..='Z' | '0'..='9')
    })
}
