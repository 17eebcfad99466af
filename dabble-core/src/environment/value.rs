use std::{cell::RefCell, fmt::Display, rc::Rc};

use crate::parser::prelude::Expr;

use super::environment::Environment;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

#[derive(Debug, Clone)]
pub enum Value {
    Integer {
        value: i64
    },
    String {
        value: String,
    },
    Boolean {
        value: bool
    },
    // What an empty `begin` or a loop that never ran comes back with
    Unit,
    Native {
        op: NativeOp
    },
    Function {
        function: Rc<Function>
    },
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "integer",
            Self::String { .. } => "string",
            Self::Boolean { .. } => "boolean",
            Self::Unit => "unit",
            Self::Native { .. } => "native operator",
            Self::Function { .. } => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer { value: a }, Value::Integer { value: b }) => a == b,
            (Value::String { value: a }, Value::String { value: b }) => a == b,
            (Value::Boolean { value: a }, Value::Boolean { value: b }) => a == b,
            (Value::Unit, Value::Unit) => true,
            (Value::Native { op: a }, Value::Native { op: b }) => a == b,
            // Functions are equal only to themselves
            (Value::Function { function: a }, Value::Function { function: b }) => Rc::ptr_eq(a, b),
            _ => false
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Unit => write!(f, "()"),
            Value::Native { op } => write!(f, "<native {}>", op.as_literal()),
            Value::Function { function } => write!(f, "<function ({})>", function.params.join(" "))
        }
    }
}

/// The builtin operators of the pervasive scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOp {
    Add,
    Sub,
    Mul,
    Div,

    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
}

impl NativeOp {
    pub fn as_literal(&self) -> &'static str {
        match self {
            NativeOp::Add => "+",
            NativeOp::Sub => "-",
            NativeOp::Mul => "*",
            NativeOp::Div => "/",
            NativeOp::GreaterThan => ">",
            NativeOp::LessThan => "<",
            NativeOp::GreaterThanOrEqual => ">=",
            NativeOp::LessThanOrEqual => "<=",
            NativeOp::Equal => "==",
        }
    }
}

/// A user-defined function. The body stays unevaluated until a call, and
/// the defining environment is captured so every function is a closure.
/// Never mutated once built; shared by whatever scopes hold it.
#[derive(Debug)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Expr,
    pub env: Rc<RefCell<Environment>>,
}
