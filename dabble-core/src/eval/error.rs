use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("variable `{name}` is not defined")]
    UndefinedVariable { name: String },

    #[error("`{form}` expects {expected}")]
    MalformedForm {
        form: &'static str,
        expected: &'static str
    },

    #[error("`{value}` is not callable")]
    NotCallable { value: String },

    #[error("operator `{operator}` cannot be applied to `{left}` and `{right}`")]
    InvalidOperands {
        operator: &'static str,
        left: &'static str,
        right: &'static str
    },

    #[error("operator `{operator}` does not take {given} arguments")]
    WrongArgumentCount {
        operator: &'static str,
        given: usize
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("unable to evaluate `{expression}`")]
    Unimplemented { expression: String },
}
