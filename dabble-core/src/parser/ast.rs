use std::fmt::Display;

/// A node of the parse tree: a bare atom or an arbitrarily nested list.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Str(String),
    Word(String),
    List(Vec<Expr>),
}

impl Expr {
    pub fn is_list(&self) -> bool {
        matches!(self, Expr::List(_))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Int(value) => write!(f, "{value}"),
            Expr::Str(value) => write!(f, "\"{value}\""),
            Expr::Word(value) => write!(f, "{value}"),
            Expr::List(items) => {
                let items = items.iter()
                    .map(|item| format!("{item}"))
                    .collect::<Vec<String>>();

                write!(f, "({})", items.join(" "))
            }
        }
    }
}

/// The children of the implicit whole-program list, with the wrapper itself
/// stripped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub forms: Vec<Expr>,
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let forms = self.forms.iter()
            .map(|form| format!("{form}"))
            .collect::<Vec<String>>();

        write!(f, "{}", forms.join("\n"))
    }
}
