//! A small simply-typed lambda language for meaning expressions
//!
//! Application performs one outermost beta step when the functor is an
//! abstraction; anything deeper is left for an external evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::semantics::{Meaning, SemSort, VarNamer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Var(String),
    Const(String),
    Pred(String, Vec<Expr>),
    Abs(String, Box<Expr>),
    App(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Expr::Const(name.into())
    }

    pub fn pred(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Pred(name.into(), args)
    }

    pub fn abs(var: impl Into<String>, body: Expr) -> Self {
        Expr::Abs(var.into(), Box::new(body))
    }

    /// Replace free occurrences of `name` by `value`. Fresh bound-variable
    /// names come from one session-wide namer, so capture cannot arise.
    fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Var(v) if v == name => value.clone(),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Pred(p, args) => Expr::Pred(
                p.clone(),
                args.iter().map(|a| a.substitute(name, value)).collect(),
            ),
            Expr::Abs(bound, body) => {
                if bound == name {
                    self.clone()
                } else {
                    Expr::Abs(bound.clone(), Box::new(body.substitute(name, value)))
                }
            }
            Expr::App(func, arg) => Expr::App(
                Box::new(func.substitute(name, value)),
                Box::new(arg.substitute(name, value)),
            ),
        }
    }
}

impl Meaning for Expr {
    type Var = String;

    fn fresh_var(namer: &mut VarNamer, _sort: &SemSort) -> String {
        namer.fresh()
    }

    fn var_expr(var: &String) -> Self {
        Expr::Var(var.clone())
    }

    fn apply(&self, argument: &Self) -> Self {
        match self {
            Expr::Abs(bound, body) => body.substitute(bound, argument),
            _ => Expr::App(Box::new(self.clone()), Box::new(argument.clone())),
        }
    }

    fn abstract_over(var: &String, body: &Self) -> Self {
        Expr::Abs(var.clone(), Box::new(body.clone()))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Pred(p, args) => {
                write!(f, "{}(", p)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Abs(v, body) => write!(f, "\u{03BB}{}.{}", v, body),
            Expr::App(func, arg) => match func.as_ref() {
                Expr::Abs(..) => write!(f, "({})({})", func, arg),
                _ => write!(f, "{}({})", func, arg),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_beta_reduces_abstractions() {
        let func = Expr::abs("x", Expr::pred("sleep", vec![Expr::var("x")]));
        let result = func.apply(&Expr::constant("john"));
        assert_eq!(result, Expr::pred("sleep", vec![Expr::constant("john")]));
        assert_eq!(result.to_string(), "sleep(john)");
    }

    #[test]
    fn test_application_to_non_abstraction_stays_symbolic() {
        let result = Expr::var("P").apply(&Expr::constant("john"));
        assert_eq!(result.to_string(), "P(john)");
    }

    #[test]
    fn test_substitution_respects_shadowing() {
        // λx.P(x) has no free x, so substituting for x is a no-op
        let func = Expr::abs("x", Expr::pred("P", vec![Expr::var("x")]));
        let same = func.substitute("x", &Expr::constant("john"));
        assert_eq!(func, same);
    }

    #[test]
    fn test_abstraction_display() {
        let expr = Expr::abs(
            "u1",
            Expr::var("P").apply(&Expr::var("u1")),
        );
        assert_eq!(expr.to_string(), "\u{03BB}u1.P(u1)");
    }
}
