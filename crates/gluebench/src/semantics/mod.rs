//! The meaning side of derivations
//!
//! The prover never inspects meaning expressions. Everything it needs is
//! behind the [`Meaning`] trait: mint a variable, apply, abstract. The
//! [`lambda`] module provides the expression language used by default.

pub mod lambda;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::linear::{Sort, Term, TermNode};

/// Semantic type of a meaning expression, the homomorphic image of a glue
/// term under [`meaning_sort`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemSort {
    E,
    T,
    Fun(Box<SemSort>, Box<SemSort>),
}

impl fmt::Display for SemSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemSort::E => write!(f, "e"),
            SemSort::T => write!(f, "t"),
            SemSort::Fun(from, to) => write!(f, "<{},{}>", from, to),
        }
    }
}

/// The semantic type a meaning paired with this glue term must have
pub fn meaning_sort(term: &Term) -> SemSort {
    match &term.node {
        TermNode::Atom(a) => match a.sort {
            Sort::Entity => SemSort::E,
            Sort::Truth => SemSort::T,
        },
        TermNode::Formula(f) => SemSort::Fun(
            Box::new(meaning_sort(&f.lhs)),
            Box::new(meaning_sort(&f.rhs)),
        ),
    }
}

/// Mints bound-variable names unique within one search session
#[derive(Debug, Clone, Default)]
pub struct VarNamer {
    counter: usize,
}

impl VarNamer {
    pub fn new() -> Self {
        VarNamer::default()
    }

    pub fn fresh(&mut self) -> String {
        self.counter += 1;
        format!("u{}", self.counter)
    }
}

/// What the prover requires of a meaning language
pub trait Meaning: Clone + fmt::Debug + fmt::Display {
    /// A bound variable of the language
    type Var: Clone + fmt::Debug;

    /// Mint a fresh variable of the given semantic type
    fn fresh_var(namer: &mut VarNamer, sort: &SemSort) -> Self::Var;

    /// The expression consisting of one variable occurrence
    fn var_expr(var: &Self::Var) -> Self;

    /// Apply this (function) meaning to an argument meaning
    fn apply(&self, argument: &Self) -> Self;

    /// Abstract the body over a variable
    fn abstract_over(var: &Self::Var, body: &Self) -> Self;
}
