//! The linear-logic term model: glue terms, premises, and sequents

mod premise;
mod sequent;
mod term;

pub use premise::Premise;
pub use sequent::Sequent;
pub use term::{
    Atom, AtomKind, AssumptionId, Formula, Operator, ResourceState, Sort, Term, TermNode,
};
