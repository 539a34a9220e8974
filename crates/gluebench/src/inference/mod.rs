//! Elimination and proof reconstruction

mod elimination;
mod proof;

pub(crate) use elimination::combine_premises;
pub use proof::{Proof, ProofStep};
