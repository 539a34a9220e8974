//! Sequents: the premise collection handed to the prover

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::linear::{Premise, Term};
use crate::semantics::Meaning;

/// The left-hand side of a glue sequent, plus the counter from which
/// compilation draws fresh premise indices for extracted assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequent<M: Meaning> {
    pub lhs: Vec<Premise<M>>,
    next_id: usize,
}

impl<M: Meaning> Sequent<M> {
    /// Build a sequent from glue/meaning pairs, indexing premises in order
    pub fn new(premises: Vec<(Term, Option<M>)>) -> Self {
        let lhs: Vec<Premise<M>> = premises
            .into_iter()
            .enumerate()
            .map(|(id, (glue, meaning))| Premise::new(id, glue, meaning))
            .collect();
        let next_id = lhs.len();
        Sequent { lhs, next_id }
    }

    /// A fresh premise index, beyond all indices handed out so far
    pub fn fresh_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.lhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lhs.is_empty()
    }
}

impl<M: Meaning> fmt::Display for Sequent<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, premise) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", premise)?;
        }
        Ok(())
    }
}
