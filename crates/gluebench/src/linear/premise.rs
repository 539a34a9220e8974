//! Premises: indexed glue terms paired with their meaning side

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::linear::Term;
use crate::semantics::Meaning;

/// A sequent premise: a glue term, the set of premise indices it consumed,
/// and the meaning derived alongside it.
///
/// The index set is the linear-logic resource accounting: two premises may
/// only combine when their sets are disjoint, and a solution is a premise
/// whose set covers the whole sequent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Premise<M: Meaning> {
    pub premise_ids: HashSet<usize>,
    pub glue: Term,
    pub meaning: Option<M>,
    /// The functor/argument pair this premise was derived from, if any
    pub derived_from: Option<Box<(Premise<M>, Premise<M>)>>,
}

impl<M: Meaning> Premise<M> {
    pub fn new(id: usize, glue: Term, meaning: Option<M>) -> Self {
        Premise::with_ids(HashSet::from([id]), glue, meaning)
    }

    pub fn with_ids(premise_ids: HashSet<usize>, mut glue: Term, meaning: Option<M>) -> Self {
        // a term entering the derivation takes the consumer role
        glue.polarity = true;
        Premise {
            premise_ids,
            glue,
            meaning,
            derived_from: None,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.derived_from.is_some()
    }
}

/// Two premises are the same resource when they consumed the same indices
impl<M: Meaning> PartialEq for Premise<M> {
    fn eq(&self, other: &Self) -> bool {
        self.premise_ids == other.premise_ids
    }
}

impl<M: Meaning> Eq for Premise<M> {}

impl<M: Meaning> fmt::Display for Premise<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<usize> = self.premise_ids.iter().copied().collect();
        ids.sort_unstable();
        write!(f, "{{")?;
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}} {}", self.glue)?;
        if let Some(meaning) = &self.meaning {
            write!(f, " : {}", meaning)?;
        }
        Ok(())
    }
}
