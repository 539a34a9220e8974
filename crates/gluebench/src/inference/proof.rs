//! Proof-tree reconstruction from derivation provenance

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::linear::Premise;
use crate::semantics::Meaning;

/// One elimination step of a finished derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofStep {
    pub functor: String,
    pub argument: String,
    pub result: String,
}

/// A derivation replayed leaves-first by following each premise's
/// provenance pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    pub conclusion: String,
    pub meaning: Option<String>,
    pub steps: Vec<ProofStep>,
}

impl Proof {
    pub fn reconstruct<M: Meaning>(solution: &Premise<M>) -> Proof {
        let mut steps = Vec::new();
        collect_steps(solution, &mut steps);
        Proof {
            conclusion: solution.glue.to_string(),
            meaning: solution.meaning.as_ref().map(|m| m.to_string()),
            steps,
        }
    }
}

fn collect_steps<M: Meaning>(premise: &Premise<M>, steps: &mut Vec<ProofStep>) {
    if let Some(pair) = &premise.derived_from {
        let (functor, argument) = pair.as_ref();
        collect_steps(functor, steps);
        collect_steps(argument, steps);
        steps.push(ProofStep {
            functor: functor.to_string(),
            argument: argument.to_string(),
            result: premise.to_string(),
        });
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}  +  {}  =>  {}", step.functor, step.argument, step.result)?;
        }
        write!(f, "conclusion: {}", self.conclusion)?;
        if let Some(meaning) = &self.meaning {
            write!(f, " : {}", meaning)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::{Sort, Term};
    use crate::semantics::lambda::Expr;
    use std::collections::HashSet;

    #[test]
    fn test_reconstruction_walks_provenance_leaves_first() {
        let leaf_a: Premise<Expr> = Premise::new(0, Term::constant("a", Sort::Entity), None);
        let leaf_f: Premise<Expr> = Premise::new(
            1,
            Term::implication(
                Term::constant("a", Sort::Entity),
                Term::constant("b", Sort::Truth),
            ),
            None,
        );
        let mut derived: Premise<Expr> = Premise::with_ids(
            HashSet::from([0, 1]),
            Term::constant("b", Sort::Truth),
            None,
        );
        derived.derived_from = Some(Box::new((leaf_f.clone(), leaf_a.clone())));

        let proof = Proof::reconstruct(&derived);
        assert_eq!(proof.steps.len(), 1);
        assert_eq!(proof.steps[0].functor, leaf_f.to_string());
        assert_eq!(proof.steps[0].argument, leaf_a.to_string());
        assert_eq!(proof.conclusion, "b");
    }
}
