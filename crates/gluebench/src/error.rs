//! Prover error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::linear::Atom;

/// A variable bound to two different constants within one elimination step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConflict {
    pub variable: Atom,
    pub first: Atom,
    pub second: Atom,
}

#[derive(Debug, Clone, Error)]
pub enum ProverError {
    /// The search space was exhausted without deriving the goal
    #[error("no proof found: search space exhausted without covering the goal")]
    ProofNotFound,

    /// Raised under [`BindingPolicy::AbortSearch`](crate::prover::BindingPolicy)
    /// when one elimination step binds a variable inconsistently
    #[error("inconsistent binding: variable '{}' bound to both '{}' and '{}'",
            .0.variable.name, .0.first.name, .0.second.name)]
    InconsistentBinding(BindingConflict),

    /// The configured derived-premise cap was reached
    #[error("premise limit of {limit} reached before the search was exhausted")]
    PremiseLimit { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::{AtomKind, Sort};

    #[test]
    fn test_inconsistent_binding_message() {
        let err = ProverError::InconsistentBinding(BindingConflict {
            variable: Atom {
                name: "X".into(),
                sort: Sort::Entity,
                kind: AtomKind::Variable,
            },
            first: Atom {
                name: "g".into(),
                sort: Sort::Entity,
                kind: AtomKind::Constant,
            },
            second: Atom {
                name: "h".into(),
                sort: Sort::Entity,
                kind: AtomKind::Constant,
            },
        });
        assert_eq!(
            err.to_string(),
            "inconsistent binding: variable 'X' bound to both 'g' and 'h'"
        );
    }
}
