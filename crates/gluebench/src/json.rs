//! JSON serialization of sequents, solutions, and search traces

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::inference::Proof;
use crate::linear::{Premise, Sequent};
use crate::prover::SearchEvent;
use crate::semantics::Meaning;

pub fn sequent_to_json<M>(sequent: &Sequent<M>) -> serde_json::Result<String>
where
    M: Meaning + Serialize,
{
    serde_json::to_string_pretty(sequent)
}

pub fn sequent_from_json<M>(json: &str) -> serde_json::Result<Sequent<M>>
where
    M: Meaning + DeserializeOwned,
{
    serde_json::from_str(json)
}

pub fn solutions_to_json<M>(solutions: &[Premise<M>]) -> serde_json::Result<String>
where
    M: Meaning + Serialize,
{
    serde_json::to_string_pretty(solutions)
}

pub fn events_to_json(events: &[SearchEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

pub fn proof_to_json(proof: &Proof) -> serde_json::Result<String> {
    serde_json::to_string_pretty(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::{Sort, Term};
    use crate::semantics::lambda::Expr;

    #[test]
    fn test_sequent_round_trip() {
        let sequent: Sequent<Expr> = Sequent::new(vec![
            (Term::constant("g", Sort::Entity), Some(Expr::constant("john"))),
            (
                Term::implication(
                    Term::constant("g", Sort::Entity),
                    Term::constant("f", Sort::Truth),
                ),
                None,
            ),
        ]);
        let json = sequent_to_json(&sequent).unwrap();
        let back: Sequent<Expr> = sequent_from_json(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.lhs[0].glue.to_string(), sequent.lhs[0].glue.to_string());
    }

    #[test]
    fn test_events_serialize_as_array() {
        let events = vec![SearchEvent::Compiled {
            premise: "{0} g : john".into(),
        }];
        let json = events_to_json(&events).unwrap();
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"type\": \"compiled\""));
    }
}
