//! Linear-implication elimination
//!
//! `combine_premises` is the single inference rule of the search: a functor
//! whose antecedent matches an argument yields its consequent, consuming
//! both operands' premise indices. A `None` result is ordinary control flow;
//! only an inconsistent variable binding is an error, and whether that
//! aborts the search is the caller's policy decision.

use indexmap::IndexSet;
use std::collections::HashMap;

use crate::error::BindingConflict;
use crate::linear::{AssumptionId, Premise, ResourceState, Term};
use crate::semantics::Meaning;
use crate::unification::check_duplicate_binding;

/// Attempt one elimination step with `functor` as the implication.
///
/// `assumption_vars` maps discharge tags to the meaning variables minted
/// when the corresponding assumptions were extracted; discharging a tag
/// abstracts its variable over the argument's meaning.
pub(crate) fn combine_premises<M: Meaning>(
    functor: &Premise<M>,
    argument: &Premise<M>,
    assumption_vars: &HashMap<AssumptionId, M::Var>,
) -> Result<Option<Premise<M>>, BindingConflict> {
    let formula = match functor.glue.as_formula() {
        Some(f) => f,
        None => return Ok(None),
    };

    let equalities = match formula.lhs.compatible(&argument.glue) {
        Some(eqs) => eqs,
        None => return Ok(None),
    };
    if equalities.len() > 1 {
        if let Some(conflict) = check_duplicate_binding(&equalities) {
            return Err(conflict);
        }
    }

    // bindings rewrite the whole functor so the consequent is instantiated too
    let functor_glue = equalities
        .iter()
        .fold(functor.glue.clone(), |glue, eq| glue.instantiate(eq));
    // instantiate returns a copy, so the borrow can be re-taken safely
    let formula = match functor_glue.as_formula() {
        Some(f) => f,
        None => return Ok(None),
    };

    let func_assumptions = &functor_glue.assumptions;
    let func_discharges = &functor_glue.discharges;
    let arg_assumptions = &argument.glue.assumptions;
    let arg_discharges = &argument.glue.discharges;

    let mut combined = if func_discharges.is_empty() && arg_discharges.is_empty() {
        if func_assumptions.is_empty() && arg_assumptions.is_empty() {
            // plain modus ponens
            let result = match combine_disjoint(formula.lhs.clone(), &formula.rhs, functor, argument)
            {
                Some(r) => r,
                None => return Ok(None),
            };
            let meaning = apply_meanings(functor, argument);
            Premise {
                meaning,
                ..result
            }
        } else {
            // open assumptions ride along on the new consequent
            let mut result = match combine_disjoint(formula.lhs.clone(), &formula.rhs, functor, argument)
            {
                Some(r) => r,
                None => return Ok(None),
            };
            let mut carried: IndexSet<AssumptionId> = arg_assumptions.clone();
            carried.extend(func_assumptions.iter().copied());
            result.glue.assumptions = carried;
            result.glue.state = ResourceState::Bound;
            let meaning = apply_meanings(functor, argument);
            Premise {
                meaning,
                ..result
            }
        }
    } else if !func_discharges.is_empty() {
        // every obligation must be met by an assumption the argument carries
        if !func_discharges.iter().all(|tag| arg_assumptions.contains(tag)) {
            return Ok(None);
        }
        let mut result = match combine_disjoint(formula.lhs.clone(), &formula.rhs, functor, argument)
        {
            Some(r) => r,
            None => return Ok(None),
        };
        let mut remaining: IndexSet<AssumptionId> = arg_assumptions.clone();
        remaining.extend(func_assumptions.iter().copied());
        remaining.retain(|tag| !func_discharges.contains(tag));
        result.glue.assumptions = remaining;
        result.glue.discharges = IndexSet::new();
        result.glue.state = ResourceState::Discharged;

        let meaning = match (&functor.meaning, &argument.meaning) {
            (Some(func), Some(arg)) => {
                let mut body = arg.clone();
                for tag in func_discharges {
                    if let Some(var) = assumption_vars.get(tag) {
                        body = M::abstract_over(var, &body);
                    }
                }
                Some(func.apply(&body))
            }
            _ => None,
        };
        Premise { meaning, ..result }
    } else {
        // an argument with undischarged obligations cannot be consumed
        return Ok(None);
    };

    combined.derived_from = Some(Box::new((functor.clone(), argument.clone())));
    Ok(Some(combined))
}

/// The linearity core: the instantiated antecedent must exactly match the
/// argument and the two index sets must be disjoint. On success the result
/// premise holds a copy of the consequent and the union of the indices.
fn combine_disjoint<M: Meaning>(
    functor_lhs: Term,
    functor_rhs: &Term,
    functor: &Premise<M>,
    argument: &Premise<M>,
) -> Option<Premise<M>> {
    if !functor_lhs.equivalent(&argument.glue) {
        return None;
    }
    if !functor.premise_ids.is_disjoint(&argument.premise_ids) {
        return None;
    }
    let ids = functor
        .premise_ids
        .union(&argument.premise_ids)
        .copied()
        .collect();
    Some(Premise::with_ids(ids, functor_rhs.clone(), None))
}

fn apply_meanings<M: Meaning>(functor: &Premise<M>, argument: &Premise<M>) -> Option<M> {
    match (&functor.meaning, &argument.meaning) {
        (Some(func), Some(arg)) => Some(func.apply(arg)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::Sort;
    use crate::semantics::lambda::Expr;
    use std::collections::HashSet;

    fn no_vars() -> HashMap<AssumptionId, String> {
        HashMap::new()
    }

    #[test]
    fn test_modus_ponens() {
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::implication(
                Term::constant("a", Sort::Entity),
                Term::constant("b", Sort::Truth),
            ),
            Some(Expr::abs("x", Expr::pred("sleep", vec![Expr::var("x")]))),
        );
        let argument: Premise<Expr> =
            Premise::new(1, Term::constant("a", Sort::Entity), Some(Expr::constant("john")));

        let result = combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .unwrap();
        assert_eq!(result.glue.to_string(), "b");
        assert_eq!(result.premise_ids, HashSet::from([0, 1]));
        assert_eq!(result.meaning.as_ref().unwrap().to_string(), "sleep(john)");
        assert!(result.is_derived());
    }

    #[test]
    fn test_shared_indices_block_combination() {
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::implication(
                Term::constant("a", Sort::Entity),
                Term::constant("b", Sort::Truth),
            ),
            None,
        );
        let argument: Premise<Expr> = Premise::new(0, Term::constant("a", Sort::Entity), None);
        assert!(combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_atomic_functor_never_combines() {
        let functor: Premise<Expr> = Premise::new(0, Term::constant("a", Sort::Entity), None);
        let argument: Premise<Expr> = Premise::new(1, Term::constant("a", Sort::Entity), None);
        assert!(combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_variable_functor_instantiates_consequent() {
        // (X ⊸ f(X)) applied to g yields an instantiated consequent
        let x = crate::linear::Atom {
            name: "X".into(),
            sort: Sort::Entity,
            kind: crate::linear::AtomKind::Variable,
        };
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::quantified(
                x,
                Term::variable("X", Sort::Entity),
                Term::implication(
                    Term::variable("X", Sort::Entity),
                    Term::constant("f", Sort::Truth),
                ),
            ),
            None,
        );
        let argument: Premise<Expr> = Premise::new(1, Term::constant("g", Sort::Entity), None);

        let result = combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .unwrap();
        assert_eq!(result.glue.to_string(), "(g \u{22B8} f)");
    }

    #[test]
    fn test_duplicate_binding_is_reported() {
        // functor antecedent (X ⊸ X) against argument (g ⊸ h) binds X twice
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::implication(
                Term::implication(
                    Term::variable("X", Sort::Entity),
                    Term::variable("X", Sort::Entity),
                ),
                Term::constant("f", Sort::Truth),
            ),
            None,
        );
        let argument: Premise<Expr> = Premise::new(
            1,
            Term::implication(
                Term::constant("g", Sort::Entity),
                Term::constant("h", Sort::Entity),
            ),
            None,
        );

        let conflict = combine_premises(&functor, &argument, &no_vars()).unwrap_err();
        assert_eq!(conflict.variable.name, "X");
    }

    #[test]
    fn test_assumptions_ride_along() {
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::implication(
                Term::constant("a", Sort::Entity),
                Term::constant("b", Sort::Truth),
            ),
            None,
        );
        let mut hyp = Term::constant("a", Sort::Entity);
        hyp.state = ResourceState::OpenAssumption;
        hyp.assumptions.insert(AssumptionId(0));
        let argument: Premise<Expr> = Premise::new(1, hyp, None);

        let result = combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .unwrap();
        assert_eq!(result.glue.to_string(), "b{A0}");
        assert_eq!(result.glue.state, ResourceState::Bound);
    }

    #[test]
    fn test_discharge_consumes_matching_assumptions() {
        // functor (b[A0] ⊸ c) against argument b{A0,A1}: A0 is discharged,
        // A1 survives
        let mut dep = Term::implication(
            Term::constant("b", Sort::Truth),
            Term::constant("c", Sort::Truth),
        );
        dep.discharges.insert(AssumptionId(0));
        let functor: Premise<Expr> = Premise::new(0, dep, Some(Expr::var("Q")));

        let mut arg_glue = Term::constant("b", Sort::Truth);
        arg_glue.assumptions.insert(AssumptionId(0));
        arg_glue.assumptions.insert(AssumptionId(1));
        let argument: Premise<Expr> = Premise::new(1, arg_glue, Some(Expr::var("P")));

        let vars = HashMap::from([
            (AssumptionId(0), "u1".to_string()),
            (AssumptionId(1), "u2".to_string()),
        ]);
        let result = combine_premises(&functor, &argument, &vars)
            .unwrap()
            .unwrap();
        assert_eq!(result.glue.to_string(), "c{A1}");
        assert_eq!(result.glue.state, ResourceState::Discharged);
        assert_eq!(result.meaning.unwrap().to_string(), "Q(\u{03BB}u1.P)");
    }

    #[test]
    fn test_unmet_discharge_blocks_combination() {
        let mut dep = Term::implication(
            Term::constant("b", Sort::Truth),
            Term::constant("c", Sort::Truth),
        );
        dep.discharges.insert(AssumptionId(0));
        let functor: Premise<Expr> = Premise::new(0, dep, None);
        let argument: Premise<Expr> = Premise::new(1, Term::constant("b", Sort::Truth), None);
        assert!(combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_argument_with_obligations_is_rejected() {
        let functor: Premise<Expr> = Premise::new(
            0,
            Term::implication(
                Term::implication(
                    Term::constant("b", Sort::Truth),
                    Term::constant("c", Sort::Truth),
                ),
                Term::constant("d", Sort::Truth),
            ),
            None,
        );
        let mut arg_glue = Term::implication(
            Term::constant("b", Sort::Truth),
            Term::constant("c", Sort::Truth),
        );
        arg_glue.discharges.insert(AssumptionId(0));
        let argument: Premise<Expr> = Premise::new(1, arg_glue, None);
        assert!(combine_premises(&functor, &argument, &no_vars())
            .unwrap()
            .is_none());
    }
}
