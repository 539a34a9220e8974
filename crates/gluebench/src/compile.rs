//! The formula compiler
//!
//! Nested implications cannot be eliminated directly: a functor whose
//! antecedent is itself an implication has nothing atomic to match against.
//! Following Hepple's compilation, such a formula is split into a fresh
//! hypothesis (the inner antecedent, pushed onto the agenda as an open
//! assumption) and a flattened dependency formula that must discharge that
//! hypothesis before its result counts. Non-nested formulas pass through
//! with their glue untouched; only the paired meaning is uncurried to match
//! the flattened structure.

use std::collections::HashMap;

use log::debug;

use crate::linear::{AssumptionId, Premise, ResourceState, Sequent, Term};
use crate::prover::SearchEvent;
use crate::semantics::{meaning_sort, Meaning, VarNamer};

/// Session state the compiler threads through: fresh premise indices come
/// from the sequent, fresh assumption tags and variable names from the
/// session counters.
pub(crate) struct CompileContext<'a, M: Meaning> {
    pub sequent: &'a mut Sequent<M>,
    pub namer: &'a mut VarNamer,
    pub next_tag: &'a mut u32,
    pub assumption_vars: &'a mut HashMap<AssumptionId, M::Var>,
    pub agenda: &'a mut Vec<Premise<M>>,
    pub events: &'a mut Vec<SearchEvent>,
}

impl<'a, M: Meaning> CompileContext<'a, M> {
    fn fresh_tag(&mut self) -> AssumptionId {
        let tag = AssumptionId(*self.next_tag);
        *self.next_tag += 1;
        tag
    }
}

/// Compile one sequent premise into elimination-ready form, pushing any
/// extracted assumption premises onto the agenda.
pub(crate) fn compile_premise<M: Meaning>(
    ctx: &mut CompileContext<'_, M>,
    premise: Premise<M>,
) -> Premise<M> {
    let Premise {
        premise_ids,
        glue,
        meaning,
        ..
    } = premise;

    let nested = glue
        .as_formula()
        .map(|f| f.lhs.is_formula())
        .unwrap_or(false);
    let (glue, meaning) = if nested {
        compile_nested(ctx, glue, meaning)
    } else if glue.is_formula() {
        let meaning = meaning.map(|m| uncurry(ctx.namer, &glue, m));
        (glue, meaning)
    } else {
        (glue, meaning)
    };

    let compiled = Premise::with_ids(premise_ids, glue, meaning);
    debug!("compiled premise: {}", compiled);
    ctx.events.push(SearchEvent::Compiled {
        premise: compiled.to_string(),
    });
    compiled
}

/// Split a functor-of-functor. The extracted assumption gets a fresh
/// premise index, a fresh tag, and a fresh meaning variable; the dependency
/// records the tag as a discharge obligation. Tags are inserted after the
/// recursive call, so innermost obligations come first in iteration order.
fn compile_nested<M: Meaning>(
    ctx: &mut CompileContext<'_, M>,
    term: Term,
    meaning: Option<M>,
) -> (Term, Option<M>) {
    // atomic antecedents terminate the recursion
    let (inner, rhs) = match term.as_formula() {
        Some(f) => match f.lhs.as_formula() {
            Some(inner) => (inner.clone(), f.rhs.clone()),
            None => return (term, meaning),
        },
        None => return (term, meaning),
    };

    let tag = ctx.fresh_tag();
    // a hypothesis that is itself a functor-of-functor gets split too,
    // so the open assumption on the agenda is always elimination-ready
    let hypothesis = inner.lhs;
    let (mut hypothesis, _) = if hypothesis
        .as_formula()
        .map(|f| f.lhs.is_formula())
        .unwrap_or(false)
    {
        compile_nested(ctx, hypothesis, None)
    } else {
        (hypothesis, None)
    };
    hypothesis.state = ResourceState::OpenAssumption;
    hypothesis.assumptions.insert(tag);

    let var = M::fresh_var(ctx.namer, &meaning_sort(&hypothesis));
    ctx.assumption_vars.insert(tag, var.clone());

    let id = ctx.sequent.fresh_id();
    let assumption = Premise::new(id, hypothesis, Some(M::var_expr(&var)));
    debug!("extracted assumption {}: {}", tag, assumption);
    ctx.events.push(SearchEvent::AssumptionExtracted {
        tag: tag.to_string(),
        premise: assumption.to_string(),
    });
    ctx.agenda.push(assumption);

    let dependency = Term::implication(inner.rhs, rhs);
    let (mut dependency, meaning) = if dependency
        .as_formula()
        .map(|f| f.lhs.is_formula())
        .unwrap_or(false)
    {
        compile_nested(ctx, dependency, meaning)
    } else {
        (dependency, meaning)
    };
    dependency.discharges.insert(tag);
    (dependency, meaning)
}

/// Rebuild a meaning to expect one argument per implication on the glue
/// side: mint a variable per antecedent, apply, and re-abstract outside in.
fn uncurry<M: Meaning>(namer: &mut VarNamer, glue: &Term, meaning: M) -> M {
    match glue.as_formula() {
        Some(f) => {
            let var = M::fresh_var(namer, &meaning_sort(&f.lhs));
            let applied = meaning.apply(&M::var_expr(&var));
            let body = uncurry(namer, &f.rhs, applied);
            M::abstract_over(&var, &body)
        }
        None => meaning,
    }
}
