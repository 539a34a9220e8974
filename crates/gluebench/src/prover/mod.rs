//! The search driver: compile, then exhaust the agenda against the database

mod trace;

pub use trace::SearchEvent;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::compile::{compile_premise, CompileContext};
use crate::error::ProverError;
use crate::inference::combine_premises;
use crate::linear::{AssumptionId, Premise, Sequent};
use crate::semantics::{Meaning, VarNamer};

/// What to do when one elimination step binds a variable inconsistently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BindingPolicy {
    /// Reject the offending pair and keep searching
    #[default]
    SkipPair,
    /// Abort the whole search with [`ProverError::InconsistentBinding`]
    AbortSearch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverConfig {
    pub binding_policy: BindingPolicy,
    /// Cap on live premises (agenda plus database); 0 means unlimited
    pub max_premises: usize,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            binding_policy: BindingPolicy::SkipPair,
            max_premises: 0,
        }
    }
}

/// A proof-search session. Fresh assumption tags and meaning-variable
/// names are session-scoped, so successive `deduce` calls never reuse
/// either; the event log is reset per call.
#[derive(Debug)]
pub struct Prover<M: Meaning> {
    config: ProverConfig,
    namer: VarNamer,
    next_tag: u32,
    assumption_vars: HashMap<AssumptionId, M::Var>,
    events: Vec<SearchEvent>,
}

impl<M: Meaning> Default for Prover<M> {
    fn default() -> Self {
        Prover::new(ProverConfig::default())
    }
}

impl<M: Meaning> Prover<M> {
    pub fn new(config: ProverConfig) -> Self {
        Prover {
            config,
            namer: VarNamer::new(),
            next_tag: 0,
            assumption_vars: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Everything the most recent `deduce` call did, in order
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Run exhaustive proof search over the sequent. Returns every premise
    /// whose index set covers the goal; an empty result is an error, not an
    /// empty list.
    pub fn deduce(&mut self, mut sequent: Sequent<M>) -> Result<Vec<Premise<M>>, ProverError> {
        self.events.clear();

        let mut agenda: Vec<Premise<M>> = Vec::new();
        let inputs: Vec<Premise<M>> = sequent.lhs.clone();
        for premise in inputs {
            let mut ctx = CompileContext {
                sequent: &mut sequent,
                namer: &mut self.namer,
                next_tag: &mut self.next_tag,
                assumption_vars: &mut self.assumption_vars,
                agenda: &mut agenda,
                events: &mut self.events,
            };
            let compiled = compile_premise(&mut ctx, premise);
            agenda.push(compiled);
        }

        // the goal covers extracted assumptions too: a derivation only
        // counts once every hypothesis has been consumed and discharged
        let goal: HashSet<usize> = agenda
            .iter()
            .flat_map(|p| p.premise_ids.iter().copied())
            .collect();
        info!("searching with {} premises, goal {:?}", agenda.len(), goal);

        let mut database: Vec<Premise<M>> = Vec::new();
        let mut solutions: Vec<Premise<M>> = Vec::new();

        while let Some(current) = agenda.pop() {
            let mut derived: Vec<Premise<M>> = Vec::new();
            for other in &database {
                if other.glue.is_formula() {
                    self.attempt(other, &current, &mut derived)?;
                }
                if current.glue.is_formula() {
                    self.attempt(&current, other, &mut derived)?;
                }
            }
            database.push(current);

            for premise in derived {
                debug!("derived: {}", premise);
                if premise.premise_ids == goal {
                    self.events.push(SearchEvent::Solution {
                        premise: premise.to_string(),
                    });
                    solutions.push(premise);
                } else {
                    agenda.push(premise);
                }
            }

            if self.config.max_premises > 0
                && database.len() + agenda.len() > self.config.max_premises
            {
                return Err(ProverError::PremiseLimit {
                    limit: self.config.max_premises,
                });
            }
        }

        info!("search exhausted, {} solution(s)", solutions.len());
        if solutions.is_empty() {
            Err(ProverError::ProofNotFound)
        } else {
            Ok(solutions)
        }
    }

    fn attempt(
        &mut self,
        functor: &Premise<M>,
        argument: &Premise<M>,
        derived: &mut Vec<Premise<M>>,
    ) -> Result<(), ProverError> {
        match combine_premises(functor, argument, &self.assumption_vars) {
            Ok(Some(result)) => {
                self.events.push(SearchEvent::Combined {
                    functor: functor.to_string(),
                    argument: argument.to_string(),
                    result: result.to_string(),
                });
                derived.push(result);
            }
            Ok(None) => {}
            Err(conflict) => match self.config.binding_policy {
                BindingPolicy::AbortSearch => {
                    return Err(ProverError::InconsistentBinding(conflict));
                }
                BindingPolicy::SkipPair => {
                    debug!(
                        "skipping pair with inconsistent binding on '{}'",
                        conflict.variable.name
                    );
                    self.events.push(SearchEvent::BindingSkipped {
                        functor: functor.to_string(),
                        argument: argument.to_string(),
                        conflict: conflict.variable.name.clone(),
                    });
                }
            },
        }
        Ok(())
    }
}
