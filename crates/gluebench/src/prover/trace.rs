//! Serializable record of everything a search did

use serde::{Deserialize, Serialize};

/// One step of a search, rendered to strings so the log stays independent
/// of the meaning language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEvent {
    /// A sequent premise passed through the formula compiler
    Compiled { premise: String },
    /// The compiler extracted a hypothesis from nested structure
    AssumptionExtracted { tag: String, premise: String },
    /// An elimination step derived a new premise
    Combined {
        functor: String,
        argument: String,
        result: String,
    },
    /// A binding conflict was skipped rather than aborting the search
    BindingSkipped {
        functor: String,
        argument: String,
        conflict: String,
    },
    /// A derived premise covered the goal
    Solution { premise: String },
}
