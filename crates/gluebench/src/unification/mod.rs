//! Compatibility checking and variable instantiation
//!
//! Compatibility is the matching relation of the elimination rule: it asks
//! whether a functor's antecedent and a candidate argument describe the same
//! resource, and if variables are involved, which bindings make them so.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};


use crate::error::BindingConflict;
use crate::linear::{Atom, AtomKind, Formula, Term, TermNode};

/// A binding discovered by compatibility checking: a variable atom on one
/// side matched a constant atom on the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equality {
    pub variable: Atom,
    pub constant: Atom,
}

impl Equality {
    pub fn new(variable: Atom, constant: Atom) -> Self {
        Equality { variable, constant }
    }
}

/// Identity by name and sort on both sides; the kind field is fixed by
/// construction and carries no information here
impl PartialEq for Equality {
    fn eq(&self, other: &Self) -> bool {
        self.variable.name == other.variable.name
            && self.variable.sort == other.variable.sort
            && self.constant.name == other.constant.name
            && self.constant.sort == other.constant.sort
    }
}

impl Eq for Equality {}

impl Hash for Equality {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variable.name.hash(state);
        self.variable.sort.hash(state);
        self.constant.name.hash(state);
        self.constant.sort.hash(state);
    }
}

impl fmt::Display for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.variable, self.constant)
    }
}

fn atoms_equivalent(a: &Atom, b: &Atom) -> bool {
    a.name == b.name && a.sort == b.sort
}

/// Atom-level compatibility. `None` means the atoms can never describe the
/// same resource; `Some` carries the binding required, if any.
fn atom_compatible(a: &Atom, b: &Atom) -> Option<Option<Equality>> {
    match (a.kind, b.kind) {
        (AtomKind::Constant, AtomKind::Constant) => {
            if atoms_equivalent(a, b) {
                Some(None)
            } else {
                None
            }
        }
        (AtomKind::Variable, AtomKind::Constant) => {
            if a.sort == b.sort {
                Some(Some(Equality::new(a.clone(), b.clone())))
            } else {
                None
            }
        }
        (AtomKind::Constant, AtomKind::Variable) => {
            if a.sort == b.sort {
                Some(Some(Equality::new(b.clone(), a.clone())))
            } else {
                None
            }
        }
        // Two variables carry no constant to bind against
        (AtomKind::Variable, AtomKind::Variable) => None,
    }
}

impl Term {
    /// Structural equivalence: same shape, same atom names and sorts.
    /// Variable/constant status and all resource bookkeeping are ignored.
    pub fn equivalent(&self, other: &Term) -> bool {
        match (&self.node, &other.node) {
            (TermNode::Atom(a), TermNode::Atom(b)) => atoms_equivalent(a, b),
            (TermNode::Formula(f), TermNode::Formula(g)) => {
                f.operator == g.operator && f.lhs.equivalent(&g.lhs) && f.rhs.equivalent(&g.rhs)
            }
            _ => false,
        }
    }

    /// Whether two terms can describe the same resource, and under which
    /// bindings. The returned set keeps discovery order, consequent-side
    /// bindings before antecedent-side ones.
    pub fn compatible(&self, other: &Term) -> Option<IndexSet<Equality>> {
        match (&self.node, &other.node) {
            (TermNode::Atom(a), TermNode::Atom(b)) => {
                let mut equalities = IndexSet::new();
                if let Some(eq) = atom_compatible(a, b)? {
                    equalities.insert(eq);
                }
                Some(equalities)
            }
            (TermNode::Formula(f), TermNode::Formula(g)) => {
                if f.operator != g.operator {
                    return None;
                }
                let mut equalities = f.rhs.compatible(&g.rhs)?;
                equalities.extend(f.lhs.compatible(&g.lhs)?);
                Some(equalities)
            }
            _ => None,
        }
    }

    /// A copy with the bound occurrences of the variable rewritten to the
    /// constant. Only a formula whose own binder ranges over the variable
    /// opens a scope for rewriting; a structurally matching variable with
    /// no binder above it is left alone. The consumed binder is removed.
    pub fn instantiate(&self, equality: &Equality) -> Term {
        let mut out = self.clone();
        out.rewrite(equality);
        out
    }

    fn rewrite(&mut self, equality: &Equality) {
        if let TermNode::Formula(formula) = &mut self.node {
            let Formula {
                lhs, rhs, binder, ..
            } = formula.as_mut();
            let binds = binder
                .as_ref()
                .map(|b| atoms_equivalent(b, &equality.variable))
                .unwrap_or(false);
            if binds {
                lhs.rewrite_bound(equality);
                rhs.rewrite_bound(equality);
                *binder = None;
            } else {
                lhs.rewrite(equality);
                rhs.rewrite(equality);
            }
        }
    }

    /// Inside a matching binder's scope: every structurally equivalent
    /// occurrence is rewritten, the way the binder's occurrence list was
    /// computed in the first place.
    fn rewrite_bound(&mut self, equality: &Equality) {
        match &mut self.node {
            TermNode::Atom(a) => {
                if a.kind == AtomKind::Variable && atoms_equivalent(a, &equality.variable) {
                    a.name = equality.constant.name.clone();
                    a.kind = AtomKind::Constant;
                }
            }
            TermNode::Formula(formula) => {
                let Formula {
                    lhs, rhs, binder, ..
                } = formula.as_mut();
                lhs.rewrite_bound(equality);
                rhs.rewrite_bound(equality);
                if let Some(b) = binder {
                    if atoms_equivalent(b, &equality.variable) {
                        *binder = None;
                    }
                }
            }
        }
    }
}

/// Scan a binding set for a variable bound to two distinct constants.
/// Sets of at most one binding can never conflict.
pub fn check_duplicate_binding(equalities: &IndexSet<Equality>) -> Option<BindingConflict> {
    if equalities.len() <= 1 {
        return None;
    }
    for (i, a) in equalities.iter().enumerate() {
        for b in equalities.iter().skip(i + 1) {
            if atoms_equivalent(&a.variable, &b.variable)
                && !atoms_equivalent(&a.constant, &b.constant)
            {
                return Some(BindingConflict {
                    variable: a.variable.clone(),
                    first: a.constant.clone(),
                    second: b.constant.clone(),
                });
            }
        }
    }
    None
}
