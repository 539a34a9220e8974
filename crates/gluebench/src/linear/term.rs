//! Terms of the linear-logic glue language

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Semantic sort of a glue atom
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sort {
    /// Individual / entity resources (e)
    Entity,
    /// Propositional / truth-value resources (t)
    Truth,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Entity => write!(f, "e"),
            Sort::Truth => write!(f, "t"),
        }
    }
}

/// Whether an atom is a unifiable variable or a constant resource
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomKind {
    Variable,
    Constant,
}

/// An atomic glue term: a named resource with a semantic sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub name: String,
    pub sort: Sort,
    pub kind: AtomKind,
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The only connective of the fragment
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    LinearImplication,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::LinearImplication => write!(f, "\u{22B8}"),
        }
    }
}

/// Identity tag of an assumption extracted during formula compilation.
///
/// Assumption and discharge bookkeeping is over these tags rather than over
/// the extracted terms themselves, so the marker survives copying and
/// instantiation of the terms that carry it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssumptionId(pub u32);

impl fmt::Display for AssumptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Resource status of a term
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceState {
    /// Ordinary premise material
    #[default]
    Bound,
    /// Hypothesis extracted by the formula compiler, not yet discharged
    OpenAssumption,
    /// Produced by an elimination step that satisfied discharge obligations
    Discharged,
}

/// A linear implication between two terms, optionally quantified by a binder
/// variable whose occurrences in `lhs`/`rhs` are instantiated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    pub lhs: Term,
    pub rhs: Term,
    pub operator: Operator,
    pub binder: Option<Atom>,
}

/// A glue term: an atom or an implicational formula, together with its
/// resource bookkeeping.
///
/// `id` is assigned at creation and used for output only; it takes no part
/// in equivalence or compatibility. Terms are plain values: instantiation
/// and elimination always produce rewritten copies, never mutate a term
/// another premise still holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    pub id: u32,
    pub polarity: bool,
    pub state: ResourceState,
    pub assumptions: IndexSet<AssumptionId>,
    pub discharges: IndexSet<AssumptionId>,
    pub node: TermNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TermNode {
    Atom(Atom),
    Formula(Box<Formula>),
}

static NEXT_TERM_ID: AtomicU32 = AtomicU32::new(0);

fn next_term_id() -> u32 {
    NEXT_TERM_ID.fetch_add(1, Ordering::Relaxed)
}

impl Term {
    fn from_node(node: TermNode) -> Self {
        Term {
            id: next_term_id(),
            polarity: false,
            state: ResourceState::Bound,
            assumptions: IndexSet::new(),
            discharges: IndexSet::new(),
            node,
        }
    }

    /// A constant atom
    pub fn constant(name: impl Into<String>, sort: Sort) -> Self {
        Term::from_node(TermNode::Atom(Atom {
            name: name.into(),
            sort,
            kind: AtomKind::Constant,
        }))
    }

    /// A variable atom
    pub fn variable(name: impl Into<String>, sort: Sort) -> Self {
        Term::from_node(TermNode::Atom(Atom {
            name: name.into(),
            sort,
            kind: AtomKind::Variable,
        }))
    }

    /// A linear implication `lhs ⊸ rhs`
    pub fn implication(lhs: Term, rhs: Term) -> Self {
        Term::from_node(TermNode::Formula(Box::new(Formula {
            lhs,
            rhs,
            operator: Operator::LinearImplication,
            binder: None,
        })))
    }

    /// A linear implication whose binder variable ranges over both sides
    pub fn quantified(binder: Atom, lhs: Term, rhs: Term) -> Self {
        Term::from_node(TermNode::Formula(Box::new(Formula {
            lhs,
            rhs,
            operator: Operator::LinearImplication,
            binder: Some(binder),
        })))
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.node, TermNode::Formula(_))
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match &self.node {
            TermNode::Formula(f) => Some(f),
            TermNode::Atom(_) => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match &self.node {
            TermNode::Atom(a) => Some(a),
            TermNode::Formula(_) => None,
        }
    }

    /// A modifier consumes and produces the same resource (`a ⊸ a`)
    pub fn is_modifier(&self) -> bool {
        match &self.node {
            TermNode::Formula(f) => f.lhs.equivalent(&f.rhs),
            TermNode::Atom(_) => false,
        }
    }

    /// Whether the term contains an implication on its left spine or,
    /// transitively, on its right spine
    pub fn is_nested(&self) -> bool {
        match &self.node {
            TermNode::Formula(f) => f.lhs.is_formula() || f.rhs.is_nested(),
            TermNode::Atom(_) => false,
        }
    }

    /// Render without assumption or discharge markers
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            TermNode::Atom(a) => write!(f, "{}", a),
            TermNode::Formula(formula) => {
                write!(f, "(")?;
                formula.lhs.fmt_plain(f)?;
                write!(f, " {} ", formula.operator)?;
                formula.rhs.fmt_plain(f)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state == ResourceState::OpenAssumption {
            write!(f, "{{")?;
            self.fmt_plain(f)?;
            return write!(f, "}}");
        }
        match &self.node {
            TermNode::Atom(a) => write!(f, "{}", a)?,
            TermNode::Formula(formula) => {
                write!(f, "(")?;
                formula.lhs.fmt_plain(f)?;
                if !self.discharges.is_empty() {
                    write!(f, "[")?;
                    for (i, tag) in self.discharges.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", tag)?;
                    }
                    write!(f, "]")?;
                }
                write!(f, " {} ", formula.operator)?;
                formula.rhs.fmt_plain(f)?;
                write!(f, ")")?;
            }
        }
        if !self.assumptions.is_empty() {
            write!(f, "{{")?;
            for (i, tag) in self.assumptions.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", tag)?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_display() {
        let g = Term::constant("g", Sort::Entity);
        assert_eq!(g.to_string(), "g");
    }

    #[test]
    fn test_implication_display() {
        let f = Term::implication(
            Term::constant("g", Sort::Entity),
            Term::constant("f", Sort::Truth),
        );
        assert_eq!(f.to_string(), "(g \u{22B8} f)");
    }

    #[test]
    fn test_discharge_and_assumption_display() {
        let mut dep = Term::implication(
            Term::constant("b", Sort::Truth),
            Term::constant("c", Sort::Truth),
        );
        dep.discharges.insert(AssumptionId(0));
        assert_eq!(dep.to_string(), "(b[A0] \u{22B8} c)");

        let mut carried = Term::constant("b", Sort::Truth);
        carried.assumptions.insert(AssumptionId(0));
        assert_eq!(carried.to_string(), "b{A0}");

        let mut open = Term::constant("a", Sort::Entity);
        open.state = ResourceState::OpenAssumption;
        open.assumptions.insert(AssumptionId(0));
        assert_eq!(open.to_string(), "{a}");
    }

    #[test]
    fn test_modifier_predicate() {
        let modifier = Term::implication(
            Term::constant("a", Sort::Truth),
            Term::constant("a", Sort::Truth),
        );
        assert!(modifier.is_modifier());

        let plain = Term::implication(
            Term::constant("a", Sort::Truth),
            Term::constant("b", Sort::Truth),
        );
        assert!(!plain.is_modifier());
        assert!(!Term::constant("a", Sort::Truth).is_modifier());
    }

    #[test]
    fn test_nested_predicate() {
        let nested = Term::implication(
            Term::implication(
                Term::constant("a", Sort::Entity),
                Term::constant("b", Sort::Truth),
            ),
            Term::constant("c", Sort::Truth),
        );
        assert!(nested.is_nested());

        // currying alone is not nesting: no implication sits in lhs position
        let curried = Term::implication(
            Term::constant("a", Sort::Entity),
            Term::implication(
                Term::constant("b", Sort::Entity),
                Term::constant("c", Sort::Truth),
            ),
        );
        assert!(!curried.is_nested());

        let nested_on_right = Term::implication(
            Term::constant("a", Sort::Entity),
            Term::implication(
                Term::implication(
                    Term::constant("b", Sort::Entity),
                    Term::constant("c", Sort::Truth),
                ),
                Term::constant("d", Sort::Truth),
            ),
        );
        assert!(nested_on_right.is_nested());

        let flat = Term::implication(
            Term::constant("a", Sort::Entity),
            Term::constant("b", Sort::Truth),
        );
        assert!(!flat.is_nested());
    }

    #[test]
    fn test_term_ids_are_distinct() {
        let a = Term::constant("a", Sort::Entity);
        let b = Term::constant("a", Sort::Entity);
        assert_ne!(a.id, b.id);
    }
}
