//! gluebench: a resource-sensitive prover for linear-logic glue semantics
//!
//! The crate derives target formulas from a multiset of linear-logic
//! premises by exhaustive proof search, carrying a meaning expression
//! through every step so a finished derivation also yields a semantic
//! term. Nested implications are flattened by Hepple-style compilation
//! into assumptions and discharge obligations before search begins.
//!
//! ```
//! use gluebench::linear::{Sequent, Sort, Term};
//! use gluebench::prover::Prover;
//! use gluebench::semantics::lambda::Expr;
//!
//! let sequent: Sequent<Expr> = Sequent::new(vec![
//!     (Term::constant("g", Sort::Entity), Some(Expr::constant("john"))),
//!     (
//!         Term::implication(
//!             Term::constant("g", Sort::Entity),
//!             Term::constant("f", Sort::Truth),
//!         ),
//!         Some(Expr::abs("x", Expr::pred("sleep", vec![Expr::var("x")]))),
//!     ),
//! ]);
//!
//! let mut prover: Prover<Expr> = Prover::default();
//! let solutions = prover.deduce(sequent).unwrap();
//! assert_eq!(solutions[0].meaning.as_ref().unwrap().to_string(), "sleep(john)");
//! ```

mod compile;
pub mod error;
pub mod inference;
pub mod json;
pub mod linear;
pub mod prover;
pub mod semantics;
pub mod unification;

pub use error::ProverError;
pub use inference::Proof;
pub use linear::{Premise, Sequent, Term};
pub use prover::{BindingPolicy, Prover, ProverConfig};
