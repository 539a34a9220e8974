//! Derive "john likes mary" from a three-premise sequent and print the
//! solution, its proof tree, and the search trace as JSON.
//!
//! Run with `RUST_LOG=debug` to watch the search.

use gluebench::inference::Proof;
use gluebench::json;
use gluebench::linear::{Sequent, Sort, Term};
use gluebench::prover::Prover;
use gluebench::semantics::lambda::Expr;

fn main() {
    env_logger::init();

    let sequent: Sequent<Expr> = Sequent::new(vec![
        (Term::constant("g", Sort::Entity), Some(Expr::constant("john"))),
        (Term::constant("h", Sort::Entity), Some(Expr::constant("mary"))),
        (
            Term::implication(
                Term::constant("g", Sort::Entity),
                Term::implication(
                    Term::constant("h", Sort::Entity),
                    Term::constant("f", Sort::Truth),
                ),
            ),
            Some(Expr::abs(
                "x",
                Expr::abs("y", Expr::pred("like", vec![Expr::var("x"), Expr::var("y")])),
            )),
        ),
    ]);

    println!("sequent: {}", sequent);

    let mut prover: Prover<Expr> = Prover::default();
    match prover.deduce(sequent) {
        Ok(solutions) => {
            for solution in &solutions {
                println!("solution: {}", solution);
                println!("{}", Proof::reconstruct(solution));
            }
            if let Ok(trace) = json::events_to_json(prover.events()) {
                println!("trace: {}", trace);
            }
        }
        Err(err) => eprintln!("derivation failed: {}", err),
    }
}
