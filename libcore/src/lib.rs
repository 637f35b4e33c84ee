//! Differentiates and simplifies expressions by rewriting them with local rules.
//!
//! # Example
//!
//! ```
//! use symdiff::{differentiate, parse, simplify};
//!
//! let expression = parse("x ** 2 + sin(x)").unwrap();
//! let derivative = simplify(differentiate(expression, "x")).unwrap();
//! assert_eq!(derivative.to_string(), "2.0 * x + cos x");
//! ```
//!
//! Rules are tried by weight. Childs are rewritten before their parents, until
//! no rule fits anywhere in the tree.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate maplit;

pub mod apply;
pub mod builder;
pub mod configuration;
pub mod context;
pub mod dumper;
mod error;
pub mod evaluator;
pub mod expression;
pub mod parser;
pub mod rule;
pub mod rules;
pub mod trace;
pub mod visitor;


pub use apply::RuleApplier;
pub use configuration::Configuration;
pub use context::Context;
pub use error::Error;
pub use expression::{Expression, Kind, Precedence};
pub use rule::{Fit, Rule};
pub use rules::standard_rules;
pub use trace::Trace;

/// Marks the expression to be differentiated with regard to `symbol`.
///
/// Nothing is computed until the result gets simplified.
pub fn differentiate(expression: Expression, symbol: &str) -> Expression {
    builder::diff(expression, symbol)
}

pub fn simplify(expression: Expression) -> Result<Expression, Error> {
    simplify_with(expression, vec![])
}

/// Simplifies with the standard rules and some additional ones.
pub fn simplify_with(
    expression: Expression,
    extra_rules: Vec<Box<dyn Rule>>,
) -> Result<Expression, Error> {
    Ok(simplify_with_steps(expression, extra_rules)?.expression)
}

/// Same as `simplify_with` but also reports every rewrite.
pub fn simplify_with_steps(
    expression: Expression,
    extra_rules: Vec<Box<dyn Rule>>,
) -> Result<Trace, Error> {
    let mut rules = standard_rules();
    rules.extend(extra_rules);
    RuleApplier::new(rules).apply_traced(expression)
}

/// Parses with the standard functions.
pub fn parse(code: &str) -> Result<Expression, Error> {
    parser::parse(&Context::standard(), code)
}
