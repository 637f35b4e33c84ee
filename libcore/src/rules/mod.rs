//! The built-in rule sets.

pub mod diff;
pub mod simple;

use crate::error::Error;
use crate::expression::Expression;
use crate::rule::{Fit, Rule};

/// Rules bringing expressions into a canonical, smaller form.
pub fn simple_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(simple::EvaluateRule),
        Box::new(simple::IdentityRule),
        Box::new(simple::CombineRule),
        Box::new(simple::ReorderRule),
        Box::new(simple::LeftAlignRule),
        Box::new(simple::HoistDivisionRule),
        Box::new(simple::CancelRule),
    ]
}

/// Rules resolving differential markers.
pub fn diff_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(diff::ConstantRule),
        Box::new(diff::ArithmeticRule),
        Box::new(diff::PowerRule),
        Box::new(diff::ExpLogRule),
        Box::new(diff::TrigRule),
    ]
}

/// Simplification followed by differentiation rules.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    let mut rules = simple_rules();
    rules.extend(diff_rules());
    rules
}

/// Fails unless `fit` is what the rule reports for this expression.
pub(crate) fn ensure_fit<R>(rule: &R, expression: &Expression, fit: Fit) -> Result<(), Error>
where
    R: Rule + ?Sized,
{
    if rule.matches(expression) == Some(fit) {
        Ok(())
    } else {
        Err(Error::misuse(rule.name(), expression))
    }
}

pub(crate) fn split_pair<R>(
    rule: &R,
    expression: Expression,
) -> Result<(Expression, Expression), Error>
where
    R: Rule + ?Sized,
{
    expression
        .into_pair()
        .map_err(|e| Error::misuse(rule.name(), &e))
}

pub(crate) fn split_operand<R>(rule: &R, expression: Expression) -> Result<Expression, Error>
where
    R: Rule + ?Sized,
{
    expression
        .into_operand()
        .map_err(|e| Error::misuse(rule.name(), &e))
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::apply::RuleApplier;
    use vector_assertions::assert_vec_eq;

    #[test]
    fn weights_strictly_decreasing() {
        let weights: Vec<f64> = simple_rules().iter().map(|r| r.weight()).collect();
        for pair in weights.windows(2) {
            assert!(pair[0] > pair[1], "{:?}", weights);
        }
    }

    #[test]
    fn unique_names() {
        let mut names: Vec<&str> = standard_rules().iter().map(|r| r.name()).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn applier_keeps_every_rule() {
        let registered: Vec<&str> = standard_rules().iter().map(|r| r.name()).collect();
        let applier = RuleApplier::new(standard_rules());
        assert_vec_eq!(applier.rule_names(), registered);
    }

    #[test]
    fn diff_constant_first() {
        let rules = diff_rules();
        let constant = rules[0].weight();
        assert!(rules[1..].iter().all(|r| r.weight() < constant));
    }
}
