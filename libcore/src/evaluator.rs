use crate::error::Error;
use crate::expression::{Expression, Kind};
use crate::visitor::reduce;

fn evaluate_node(node: &Expression, childs: Vec<Result<f64, Error>>) -> Result<f64, Error> {
    let childs = childs.into_iter().collect::<Result<Vec<f64>, Error>>()?;
    let value = match (node.kind(), childs.as_slice()) {
        (Kind::Real(value), []) => *value,
        (Kind::Integer(value), []) => *value as f64,
        (Kind::Negate, [a]) => -a,
        (Kind::Sin, [a]) => a.sin(),
        (Kind::Cos, [a]) => a.cos(),
        (Kind::Exp, [a]) => a.exp(),
        (Kind::Log, [a]) => a.ln(),
        (Kind::Add, [a, b]) => a + b,
        (Kind::Sub, [a, b]) => a - b,
        (Kind::Mul, [a, b]) => a * b,
        (Kind::Div, [a, b]) => a / b,
        (Kind::Pow, [a, b]) => a.powf(*b),
        (kind, _) => {
            return Err(Error::UnsupportedVariant {
                variant: kind.name(),
            })
        }
    };
    Ok(value)
}

/// Computes the numeric value of a tree without variables and differentials.
///
/// Follows IEEE semantics, so `1 / 0` is infinite and `log 0` is `-inf`.
pub fn evaluate(expression: &Expression) -> Result<f64, Error> {
    reduce(expression, evaluate_node)
}

impl Expression {
    #[inline]
    pub fn evaluate(&self) -> Result<f64, Error> {
        evaluate(self)
    }
}
