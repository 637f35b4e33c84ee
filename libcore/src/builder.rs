//! Construction helpers for expression trees.
//!
//! # Example
//!
//! ```
//! use symdiff::builder::*;
//!
//! let x = var("x");
//! let expression = real(2.0) * pow(x.clone(), real(2.0)) + sin(x);
//! assert_eq!(expression.to_string(), "2.0 * x ^ 2.0 + sin x");
//! ```

use crate::expression::{Expression, Kind};
use std::ops;

pub fn var(name: &str) -> Expression {
    Expression::leaf(Kind::Variable(String::from(name)))
}

pub fn real(value: f64) -> Expression {
    Expression::leaf(Kind::Real(value))
}

pub fn int(value: i64) -> Expression {
    Expression::leaf(Kind::Integer(value))
}

pub fn neg(operand: Expression) -> Expression {
    Expression::unary(Kind::Negate, operand)
}

pub fn sin(operand: Expression) -> Expression {
    Expression::unary(Kind::Sin, operand)
}

pub fn cos(operand: Expression) -> Expression {
    Expression::unary(Kind::Cos, operand)
}

pub fn exp(operand: Expression) -> Expression {
    Expression::unary(Kind::Exp, operand)
}

pub fn log(operand: Expression) -> Expression {
    Expression::unary(Kind::Log, operand)
}

/// Marks `operand` to be differentiated with regard to `regard`.
pub fn diff(operand: Expression, regard: &str) -> Expression {
    Expression::unary(Kind::Diff(String::from(regard)), operand)
}

pub fn add(left: Expression, right: Expression) -> Expression {
    Expression::binary(Kind::Add, left, right)
}

pub fn sub(left: Expression, right: Expression) -> Expression {
    Expression::binary(Kind::Sub, left, right)
}

pub fn mul(left: Expression, right: Expression) -> Expression {
    Expression::binary(Kind::Mul, left, right)
}

pub fn div(left: Expression, right: Expression) -> Expression {
    Expression::binary(Kind::Div, left, right)
}

pub fn pow(base: Expression, exponent: Expression) -> Expression {
    Expression::binary(Kind::Pow, base, exponent)
}

impl ops::Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        add(self, rhs)
    }
}

impl ops::Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        sub(self, rhs)
    }
}

impl ops::Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        mul(self, rhs)
    }
}

impl ops::Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Expression) -> Expression {
        div(self, rhs)
    }
}

impl ops::Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        neg(self)
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn operators_build_binary_nodes() {
        let expression = var("a") + var("b") * var("c");
        assert_eq!(expression.kind(), &Kind::Add);
        assert_eq!(expression.right().map(|r| r.kind()), Some(&Kind::Mul));
    }

    #[test]
    fn operators_keep_left_association() {
        let expression = var("a") - var("b") - var("c");
        let left = expression.left().unwrap();
        assert_eq!(left.kind(), &Kind::Sub);
        assert_eq!(expression.right().and_then(|r| r.as_variable()), Some("c"));
    }

    #[test]
    fn negation() {
        let expression = -var("x");
        assert_eq!(expression.kind(), &Kind::Negate);
        assert_eq!(expression.operand().and_then(|o| o.as_variable()), Some("x"));
    }

    #[test]
    fn diff_keeps_regard() {
        let expression = diff(var("x"), "z");
        assert_eq!(expression.kind(), &Kind::Diff(String::from("z")));
    }
}
