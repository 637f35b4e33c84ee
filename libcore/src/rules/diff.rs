//! Differentiation.
//!
//! Every rule resolves one level of a `Diff` marker. The childs it produces are
//! wrapped into new markers with the same regard symbol.

use super::{ensure_fit, split_operand, split_pair};
use crate::builder::*;
use crate::error::Error;
use crate::expression::{Expression, Kind};
use crate::rule::{Fit, Rule};
use crate::visitor::contains_variable;

/// Regard symbol and operand of a differential marker
fn marker(expression: &Expression) -> Option<(&str, &Expression)> {
    match expression.kind() {
        Kind::Diff(regard) => Some((regard.as_str(), expression.operand()?)),
        _ => None,
    }
}

fn split_marker<R>(rule: &R, expression: Expression) -> Result<(String, Expression), Error>
where
    R: Rule + ?Sized,
{
    let regard = match expression.kind() {
        Kind::Diff(regard) => regard.clone(),
        _ => return Err(Error::misuse(rule.name(), &expression)),
    };
    let inner = split_operand(rule, expression)?;
    Ok((regard, inner))
}

/// `d/dx c => 0` for anything not containing `x`
pub struct ConstantRule;

impl ConstantRule {
    pub const CONSTANT: Fit = Fit(0);
}

impl Rule for ConstantRule {
    fn name(&self) -> &'static str {
        "DiffConstant"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (regard, inner) = marker(expression)?;
        if contains_variable(inner, Some(regard)) {
            None
        } else {
            Some(ConstantRule::CONSTANT)
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        Ok(real(0.0))
    }
}

/// Linearity, product and quotient rule.
pub struct ArithmeticRule;

impl ArithmeticRule {
    pub const NEGATE: Fit = Fit(0);
    pub const SUM: Fit = Fit(1);
    pub const DIFFERENCE: Fit = Fit(2);
    pub const PRODUCT: Fit = Fit(3);
    pub const QUOTIENT: Fit = Fit(4);
}

impl Rule for ArithmeticRule {
    fn name(&self) -> &'static str {
        "DiffArithmetic"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (_, inner) = marker(expression)?;
        match inner.kind() {
            Kind::Negate => Some(ArithmeticRule::NEGATE),
            Kind::Add => Some(ArithmeticRule::SUM),
            Kind::Sub => Some(ArithmeticRule::DIFFERENCE),
            Kind::Mul => Some(ArithmeticRule::PRODUCT),
            Kind::Div => Some(ArithmeticRule::QUOTIENT),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let (regard, inner) = split_marker(self, expression)?;
        let d = |e: Expression| diff(e, &regard);
        if fit == ArithmeticRule::NEGATE {
            return Ok(neg(d(split_operand(self, inner)?)));
        }
        let kind = inner.kind().clone();
        let (u, v) = split_pair(self, inner)?;
        match fit {
            ArithmeticRule::SUM => Ok(add(d(u), d(v))),
            ArithmeticRule::DIFFERENCE => Ok(sub(d(u), d(v))),
            // (u * v)' = u * v' + v * u'
            ArithmeticRule::PRODUCT => Ok(add(mul(u.clone(), d(v.clone())), mul(v, d(u)))),
            // (u / v)' = (v * u' - u * v') / v^2
            ArithmeticRule::QUOTIENT => Ok(div(
                sub(mul(v.clone(), d(u.clone())), mul(u, d(v.clone()))),
                pow(v, real(2.0)),
            )),
            _ => Err(Error::misuse(
                self.name(),
                &diff(Expression::binary(kind, u, v), &regard),
            )),
        }
    }
}

/// Power rule, including the base case `d/dx x => 1`.
pub struct PowerRule;

impl PowerRule {
    /// `d/dx x`
    pub const VARIABLE: Fit = Fit(0);
    /// `d/dx b^e` with `e` free of `x`
    pub const CONSTANT_EXPONENT: Fit = Fit(1);
    /// `d/dx b^e` with `x` in `e`
    pub const GENERAL_EXPONENT: Fit = Fit(2);
}

impl Rule for PowerRule {
    fn name(&self) -> &'static str {
        "DiffPower"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (regard, inner) = marker(expression)?;
        if inner.as_variable() == Some(regard) {
            return Some(PowerRule::VARIABLE);
        }
        match (inner.kind(), inner.right()) {
            (Kind::Pow, Some(exponent)) if contains_variable(exponent, Some(regard)) => {
                Some(PowerRule::GENERAL_EXPONENT)
            }
            (Kind::Pow, Some(_)) => Some(PowerRule::CONSTANT_EXPONENT),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let (regard, inner) = split_marker(self, expression)?;
        if fit == PowerRule::VARIABLE {
            return Ok(real(1.0));
        }
        let (base, exponent) = split_pair(self, inner)?;
        match fit {
            // (b^e)' = e * b^(e - 1) * b'
            PowerRule::CONSTANT_EXPONENT => Ok(mul(
                mul(exponent.clone(), pow(base.clone(), sub(exponent, real(1.0)))),
                diff(base, &regard),
            )),
            // NOTE: b and e are swapped with respect to b^e = exp(e * log b).
            PowerRule::GENERAL_EXPONENT => Ok(diff(exp(mul(base, log(exponent))), &regard)),
            _ => Err(Error::misuse(self.name(), &diff(pow(base, exponent), &regard))),
        }
    }
}

/// Chain rule for `exp` and `log`.
pub struct ExpLogRule;

impl ExpLogRule {
    pub const EXP: Fit = Fit(0);
    pub const LOG: Fit = Fit(1);
}

impl Rule for ExpLogRule {
    fn name(&self) -> &'static str {
        "DiffExpLog"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (_, inner) = marker(expression)?;
        match inner.kind() {
            Kind::Exp => Some(ExpLogRule::EXP),
            Kind::Log => Some(ExpLogRule::LOG),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let (regard, inner) = split_marker(self, expression)?;
        let u = split_operand(self, inner)?;
        match fit {
            ExpLogRule::EXP => Ok(mul(exp(u.clone()), diff(u, &regard))),
            ExpLogRule::LOG => Ok(mul(div(real(1.0), u.clone()), diff(u, &regard))),
            _ => Err(Error::misuse(self.name(), &diff(u, &regard))),
        }
    }
}

/// Chain rule for `sin` and `cos`.
pub struct TrigRule;

impl TrigRule {
    pub const SIN: Fit = Fit(0);
    pub const COS: Fit = Fit(1);
}

impl Rule for TrigRule {
    fn name(&self) -> &'static str {
        "DiffTrig"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (_, inner) = marker(expression)?;
        match inner.kind() {
            Kind::Sin => Some(TrigRule::SIN),
            Kind::Cos => Some(TrigRule::COS),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let (regard, inner) = split_marker(self, expression)?;
        let u = split_operand(self, inner)?;
        match fit {
            TrigRule::SIN => Ok(mul(cos(u.clone()), diff(u, &regard))),
            TrigRule::COS => Ok(mul(neg(sin(u.clone())), diff(u, &regard))),
            _ => Err(Error::misuse(self.name(), &diff(u, &regard))),
        }
    }
}
