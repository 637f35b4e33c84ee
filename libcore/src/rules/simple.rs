//! Algebraic simplification.
//!
//! The rules move numbers to the left, align chains to the left and fold
//! whatever can be computed.

use super::{ensure_fit, split_pair};
use crate::builder::real;
use crate::error::Error;
use crate::evaluator::evaluate;
use crate::expression::{Expression, Kind};
use crate::rule::{Fit, Rule};
use crate::visitor::contains_unevaluable;

fn same_variable(left: &Expression, right: &Expression) -> bool {
    match (left.as_variable(), right.as_variable()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether `expression` continues a chain of `kind`.
///
/// Sums continue with sums and differences, products with products and
/// quotients.
fn is_link(expression: &Expression, kind: &Kind) -> bool {
    match (kind, expression.kind()) {
        (Kind::Add, Kind::Add) | (Kind::Add, Kind::Sub) => true,
        (Kind::Mul, Kind::Mul) | (Kind::Mul, Kind::Div) => true,
        _ => false,
    }
}

/// Replaces a constant sub tree by its value.
pub struct EvaluateRule;

impl EvaluateRule {
    pub const CONSTANT: Fit = Fit(0);
}

impl Rule for EvaluateRule {
    fn name(&self) -> &'static str {
        "Evaluate"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        if expression.is_number() || contains_unevaluable(expression) {
            None
        } else {
            Some(EvaluateRule::CONSTANT)
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        Ok(real(evaluate(&expression)?))
    }
}

/// Neutral and absorbing elements.
pub struct IdentityRule;

impl IdentityRule {
    /// `x ^ 1 => x`
    pub const POW_ONE: Fit = Fit(0);
    /// `x ^ 0 => 1`
    pub const POW_ZERO: Fit = Fit(1);
    /// `1 * x => x`
    pub const MUL_ONE: Fit = Fit(2);
    /// `0 * x => 0`
    pub const MUL_ZERO: Fit = Fit(3);
    /// `0 + x => x`
    pub const ADD_ZERO_LEFT: Fit = Fit(4);
    /// `x + 0 => x`
    pub const ADD_ZERO_RIGHT: Fit = Fit(5);
    /// `x - 0 => x`
    pub const SUB_ZERO: Fit = Fit(6);
    /// `v - v => 0`
    pub const SUB_SELF: Fit = Fit(7);
    /// `v / v => 1`
    pub const DIV_SELF: Fit = Fit(8);
    /// `0 / x => 0`
    pub const DIV_ZERO: Fit = Fit(9);
}

impl Rule for IdentityRule {
    fn name(&self) -> &'static str {
        "Identity"
    }

    fn weight(&self) -> f64 {
        9.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (left, right) = expression.binary_childs()?;
        let fit = match expression.kind() {
            Kind::Pow if right.is_number_of(1.0) => IdentityRule::POW_ONE,
            Kind::Pow if right.is_number_of(0.0) => IdentityRule::POW_ZERO,
            Kind::Mul if left.is_number_of(1.0) => IdentityRule::MUL_ONE,
            Kind::Mul if left.is_number_of(0.0) => IdentityRule::MUL_ZERO,
            Kind::Add if left.is_number_of(0.0) => IdentityRule::ADD_ZERO_LEFT,
            Kind::Add if right.is_number_of(0.0) => IdentityRule::ADD_ZERO_RIGHT,
            Kind::Sub if right.is_number_of(0.0) => IdentityRule::SUB_ZERO,
            Kind::Sub if same_variable(left, right) => IdentityRule::SUB_SELF,
            Kind::Div if same_variable(left, right) => IdentityRule::DIV_SELF,
            Kind::Div if left.is_number_of(0.0) => IdentityRule::DIV_ZERO,
            _ => return None,
        };
        Some(fit)
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let kind = expression.kind().clone();
        let (left, right) = split_pair(self, expression)?;
        match fit {
            IdentityRule::POW_ONE | IdentityRule::ADD_ZERO_RIGHT | IdentityRule::SUB_ZERO => {
                Ok(left)
            }
            IdentityRule::MUL_ONE | IdentityRule::ADD_ZERO_LEFT => Ok(right),
            IdentityRule::POW_ZERO | IdentityRule::DIV_SELF => Ok(real(1.0)),
            IdentityRule::MUL_ZERO | IdentityRule::SUB_SELF | IdentityRule::DIV_ZERO => {
                Ok(real(0.0))
            }
            _ => Err(Error::misuse(
                self.name(),
                &Expression::binary(kind, left, right),
            )),
        }
    }
}

/// Brings neighbouring numbers of a chain together.
///
/// ```latex
/// (P + 2) + 3 => P + (2 + 3)
/// 2 * (3 * P) => (2 * 3) * P
/// (P - 2) - 3 => P - (2 + 3)
/// (P / 2) / 3 => P / (2 * 3)
/// ```
pub struct CombineRule;

impl CombineRule {
    pub const TRAILING: Fit = Fit(0);
    pub const LEADING: Fit = Fit(1);
    pub const SUBTRAHENDS: Fit = Fit(2);
    pub const DIVISORS: Fit = Fit(3);
}

impl Rule for CombineRule {
    fn name(&self) -> &'static str {
        "Combine"
    }

    fn weight(&self) -> f64 {
        8.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let kind = expression.kind();
        let (left, right) = expression.binary_childs()?;
        let trailing = right.is_number()
            && left.kind() == kind
            && left.right().map_or(false, Expression::is_number);
        match kind {
            Kind::Add | Kind::Mul if trailing => Some(CombineRule::TRAILING),
            Kind::Add | Kind::Mul
                if left.is_number()
                    && right.kind() == kind
                    && right.left().map_or(false, Expression::is_number) =>
            {
                Some(CombineRule::LEADING)
            }
            Kind::Sub if trailing => Some(CombineRule::SUBTRAHENDS),
            Kind::Div if trailing => Some(CombineRule::DIVISORS),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let kind = expression.kind().clone();
        let (left, right) = split_pair(self, expression)?;
        match fit {
            CombineRule::LEADING => {
                let (r2, p) = split_pair(self, right)?;
                Ok(Expression::binary(
                    kind.clone(),
                    Expression::binary(kind, left, r2),
                    p,
                ))
            }
            _ => {
                let (p, r1) = split_pair(self, left)?;
                let inner = match fit {
                    CombineRule::SUBTRAHENDS => Kind::Add,
                    CombineRule::DIVISORS => Kind::Mul,
                    _ => kind.clone(),
                };
                Ok(Expression::binary(kind, p, Expression::binary(inner, r1, right)))
            }
        }
    }
}

/// Moves numbers to the front of sums and products, followed by variables.
pub struct ReorderRule;

impl ReorderRule {
    /// `P + 2 => 2 + P`
    pub const NUMBER: Fit = Fit(0);
    /// `sin y + x => x + sin y`
    pub const VARIABLE: Fit = Fit(1);
}

impl Rule for ReorderRule {
    fn name(&self) -> &'static str {
        "Reorder"
    }

    fn weight(&self) -> f64 {
        7.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let kind = expression.kind();
        match kind {
            Kind::Add | Kind::Mul => (),
            _ => return None,
        }
        let (left, right) = expression.binary_childs()?;
        if right.is_number() && !left.is_number() {
            Some(ReorderRule::NUMBER)
        } else if right.is_variable()
            && !left.is_number()
            && !left.is_variable()
            && !is_link(left, kind)
        {
            Some(ReorderRule::VARIABLE)
        } else {
            None
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let kind = expression.kind().clone();
        let (left, right) = split_pair(self, expression)?;
        Ok(Expression::binary(kind, right, left))
    }
}

/// Turns right leaning chains into left leaning ones.
///
/// ```latex
/// A + (B + C) => (A + B) + C
/// A + (B - C) => (A + B) - C
/// A * (B * C) => (A * B) * C
/// A * (B / C) => (A * B) / C
/// ```
pub struct LeftAlignRule;

impl LeftAlignRule {
    pub const ALIGN: Fit = Fit(0);
}

impl Rule for LeftAlignRule {
    fn name(&self) -> &'static str {
        "LeftAlign"
    }

    fn weight(&self) -> f64 {
        6.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let kind = expression.kind();
        match kind {
            Kind::Add | Kind::Mul => (),
            _ => return None,
        }
        let right = expression.right()?;
        if is_link(right, kind) {
            Some(LeftAlignRule::ALIGN)
        } else {
            None
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let kind = expression.kind().clone();
        let (a, right) = split_pair(self, expression)?;
        let link = right.kind().clone();
        let (b, c) = split_pair(self, right)?;
        Ok(Expression::binary(link, Expression::binary(kind, a, b), c))
    }
}

/// `A / B * C => A * C / B`
pub struct HoistDivisionRule;

impl HoistDivisionRule {
    pub const HOIST: Fit = Fit(0);
}

impl Rule for HoistDivisionRule {
    fn name(&self) -> &'static str {
        "HoistDivision"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        match (expression.kind(), expression.left().map(Expression::kind)) {
            (Kind::Mul, Some(Kind::Div)) => Some(HoistDivisionRule::HOIST),
            _ => None,
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let (quotient, c) = split_pair(self, expression)?;
        let (a, b) = split_pair(self, quotient)?;
        Ok(Expression::binary(
            Kind::Div,
            Expression::binary(Kind::Mul, a, c),
            b,
        ))
    }
}

/// Link kind and neutral element a variable is cancelled against.
fn cancel_partner(kind: &Kind) -> Option<(Kind, f64)> {
    match kind {
        Kind::Sub => Some((Kind::Add, 0.0)),
        Kind::Div => Some((Kind::Mul, 1.0)),
        _ => None,
    }
}

fn spine_contains(chain: &Expression, link: &Kind, symbol: &str) -> bool {
    let mut current = chain;
    while current.kind() == link {
        match current.binary_childs() {
            Some((left, right)) => {
                if right.as_variable() == Some(symbol) {
                    return true;
                }
                current = left;
            }
            None => return false,
        }
    }
    false
}

/// Rebuilds the chain with the first right operand named `symbol` on its left
/// spine replaced by `neutral`. Hands back the chain if there is none.
fn replace_on_spine(
    chain: Expression,
    link: &Kind,
    symbol: &str,
    neutral: f64,
) -> Result<Expression, Expression> {
    if chain.kind() != link {
        return Err(chain);
    }
    let (left, right) = chain.into_pair()?;
    if right.as_variable() == Some(symbol) {
        return Ok(Expression::binary(link.clone(), left, real(neutral)));
    }
    match replace_on_spine(left, link, symbol, neutral) {
        Ok(left) => Ok(Expression::binary(link.clone(), left, right)),
        Err(left) => Err(Expression::binary(link.clone(), left, right)),
    }
}

/// Cancels a variable against the same variable inside a chain.
///
/// ```latex
/// a + x + b - x => a + 0 + b
/// 2 * x / x => 2 * 1
/// ```
pub struct CancelRule;

impl CancelRule {
    pub const CANCEL: Fit = Fit(0);
}

impl Rule for CancelRule {
    fn name(&self) -> &'static str {
        "Cancel"
    }

    fn weight(&self) -> f64 {
        4.0
    }

    fn matches(&self, expression: &Expression) -> Option<Fit> {
        let (link, _) = cancel_partner(expression.kind())?;
        let (chain, right) = expression.binary_childs()?;
        let symbol = right.as_variable()?;
        if spine_contains(chain, &link, symbol) {
            Some(CancelRule::CANCEL)
        } else {
            None
        }
    }

    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
        ensure_fit(self, &expression, fit)?;
        let kind = expression.kind().clone();
        let (link, neutral) =
            cancel_partner(&kind).ok_or_else(|| Error::misuse(self.name(), &expression))?;
        let (chain, right) = split_pair(self, expression)?;
        let symbol = match right.as_variable() {
            Some(symbol) => symbol.to_string(),
            None => return Err(Error::misuse(self.name(), &right)),
        };
        replace_on_spine(chain, &link, &symbol, neutral).map_err(|chain| {
            Error::misuse(self.name(), &Expression::binary(kind, chain, right))
        })
    }
}
