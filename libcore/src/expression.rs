use std::borrow::Cow;
use std::convert::TryInto;

/// Display-only grouping rank.
///
/// The order is total: a child is put in parentheses when it binds weaker than
/// the node it is printed in.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Precedence {
    PLowest,
    PEquals,
    PSum,
    PProduct,
    PPower,
    PUnary,
    PFunction,
    PLiteral,
}

/// The closed set of node variants.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum Kind {
    Variable(String),
    Real(f64),
    Integer(i64),
    Negate,
    Sin,
    Cos,
    Exp,
    Log,
    /// Differential marker, carrying the symbol it differentiates with regard to.
    Diff(String),
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Kind {
    pub fn arity(&self) -> usize {
        match self {
            Kind::Variable(_) | Kind::Real(_) | Kind::Integer(_) => 0,
            Kind::Negate | Kind::Sin | Kind::Cos | Kind::Exp | Kind::Log | Kind::Diff(_) => 1,
            Kind::Add | Kind::Sub | Kind::Mul | Kind::Div | Kind::Pow => 2,
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Kind::Variable(_) | Kind::Real(_) | Kind::Integer(_) => Precedence::PLiteral,
            Kind::Negate => Precedence::PUnary,
            Kind::Sin | Kind::Cos | Kind::Exp | Kind::Log | Kind::Diff(_) => Precedence::PFunction,
            Kind::Add | Kind::Sub => Precedence::PSum,
            Kind::Mul | Kind::Div => Precedence::PProduct,
            Kind::Pow => Precedence::PPower,
        }
    }

    /// The display template. `%0`, `%1`, ... mark where the childs are inserted.
    pub fn template(&self) -> Cow<'static, str> {
        match self {
            Kind::Variable(name) => Cow::Owned(name.clone()),
            Kind::Real(value) => Cow::Owned(format!("{:?}", value)),
            Kind::Integer(value) => Cow::Owned(value.to_string()),
            Kind::Negate => Cow::Borrowed("-%0"),
            Kind::Sin => Cow::Borrowed("sin %0"),
            Kind::Cos => Cow::Borrowed("cos %0"),
            Kind::Exp => Cow::Borrowed("exp %0"),
            Kind::Log => Cow::Borrowed("log %0"),
            Kind::Diff(regard) => Cow::Owned(format!("d/d{} %0", regard)),
            Kind::Add => Cow::Borrowed("%0 + %1"),
            Kind::Sub => Cow::Borrowed("%0 - %1"),
            Kind::Mul => Cow::Borrowed("%0 * %1"),
            Kind::Div => Cow::Borrowed("%0 / %1"),
            Kind::Pow => Cow::Borrowed("%0 ^ %1"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Variable(_) => "Variable",
            Kind::Real(_) => "RealConstant",
            Kind::Integer(_) => "IntConstant",
            Kind::Negate => "Negate",
            Kind::Sin => "Sin",
            Kind::Cos => "Cos",
            Kind::Exp => "Exp",
            Kind::Log => "Log",
            Kind::Diff(_) => "Diff",
            Kind::Add => "Add",
            Kind::Sub => "Sub",
            Kind::Mul => "Mul",
            Kind::Div => "Div",
            Kind::Pow => "Pow",
        }
    }
}

/// A node of an expression tree.
///
/// The number of childs always equals the arity of the kind.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Expression {
    kind: Kind,
    childs: Vec<Expression>,
}

impl Expression {
    pub(crate) fn leaf(kind: Kind) -> Expression {
        debug_assert_eq!(kind.arity(), 0);
        Expression {
            kind,
            childs: vec![],
        }
    }

    pub(crate) fn unary(kind: Kind, operand: Expression) -> Expression {
        debug_assert_eq!(kind.arity(), 1);
        Expression {
            kind,
            childs: vec![operand],
        }
    }

    pub(crate) fn binary(kind: Kind, left: Expression, right: Expression) -> Expression {
        debug_assert_eq!(kind.arity(), 2);
        Expression {
            kind,
            childs: vec![left, right],
        }
    }

    /// Reassembles a node from parts previously taken with `into_parts`.
    pub(crate) fn from_parts(kind: Kind, childs: Vec<Expression>) -> Expression {
        debug_assert_eq!(kind.arity(), childs.len());
        Expression { kind, childs }
    }

    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    pub fn childs(&self) -> &[Expression] {
        &self.childs
    }

    pub fn into_parts(mut self) -> (Kind, Vec<Expression>) {
        // Placeholder, the emptied node is dropped right away.
        let kind = std::mem::replace(&mut self.kind, Kind::Integer(0));
        (kind, std::mem::take(&mut self.childs))
    }

    /// Splits a binary node into its operands or hands the node back.
    pub fn into_pair(self) -> Result<(Expression, Expression), Expression> {
        let (kind, childs) = self.into_parts();
        let [left, right]: [Expression; 2] = childs
            .try_into()
            .map_err(|childs| Expression { kind, childs })?;
        Ok((left, right))
    }

    /// Takes the operand of an unary node or hands the node back.
    pub fn into_operand(self) -> Result<Expression, Expression> {
        let (kind, childs) = self.into_parts();
        let [operand]: [Expression; 1] = childs
            .try_into()
            .map_err(|childs| Expression { kind, childs })?;
        Ok(operand)
    }

    /// Left operand of a binary node.
    #[inline]
    pub fn left(&self) -> Option<&Expression> {
        self.binary_childs().map(|(left, _)| left)
    }

    /// Right operand of a binary node.
    #[inline]
    pub fn right(&self) -> Option<&Expression> {
        self.binary_childs().map(|(_, right)| right)
    }

    pub fn binary_childs(&self) -> Option<(&Expression, &Expression)> {
        match self.childs.as_slice() {
            [left, right] => Some((left, right)),
            _ => None,
        }
    }

    /// The only child of an unary node.
    pub fn operand(&self) -> Option<&Expression> {
        match self.childs.as_slice() {
            [operand] => Some(operand),
            _ => None,
        }
    }

    /// Value of a numeric literal
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            Kind::Real(value) => Some(value),
            Kind::Integer(value) => Some(value as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Checks for a numeric literal with exactly this value.
    pub fn is_number_of(&self, expected: f64) -> bool {
        self.as_number().map_or(false, |value| value == expected)
    }

    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            Kind::Variable(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.as_variable().is_some()
    }

    #[inline]
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Number of nodes in this tree
    pub fn size(&self) -> usize {
        let mut stack = vec![self];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.childs.iter());
        }
        count
    }

    /// Returns the node at the specified path
    pub fn at(&self, path: &[usize]) -> Option<&Expression> {
        let mut current = self;
        for i in path.iter() {
            match current.childs.get(*i) {
                None => return None,
                Some(next) => current = next,
            }
        }
        Some(current)
    }
}

/// Tears the tree down with an explicit stack, so deep trees do not exhaust the
/// call stack when dropped.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.childs);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.childs);
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::builder::*;

    #[test]
    fn arity_matches_childs() {
        let expressions = vec![
            var("x"),
            real(1.5),
            int(3),
            neg(var("x")),
            sin(var("x")),
            diff(var("x"), "x"),
            add(var("x"), real(1.0)),
            pow(var("x"), real(2.0)),
        ];
        for expression in expressions.iter() {
            assert_eq!(expression.kind().arity(), expression.childs().len());
        }
    }

    #[test]
    fn precedence_order() {
        assert!(Precedence::PLowest < Precedence::PEquals);
        assert!(Precedence::PEquals < Precedence::PSum);
        assert!(Precedence::PSum < Precedence::PProduct);
        assert!(Precedence::PProduct < Precedence::PPower);
        assert!(Precedence::PPower < Precedence::PUnary);
        assert!(Precedence::PUnary < Precedence::PFunction);
        assert!(Precedence::PFunction < Precedence::PLiteral);
    }

    #[test]
    fn into_pair_hands_back_non_binary() {
        let expression = sin(var("x"));
        let back = expression.into_pair().unwrap_err();
        assert_eq!(back.kind(), &Kind::Sin);
    }

    #[test]
    fn into_pair_binary() {
        let (left, right) = sub(var("a"), var("b")).into_pair().unwrap();
        assert_eq!(left.as_variable(), Some("a"));
        assert_eq!(right.as_variable(), Some("b"));
    }

    #[test]
    fn numbers() {
        assert_eq!(int(3).as_number(), Some(3.0));
        assert!(real(0.0).is_number_of(0.0));
        assert!(!var("x").is_number());
    }

    #[test]
    fn drops_deep_tree() {
        let mut expression = var("x");
        for _ in 0..200_000 {
            expression = sin(add(expression, real(1.0)));
        }
        assert_eq!(expression.size(), 600_001);
        drop(expression);
    }

    #[test]
    fn into_parts_keeps_childs() {
        let (kind, childs) = add(var("a"), var("b")).into_parts();
        assert_eq!(kind, Kind::Add);
        assert_eq!(childs.len(), 2);
        assert_eq!(childs[1].as_variable(), Some("b"));
    }

    #[test]
    fn at_in_bound() {
        let expression = add(mul(var("a"), var("b")), var("c"));

        let actual = expression.at(&[0, 1]).and_then(|e| e.as_variable());
        assert_eq!(actual, Some("b"));
        assert!(expression.at(&[0, 4]).is_none());
        assert_eq!(expression.size(), 5);
    }
}
