use crate::error::Error;
use crate::expression::Expression;

/// Identifies which of the mutually exclusive patterns of a rule matched.
///
/// Every rule defines its own tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fit(pub u8);

/// A local rewrite of a single node.
pub trait Rule {
    /// Name used in logs and traces
    fn name(&self) -> &'static str;

    /// Priority. Rules with a higher weight are tried first.
    fn weight(&self) -> f64;

    /// Checks whether the rule applies to this very node (not its childs).
    fn matches(&self, expression: &Expression) -> Option<Fit>;

    /// Rewrites the node.
    ///
    /// `fit` has to be the result of `matches` on the same expression.
    /// Otherwise `Error::RuleMisuse` is returned.
    fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error>;
}
