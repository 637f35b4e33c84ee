//! Text renderings of expressions.

mod base;
mod plain;

use crate::expression::{Expression, Precedence};
use base::fill_template;
pub use plain::dump_display;

/// Renders the expression with every substituted child in brackets.
pub fn dump_symbolic(expression: &Expression) -> String {
    let childs = expression.childs();
    fill_template(&expression.kind().template(), |i| {
        childs
            .get(i)
            .map(|child| format!("({})", dump_symbolic(child)))
    })
}

impl Expression {
    pub fn render_symbolic(&self) -> String {
        dump_symbolic(self)
    }

    pub fn render_display(&self) -> String {
        dump_display(self, Precedence::PLowest)
    }

    /// Compares the display output of both expressions.
    ///
    /// Differently shaped trees that print the same are considered equal.
    pub fn weak_equals(&self, other: &Expression) -> bool {
        self.render_display() == other.render_display()
    }
}
