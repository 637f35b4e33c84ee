use super::base::fill_template;
use crate::expression::{Expression, Precedence};
use std::fmt;

fn dump_impl(expression: &Expression, parent: Precedence, string: &mut String) {
    let own = expression.precedence();
    let childs = expression.childs();
    let body = fill_template(&expression.kind().template(), |i| {
        childs.get(i).map(|child| {
            let mut child_string = String::new();
            dump_impl(child, own, &mut child_string);
            child_string
        })
    });
    if own < parent {
        string.push('(');
        string.push_str(&body);
        string.push(')');
    } else {
        string.push_str(&body);
    }
}

/// Renders the expression for humans.
///
/// A node is put in brackets iff its precedence is strictly lower than the one
/// of the node it is printed in.
pub fn dump_display(expression: &Expression, parent: Precedence) -> String {
    let mut string = String::new();
    dump_impl(expression, parent, &mut string);
    string
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", dump_display(self, Precedence::PLowest))
    }
}
