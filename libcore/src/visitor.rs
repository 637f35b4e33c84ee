use crate::expression::{Expression, Kind};

enum Work<'a> {
    Enter(&'a Expression),
    Exit(&'a Expression),
}

/// Post-order fold over the tree.
///
/// `combine` is called once per node with the results of its childs, in child
/// order. Works with an explicit stack, deep trees do not exhaust the call stack.
pub fn reduce<'a, T, F>(expression: &'a Expression, mut combine: F) -> T
where
    F: FnMut(&'a Expression, Vec<T>) -> T,
{
    let mut stack = vec![Work::Enter(expression)];
    let mut results: Vec<T> = Vec::new();
    while let Some(work) = stack.pop() {
        match work {
            Work::Enter(node) => {
                stack.push(Work::Exit(node));
                for child in node.childs().iter().rev() {
                    stack.push(Work::Enter(child));
                }
            }
            Work::Exit(node) => {
                let split = results.len() - node.childs().len();
                let childs = results.split_off(split);
                results.push(combine(node, childs));
            }
        }
    }
    // The root's exit always leaves exactly one result.
    match results.pop() {
        Some(result) => result,
        None => unreachable!("reduce finished without result"),
    }
}

/// True iff some node is a variable (named `symbol` when given).
pub fn contains_variable(expression: &Expression, symbol: Option<&str>) -> bool {
    reduce(expression, |node, childs: Vec<bool>| {
        childs.into_iter().any(|c| c)
            || match (node.as_variable(), symbol) {
                (Some(_), None) => true,
                (Some(name), Some(symbol)) => name == symbol,
                (None, _) => false,
            }
    })
}

/// True iff some node is a variable or a differential marker.
pub fn contains_unevaluable(expression: &Expression) -> bool {
    reduce(expression, |node, childs: Vec<bool>| {
        childs.into_iter().any(|c| c)
            || match node.kind() {
                Kind::Variable(_) | Kind::Diff(_) => true,
                _ => false,
            }
    })
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::builder::*;

    #[test]
    fn post_order() {
        let expression = add(mul(var("a"), var("b")), var("c"));
        let mut visited = Vec::new();
        reduce(&expression, |node, _: Vec<()>| {
            visited.push(node.kind().name());
        });
        assert_eq!(
            visited,
            vec!["Variable", "Variable", "Mul", "Variable", "Add"]
        );
    }

    #[test]
    fn childs_in_order() {
        let expression = sub(var("a"), add(var("b"), var("c")));
        let actual = reduce(&expression, |node, childs: Vec<String>| {
            if childs.is_empty() {
                node.to_string()
            } else {
                format!("{}[{}]", node.kind().name(), childs.join(","))
            }
        });
        assert_eq!(actual, "Sub[a,Add[b,c]]");
    }

    #[test]
    fn deep_tree() {
        let mut expression = var("x");
        for _ in 0..100_000 {
            expression = neg(expression);
        }
        let depth = reduce(&expression, |_, childs: Vec<usize>| {
            childs.into_iter().max().unwrap_or(0) + 1
        });
        assert_eq!(depth, 100_001);
    }

    #[test]
    fn variables() {
        let expression = add(real(1.0), sin(var("x")));
        assert!(contains_variable(&expression, None));
        assert!(contains_variable(&expression, Some("x")));
        assert!(!contains_variable(&expression, Some("y")));
        assert!(!contains_variable(&real(2.0), None));
    }

    #[test]
    fn unevaluable() {
        assert!(contains_unevaluable(&diff(real(1.0), "x")));
        assert!(contains_unevaluable(&add(real(1.0), var("a"))));
        assert!(!contains_unevaluable(&add(real(1.0), int(2))));
    }
}
