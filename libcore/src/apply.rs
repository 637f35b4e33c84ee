use crate::configuration::Configuration;
use crate::error::Error;
use crate::expression::Expression;
use crate::rule::{Fit, Rule};
use crate::trace::{LogEntry, RewriteLog, Step, Trace};
use tracing::{debug, warn};

struct Entry {
    id: usize,
    rule: Box<dyn Rule>,
}

/// State of a single `apply` call.
struct Session {
    path: Vec<usize>,
    log: RewriteLog,
    steps: Vec<Step>,
    suppressed: Vec<Step>,
}

impl Session {
    fn step(&self, entry: &Entry) -> Step {
        Step {
            path: self.path.clone(),
            rule_id: entry.id,
            rule: String::from(entry.rule.name()),
        }
    }
}

/// Rewrites expressions until no rule matches anywhere in the tree.
///
/// Childs are always rewritten before their parent. At each node the rule with
/// the highest weight among the matching ones is applied. A rewrite which
/// would continue a repeating pattern of recent rewrites is skipped.
///
/// Rewriting recurses once per tree level, so the depth of the input is bounded
/// by the stack of the calling thread.
pub struct RuleApplier {
    rules: Vec<Entry>,
    configuration: Configuration,
}

impl RuleApplier {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> RuleApplier {
        RuleApplier::with_configuration(rules, Configuration::default())
    }

    pub fn with_configuration(
        mut rules: Vec<Box<dyn Rule>>,
        configuration: Configuration,
    ) -> RuleApplier {
        // Stable, so rules with equal weight keep their order.
        rules.sort_by(|a, b| {
            b.weight()
                .partial_cmp(&a.weight())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(id, rule)| Entry { id, rule })
            .collect();
        RuleApplier {
            rules,
            configuration,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Rule names ordered by their id
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|entry| entry.rule.name()).collect()
    }

    /// Returns whether anything changed together with the rewritten expression.
    pub fn apply(&self, expression: Expression) -> Result<(bool, Expression), Error> {
        let trace = self.apply_traced(expression)?;
        Ok((trace.changed, trace.expression))
    }

    pub fn apply_traced(&self, expression: Expression) -> Result<Trace, Error> {
        let mut session = Session {
            path: vec![],
            log: RewriteLog::new(self.configuration.log_capacity),
            steps: vec![],
            suppressed: vec![],
        };
        let (changed, expression) = self.apply_at(&mut session, expression)?;
        Ok(Trace {
            changed,
            expression,
            steps: session.steps,
            suppressed: session.suppressed,
        })
    }

    fn apply_at(
        &self,
        session: &mut Session,
        expression: Expression,
    ) -> Result<(bool, Expression), Error> {
        let mut node = expression;
        let mut changed = false;
        loop {
            let mut matched = false;
            let (kind, childs) = node.into_parts();
            let mut new_childs = Vec::with_capacity(childs.len());
            for (i, child) in childs.into_iter().enumerate() {
                session.path.push(i);
                let result = self.apply_at(session, child);
                session.path.pop();
                let (child_changed, child) = result?;
                matched |= child_changed;
                new_childs.push(child);
            }
            node = Expression::from_parts(kind, new_childs);

            if let Some((entry, fit)) = self.candidate(session, &node) {
                node = entry.rule.apply(node, fit)?;
                matched = true;
            }
            if !matched {
                return Ok((changed, node));
            }
            changed = true;
        }
    }

    /// The first matching rule, unless applying it looks like part of a loop.
    fn candidate(&self, session: &mut Session, node: &Expression) -> Option<(&Entry, Fit)> {
        let (entry, fit) = self
            .rules
            .iter()
            .find_map(|entry| entry.rule.matches(node).map(|fit| (entry, fit)))?;

        if self.configuration.loop_detection {
            session.log.push(LogEntry {
                path: session.path.clone(),
                rule_id: entry.id,
            });
            if let Some(period) = session.log.repeating_period(self.configuration.min_period) {
                session.log.pop();
                warn!(
                    target: "rewrite",
                    "Suppressing {} at {:?} on {}: repeats with period {}",
                    entry.rule.name(),
                    session.path,
                    node,
                    period
                );
                let step = session.step(entry);
                session.suppressed.push(step);
                return None;
            }
        }
        debug!(
            target: "rewrite",
            "Applying {} at {:?} on {}",
            entry.rule.name(),
            session.path,
            node
        );
        let step = session.step(entry);
        session.steps.push(step);
        Some((entry, fit))
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::builder::*;
    use crate::expression::Kind;

    struct Rename {
        name: &'static str,
        weight: f64,
        from: &'static str,
        to: &'static str,
    }

    impl Rule for Rename {
        fn name(&self) -> &'static str {
            self.name
        }

        fn weight(&self) -> f64 {
            self.weight
        }

        fn matches(&self, expression: &Expression) -> Option<Fit> {
            if expression.as_variable() == Some(self.from) {
                Some(Fit(0))
            } else {
                None
            }
        }

        fn apply(&self, expression: Expression, fit: Fit) -> Result<Expression, Error> {
            match self.matches(&expression) {
                Some(expected) if expected == fit => Ok(var(self.to)),
                _ => Err(Error::misuse(self.name, &expression)),
            }
        }
    }

    fn rename(
        name: &'static str,
        weight: f64,
        from: &'static str,
        to: &'static str,
    ) -> Box<dyn Rule> {
        Box::new(Rename {
            name,
            weight,
            from,
            to,
        })
    }

    /// Swaps the operands of every sum, forever.
    struct Swap;

    impl Rule for Swap {
        fn name(&self) -> &'static str {
            "Swap"
        }

        fn weight(&self) -> f64 {
            1.0
        }

        fn matches(&self, expression: &Expression) -> Option<Fit> {
            match expression.kind() {
                Kind::Add => Some(Fit(0)),
                _ => None,
            }
        }

        fn apply(&self, expression: Expression, _: Fit) -> Result<Expression, Error> {
            let (left, right) = expression
                .into_pair()
                .map_err(|e| Error::misuse(self.name(), &e))?;
            Ok(add(right, left))
        }
    }

    #[test]
    fn sorted_by_weight() {
        let applier = RuleApplier::new(vec![
            rename("low", 1.0, "x", "y"),
            rename("high", 5.0, "x", "z"),
            rename("tie", 1.0, "x", "w"),
        ]);
        assert_eq!(applier.rule_names(), vec!["high", "low", "tie"]);
    }

    #[test]
    fn highest_weight_wins() {
        let applier = RuleApplier::new(vec![
            rename("low", 1.0, "x", "y"),
            rename("high", 5.0, "x", "z"),
        ]);
        let (changed, actual) = applier.apply(var("x")).unwrap();
        assert!(changed);
        assert_eq!(actual.to_string(), "z");
    }

    #[test]
    fn registration_order_breaks_ties() {
        let applier = RuleApplier::new(vec![
            rename("first", 1.0, "x", "y"),
            rename("second", 1.0, "x", "z"),
        ]);
        let (_, actual) = applier.apply(var("x")).unwrap();
        assert_eq!(actual.to_string(), "y");
    }

    #[test]
    fn no_match_is_unchanged() {
        let applier = RuleApplier::new(vec![rename("r", 1.0, "x", "y")]);
        let (changed, actual) = applier.apply(add(var("a"), var("b"))).unwrap();
        assert!(!changed);
        assert_eq!(actual.to_string(), "a + b");
    }

    #[test]
    fn chains_to_fixed_point() {
        let applier = RuleApplier::new(vec![
            rename("x->y", 1.0, "x", "y"),
            rename("y->z", 1.0, "y", "z"),
        ]);
        let trace = applier.apply_traced(mul(var("x"), var("a"))).unwrap();
        assert_eq!(trace.expression.to_string(), "z * a");
        let rules: Vec<&str> = trace.steps.iter().map(|s| s.rule.as_str()).collect();
        assert_eq!(rules, vec!["x->y", "y->z"]);
        assert!(trace.is_complete());
    }

    #[test]
    fn childs_before_parent() {
        let applier = RuleApplier::new(vec![rename("r", 1.0, "x", "y")]);
        let trace = applier
            .apply_traced(add(var("x"), sin(var("x"))))
            .unwrap();
        let paths: Vec<Vec<usize>> = trace.steps.iter().map(|s| s.path.clone()).collect();
        assert_eq!(paths, vec![vec![0], vec![1, 0]]);
        assert_eq!(trace.expression.to_string(), "y + sin y");
    }

    #[test]
    fn suppresses_loops() {
        let applier = RuleApplier::new(vec![Box::new(Swap)]);
        let trace = applier.apply_traced(add(var("a"), var("b"))).unwrap();
        assert!(trace.changed);
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.suppressed.len(), 1);
        assert_eq!(trace.suppressed[0].rule, "Swap");
        assert!(!trace.is_complete());
        assert_eq!(trace.expression.to_string(), "b + a");
    }

    #[test]
    fn longer_min_period_allows_more_swaps() {
        let configuration = Configuration {
            min_period: 3,
            ..Configuration::default()
        };
        let applier = RuleApplier::with_configuration(vec![Box::new(Swap)], configuration);
        let trace = applier.apply_traced(add(var("a"), var("b"))).unwrap();
        assert_eq!(trace.steps.len(), 5);
        assert_eq!(trace.expression.to_string(), "b + a");
    }

    #[test]
    fn reusable_across_calls() {
        let applier = RuleApplier::new(vec![Box::new(Swap)]);
        let first = applier.apply_traced(add(var("a"), var("b"))).unwrap();
        let second = applier.apply_traced(add(var("a"), var("b"))).unwrap();
        assert_eq!(first.steps.len(), second.steps.len());
    }
}
