use crate::error::Error;
use crate::expression::Expression;
use std::collections::VecDeque;
extern crate serde_yaml;

/// Where a rule was about to be applied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub path: Vec<usize>,
    pub rule_id: usize,
}

/// The most recent rewrites, used to spot rewrites going in circles.
#[derive(Debug, Clone)]
pub struct RewriteLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RewriteLog {
    pub fn new(capacity: usize) -> RewriteLog {
        RewriteLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends the entry and evicts the oldest one when full.
    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<LogEntry> {
        self.entries.pop_back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of a block which appears twice in a row anywhere in the log.
    ///
    /// Only blocks of at least `min_period` entries are considered. The
    /// shortest matching block wins.
    pub fn repeating_period(&self, min_period: usize) -> Option<usize> {
        let len = self.entries.len();
        (min_period.max(1)..=len / 2).find(|&period| {
            (0..=len - 2 * period).any(|start| {
                (0..period).all(|i| self.entries[start + i] == self.entries[start + period + i])
            })
        })
    }
}

/// A rewrite which has been applied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Step {
    pub path: Vec<usize>,
    pub rule_id: usize,
    pub rule: String,
}

/// The result of a rewrite run together with its history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Trace {
    pub changed: bool,
    pub expression: Expression,
    pub steps: Vec<Step>,
    /// Rewrites skipped because they looked like part of a loop.
    pub suppressed: Vec<Step>,
}

impl Trace {
    /// Whether the result is a fixed point reached without suppressing any rewrite.
    pub fn is_complete(&self) -> bool {
        self.suppressed.is_empty()
    }

    pub fn write_bincode<W>(&self, writer: W) -> Result<(), Error>
    where
        W: std::io::Write,
    {
        Ok(bincode::serialize_into(writer, self)?)
    }

    pub fn write_yaml<W>(&self, writer: W) -> Result<(), Error>
    where
        W: std::io::Write,
    {
        Ok(serde_yaml::to_writer(writer, self)?)
    }
}
