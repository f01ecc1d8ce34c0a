//! Shared DAG substrate for the kernel's partial orders.
//!
//! Both [`crate::spacetime::Spacetime`] and [`crate::fpo::FramedPartialOrder`]
//! present a finite poset as a DAG of precedence edges. This module owns
//! the label arena, the cycle-checked edge insertion, and the
//! reflexive-transitive reachability query they share.
//!
//! Labels keep insertion order; neighbor sets are sorted by node index,
//! so every traversal is deterministic.

use crate::error::CausetError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A finite DAG over string labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Dag {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    out: Vec<BTreeSet<usize>>,
    inn: Vec<BTreeSet<usize>>,
}

impl Dag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a label, idempotently. Returns its node index.
    pub(crate) fn insert(&mut self, label: impl Into<String>) -> usize {
        let label = label.into();
        if let Some(&idx) = self.index.get(&label) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(label.clone(), idx);
        self.labels.push(label);
        self.out.push(BTreeSet::new());
        self.inn.push(BTreeSet::new());
        idx
    }

    pub(crate) fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub(crate) fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels in insertion order.
    pub(crate) fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Insert the precedence edge `earlier -> later`.
    ///
    /// Rejected with [`CausetError::Cycle`] when the edge would close a
    /// directed cycle (including the self-loop case); the edge sets are
    /// untouched on rejection. Both endpoints must already be registered.
    pub(crate) fn add_edge(&mut self, earlier: &str, later: &str) -> Result<(), CausetError> {
        let a = self
            .index_of(earlier)
            .ok_or_else(|| CausetError::UnknownLabel {
                label: earlier.to_string(),
            })?;
        let b = self
            .index_of(later)
            .ok_or_else(|| CausetError::UnknownLabel {
                label: later.to_string(),
            })?;

        // A cycle appears exactly when `later` already reaches `earlier`.
        // Checking before inserting keeps rejection side-effect free.
        if a == b || self.reaches(b, a) {
            return Err(CausetError::Cycle {
                earlier: earlier.to_string(),
                later: later.to_string(),
            });
        }

        self.out[a].insert(b);
        self.inn[b].insert(a);
        Ok(())
    }

    /// Reflexive-transitive reachability by node index.
    pub(crate) fn reaches(&self, from: usize, to: usize) -> bool {
        if from == to {
            return true;
        }
        let mut visited = vec![false; self.labels.len()];
        let mut stack = vec![from];
        visited[from] = true;
        while let Some(node) = stack.pop() {
            for &next in &self.out[node] {
                if next == to {
                    return true;
                }
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    /// `a <= b` in the partial order. Reflexively true for equal labels;
    /// false (not an error) when either label is unknown.
    pub(crate) fn is_earlier(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.reaches(i, j),
            _ => false,
        }
    }

    /// Direct in-neighbors, by index order. Empty for unknown labels.
    pub(crate) fn predecessors(&self, label: &str) -> Vec<&str> {
        self.neighbors(label, &self.inn)
    }

    /// Direct out-neighbors, by index order. Empty for unknown labels.
    pub(crate) fn successors(&self, label: &str) -> Vec<&str> {
        self.neighbors(label, &self.out)
    }

    fn neighbors<'a>(&'a self, label: &str, side: &'a [BTreeSet<usize>]) -> Vec<&'a str> {
        match self.index_of(label) {
            Some(idx) => side[idx].iter().map(|&n| self.labels[n].as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Labels with no in-edges, insertion order.
    pub(crate) fn sources(&self) -> Vec<&str> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.inn[i].is_empty())
            .map(|(_, l)| l.as_str())
            .collect()
    }

    /// Labels with no out-edges, insertion order.
    pub(crate) fn sinks(&self) -> Vec<&str> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.out[i].is_empty())
            .map(|(_, l)| l.as_str())
            .collect()
    }

    /// All edges as `(earlier, later)` label pairs, in deterministic order.
    pub(crate) fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        for (i, targets) in self.out.iter().enumerate() {
            for &j in targets {
                edges.push((self.labels[i].as_str(), self.labels[j].as_str()));
            }
        }
        edges
    }
}
