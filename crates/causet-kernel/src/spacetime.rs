//! Discrete spacetimes as finite causal orders.
//!
//! A spacetime is a finite poset of labeled points: `a -> b` means
//! "a causally precedes b". The structure is built once, before any
//! embeddability query, and queries never mutate it.

use crate::dag::Dag;
use crate::error::CausetError;
use serde::{Deserialize, Serialize};

/// A discrete spacetime: a DAG of causal-precedence edges over labeled
/// points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spacetime {
    dag: Dag,
}

impl Spacetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an isolated point. Idempotent if the label already exists.
    pub fn add_point(&mut self, label: impl Into<String>) {
        self.dag.insert(label);
    }

    /// Insert the causal relation `earlier <= later`.
    ///
    /// Unregistered endpoints are registered on the fly. Fails with
    /// [`CausetError::Cycle`] when the relation would close a directed
    /// cycle; the structure is unchanged on failure.
    pub fn add_relation(
        &mut self,
        earlier: impl Into<String>,
        later: impl Into<String>,
    ) -> Result<(), CausetError> {
        let earlier = earlier.into();
        let later = later.into();
        if earlier == later {
            return Err(CausetError::Cycle { earlier, later });
        }
        // Registering first cannot introduce a cycle: a fresh point has
        // no incident edges, so the cycle check below still sees the
        // pre-insertion reachability.
        self.dag.insert(earlier.clone());
        self.dag.insert(later.clone());
        self.dag.add_edge(&earlier, &later)
    }

    /// All point labels, insertion order.
    pub fn points(&self) -> impl Iterator<Item = &str> {
        self.dag.labels()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.dag.contains(label)
    }

    pub fn len(&self) -> usize {
        self.dag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dag.is_empty()
    }

    /// `a <= b`: true iff `a == b` or a directed path `a -> b` exists.
    pub fn is_earlier(&self, a: &str, b: &str) -> bool {
        self.dag.is_earlier(a, b)
    }

    /// Direct causal predecessors of a point.
    pub fn predecessors(&self, label: &str) -> Vec<&str> {
        self.dag.predecessors(label)
    }

    /// Direct causal successors of a point.
    pub fn successors(&self, label: &str) -> Vec<&str> {
        self.dag.successors(label)
    }

    /// Points with no predecessor, insertion order.
    pub fn sources(&self) -> Vec<&str> {
        self.dag.sources()
    }

    /// Points with no successor, insertion order.
    pub fn sinks(&self) -> Vec<&str> {
        self.dag.sinks()
    }

    /// All causal relations as `(earlier, later)` pairs.
    pub fn relations(&self) -> Vec<(&str, &str)> {
        self.dag.edges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(labels: &[&str]) -> Spacetime {
        let mut st = Spacetime::new();
        for pair in labels.windows(2) {
            st.add_relation(pair[0], pair[1]).expect("chain must build");
        }
        st
    }

    #[test]
    fn add_point_is_idempotent() {
        let mut st = Spacetime::new();
        st.add_point("p");
        st.add_point("p");
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn relation_registers_endpoints() {
        let mut st = Spacetime::new();
        st.add_relation("a", "b").expect("must insert");
        assert!(st.contains("a"));
        assert!(st.contains("b"));
        assert!(st.is_earlier("a", "b"));
    }

    #[test]
    fn rejected_relation_leaves_structure_unchanged() {
        let mut st = chain(&["a", "b", "c"]);
        let before = st.relations().len();
        let err = st.add_relation("c", "a").expect_err("would close a cycle");
        assert!(matches!(err, CausetError::Cycle { .. }));
        assert_eq!(st.relations().len(), before);
    }

    #[test]
    fn self_relation_rejects_without_registering() {
        let mut st = Spacetime::new();
        let err = st.add_relation("p", "p").expect_err("self-loop");
        assert!(matches!(err, CausetError::Cycle { .. }));
        assert!(!st.contains("p"));
    }

    #[test]
    fn is_earlier_is_reflexive_and_transitive() {
        let st = chain(&["a", "b", "c", "d"]);
        for p in ["a", "b", "c", "d"] {
            assert!(st.is_earlier(p, p));
        }
        assert!(st.is_earlier("a", "d"));
        assert!(!st.is_earlier("d", "a"));
        assert!(!st.is_earlier("b", "a"));
    }

    #[test]
    fn neighbors_of_a_diamond() {
        let mut st = Spacetime::new();
        st.add_relation("a", "b").expect("must insert");
        st.add_relation("a", "c").expect("must insert");
        st.add_relation("b", "d").expect("must insert");
        st.add_relation("c", "d").expect("must insert");

        assert_eq!(st.successors("a"), vec!["b", "c"]);
        assert_eq!(st.predecessors("d"), vec!["b", "c"]);
        assert_eq!(st.sources(), vec!["a"]);
        assert_eq!(st.sinks(), vec!["d"]);
    }
}
