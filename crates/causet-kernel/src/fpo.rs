//! Framed partial orders: decomposition posets with a designated
//! input/output boundary.
//!
//! An FPO is the order skeleton of one implementation: its elements are
//! the frame inputs, frame outputs, and internal boxes; its edges say
//! which element must precede which. Frame elements are fixed at
//! construction; internal elements are registered incrementally.
//!
//! The frame-input and frame-output lists are expected to be disjoint.
//! That is a caller responsibility — a label appearing in both lists is
//! absorbed idempotently, not rejected.

use crate::dag::Dag;
use crate::error::CausetError;
use serde::{Deserialize, Serialize};

/// A finite poset over decomposition elements, with ordered frame-input
/// and frame-output boundary lists.
///
/// `Clone` produces a deep, fully independent copy: mutating the copy
/// never affects the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramedPartialOrder {
    dag: Dag,
    frame_inputs: Vec<String>,
    frame_outputs: Vec<String>,
}

impl FramedPartialOrder {
    /// Create an FPO with the given boundary. The boundary nodes are
    /// registered immediately, inputs first, in declared order.
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let frame_inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
        let frame_outputs: Vec<String> = outputs.into_iter().map(Into::into).collect();
        let mut dag = Dag::new();
        for label in frame_inputs.iter().chain(frame_outputs.iter()) {
            dag.insert(label.clone());
        }
        Self {
            dag,
            frame_inputs,
            frame_outputs,
        }
    }

    /// Register a new internal (non-boundary) element.
    ///
    /// Fails with [`CausetError::DuplicateLabel`] if the label already
    /// exists, whether as a frame or internal element.
    pub fn add_internal(&mut self, label: impl Into<String>) -> Result<String, CausetError> {
        let label = label.into();
        if self.dag.contains(&label) {
            return Err(CausetError::DuplicateLabel { label });
        }
        self.dag.insert(label.clone());
        Ok(label)
    }

    /// Insert the precedence edge `a -> b` ("a precedes b").
    ///
    /// Fails with [`CausetError::UnknownLabel`] if either endpoint was
    /// never registered, and with [`CausetError::Cycle`] under the same
    /// DAG invariant as [`crate::spacetime::Spacetime`]; the structure
    /// is unchanged on failure.
    pub fn add_order(&mut self, a: &str, b: &str) -> Result<(), CausetError> {
        self.dag.add_edge(a, b)
    }

    /// All element labels: frame inputs, frame outputs, then internals,
    /// each in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.dag.labels()
    }

    /// The ordered frame-input labels.
    pub fn frame_inputs(&self) -> &[String] {
        &self.frame_inputs
    }

    /// The ordered frame-output labels.
    pub fn frame_outputs(&self) -> &[String] {
        &self.frame_outputs
    }

    /// Internal (non-boundary) labels in registration order.
    pub fn internals(&self) -> Vec<&str> {
        self.dag
            .labels()
            .filter(|l| !self.is_boundary(l))
            .collect()
    }

    /// Whether the label is a frame input or frame output.
    pub fn is_boundary(&self, label: &str) -> bool {
        self.frame_inputs.iter().any(|l| l == label)
            || self.frame_outputs.iter().any(|l| l == label)
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

    /// `a <= b`: reflexive-transitive reachability, as in
    /// [`crate::spacetime::Spacetime::is_earlier`].
    pub fn is_earlier(&self, a: &str, b: &str) -> bool {
        self.dag.is_earlier(a, b)
    }

    /// Direct predecessors of an element.
    pub fn predecessors(&self, label: &str) -> Vec<&str> {
        self.dag.predecessors(label)
    }

    /// Direct successors of an element.
    pub fn successors(&self, label: &str) -> Vec<&str> {
        self.dag.successors(label)
    }

    /// All precedence edges as `(earlier, later)` pairs.
    pub fn relations(&self) -> Vec<(&str, &str)> {
        self.dag.edges()
    }
}
