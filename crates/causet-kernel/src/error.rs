//! Error types for kernel construction operations.
//!
//! Only malformed graph construction is an error. The embeddability
//! search never produces these: "no embedding exists" and "budget
//! exhausted" are ordinary [`crate::embed::Embeddability`] outcomes.

/// Errors arising from invalid operations on causal orders and FPOs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CausetError {
    /// An edge insertion would violate the DAG invariant.
    ///
    /// The structure is left unchanged; the caller may retry with a
    /// different edge.
    #[error("relation {earlier} -> {later} would create a cycle")]
    Cycle { earlier: String, later: String },

    /// A label was registered twice.
    #[error("duplicate label: {label}")]
    DuplicateLabel { label: String },

    /// An operation referenced a label that was never registered.
    #[error("unknown label: {label}")]
    UnknownLabel { label: String },
}
