//! # Causet Kernel
//!
//! Order-embeddability of causal process decompositions into discrete
//! spacetimes: given a decomposition expressed as a framed partial
//! order and a target causal order of spacetime points, decide whether
//! an order-preserving placement of the decomposition's elements into
//! spacetime points exists, subject to a physical theory's
//! admissibility verdict and a bounded search budget.
//!
//! This crate is **theory-agnostic**: it does not prescribe which
//! implementations a physical theory admits. It only prescribes how an
//! admitted decomposition must sit inside a spacetime without violating
//! causal order.
//!
//! ## Architecture
//!
//! ```text
//! Spacetime            ← target causal order: a DAG of labeled points
//!     │
//! FramedPartialOrder   ← decomposition poset with an input/output frame
//!     │
//! Implementation       ← Process + FPO + Components (one decomposition)
//!     │
//! Theory               ← admissibility predicate over implementations
//!     │
//! embed()              ← complete backtracking order-embedding search
//! ```

pub mod embed;
pub mod error;
pub mod fpo;
pub mod process;
pub mod spacetime;
pub mod theory;
pub mod witness;

mod dag;

pub use embed::{
    Budget, EmbedWitness, Embeddability, Localisation, embed, synthesize_localisation,
    verify_assignment,
};
pub use error::CausetError;
pub use fpo::FramedPartialOrder;
pub use process::{Component, Implementation, ImplementationSet, Process};
pub use spacetime::Spacetime;
pub use theory::Theory;
pub use witness::compute_witness_id;
