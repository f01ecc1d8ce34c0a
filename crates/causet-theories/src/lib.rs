//! Concrete physical theories for the Causet kernel.
//!
//! Each theory implements the kernel's [`causet_kernel::Theory`] trait
//! with one pure admissibility predicate over an implementation's
//! components. The kernel never inspects theory identity — adding a
//! theory means adding one predicate.

pub mod boxworld;
pub mod classical;
pub mod quantum;

pub use boxworld::BoxWorldTheory;
pub use classical::{ClassicalTheory, QUANTUM_FLAG};
pub use quantum::QuantumTheory;
