//! Quantum theory: entanglement is a legal resource.

use causet_kernel::{Implementation, Theory};

/// The quantum theory admits every implementation, quantum components
/// included; it relies on the kernel's default verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantumTheory;

impl Theory for QuantumTheory {
    fn name(&self) -> &str {
        "Quantum Theory"
    }
}
