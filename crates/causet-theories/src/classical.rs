//! Classical theory: no quantum resources.

use causet_kernel::{Implementation, Theory};

/// Metadata key marking a component as a quantum resource.
pub const QUANTUM_FLAG: &str = "quantum";

/// The classical theory rejects any implementation containing a
/// component whose metadata carries a truthy [`QUANTUM_FLAG`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalTheory;

impl Theory for ClassicalTheory {
    fn name(&self) -> &str {
        "Classical Theory"
    }

    fn allows_implementation(&self, implementation: &Implementation) -> bool {
        implementation
            .components
            .iter()
            .all(|component| !component.metadata_flag(QUANTUM_FLAG))
    }
}
