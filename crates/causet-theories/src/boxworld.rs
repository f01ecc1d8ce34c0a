//! Box-world: supernonlocal correlations (PR boxes) are admitted.

use causet_kernel::{Implementation, Theory};

/// Box-world admits every implementation, including PR-box style
/// components stronger than any quantum correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxWorldTheory;

impl Theory for BoxWorldTheory {
    fn name(&self) -> &str {
        "BoxWorld (supernonlocal)"
    }
}
