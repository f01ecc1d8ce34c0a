//! The admissibility contract for physical theories.
//!
//! A theory decides which implementations are structurally admissible.
//! The kernel never branches on theory identity — only on the boolean
//! verdict — so new theories plug in by implementing this one trait.

use crate::process::Implementation;

/// An admissibility predicate over implementations.
///
/// Implementations of this trait must be pure: no side effects, no
/// state across calls, and always terminating. The default verdict
/// admits everything; restrictive theories override it.
pub trait Theory {
    /// Name of this theory (for diagnostics).
    fn name(&self) -> &str;

    /// Whether this theory admits the given implementation.
    fn allows_implementation(&self, implementation: &Implementation) -> bool {
        let _ = implementation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fpo::FramedPartialOrder;
    use crate::process::Process;

    struct Anything;

    impl Theory for Anything {
        fn name(&self) -> &str {
            "anything goes"
        }
    }

    #[test]
    fn default_verdict_admits_everything() {
        let process = Process::new("p", ["in"], ["out"]);
        let fpo = FramedPartialOrder::new(["in"], ["out"]);
        let implementation = Implementation::new(process, fpo);
        assert!(Anything.allows_implementation(&implementation));
    }
}
