//! Deterministic embedding-witness identifiers.
//!
//! Two engines producing the same total assignment MUST produce the
//! same witness ID, so downstream consumers (visualizers, caches) can
//! deduplicate verdicts.
//!
//! Algorithm:
//! 1. Serialize the assignment map to canonical JSON (BTreeMap keys are
//!    already sorted; compact form has no insignificant whitespace)
//! 2. witnessId = "e1_" || hex_lower(SHA256(bytes))

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Schema prefix for embedding witnesses, version 1.
const WITNESS_PREFIX: &str = "e1_";

/// Compute the witness ID for a total assignment of FPO elements to
/// spacetime points.
pub fn compute_witness_id(assignment: &BTreeMap<String, String>) -> String {
    let canonical =
        serde_json::to_string(assignment).expect("string-to-string map must serialize");
    let hash = Sha256::digest(canonical.as_bytes());
    let mut encoded = String::with_capacity(WITNESS_PREFIX.len() + hash.len() * 2);
    encoded.push_str(WITNESS_PREFIX);
    for byte in hash {
        encoded.push_str(&format!("{byte:02x}"));
    }
    encoded
}
