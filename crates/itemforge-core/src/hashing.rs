//! Process-stable hashing.
//!
//! All reproducible randomness is derived from SHA-256 over explicit inputs.
//! `std`'s default hasher is randomly keyed per process and must never feed
//! the generation or agent paths.

use sha2::{Digest, Sha256};

/// Separator fed between hashed parts so `("ab", "c")` and `("a", "bc")` differ.
const PART_SEPARATOR: u8 = 0x1f;

fn digest_parts(parts: &[&str]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([PART_SEPARATOR]);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Derive a `u64` from the first eight bytes of SHA-256 over `parts`.
pub fn stable_u64(parts: &[&str]) -> u64 {
    let digest = digest_parts(parts);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Fixed-length (16 hex chars) fingerprint of a stem.
pub fn stem_hash(stem: &str) -> String {
    let digest = Sha256::digest(stem.as_bytes());
    hex::encode(&digest[..8])
}

/// Stable item identifier for a (skill, difficulty, seed) request.
pub fn item_id(skill_id: &str, difficulty: &str, seed: u64) -> String {
    let seed = seed.to_string();
    let digest = digest_parts(&[skill_id, difficulty, &seed]);
    format!("itm-{}", hex::encode(&digest[..6]))
}
