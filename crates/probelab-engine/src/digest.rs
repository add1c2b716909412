//! Digest computation and bucket index derivation.
//!
//! The primary digest is the leading 4 bytes (8 hex characters) of the
//! SHA-256 hash of the input. It doubles as the stored item identifier
//! and as the source of the initial bucket index.

use sha2::{Digest as _, Sha256};

/// An 8-hex-character digest (the leading 4 bytes of SHA-256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 4]);

impl Digest {
    /// Compute the digest of an input.
    pub fn compute(input: &[u8]) -> Self {
        let hash = Sha256::digest(input);
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&hash[..4]);
        Self(prefix)
    }

    /// Create a digest from raw bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Convert to hex string (8 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Interpret the digest as a big-endian u32 (for bucket mapping).
    pub fn prefix_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Map this digest to a bucket index.
    ///
    /// The index wraps around the table size, so it is always in
    /// `[0, node_count)`.
    pub fn initial_index(&self, node_count: usize) -> usize {
        if node_count == 0 {
            return 0;
        }
        self.prefix_u32() as usize % node_count
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Derive the double-hashing stride for an input.
///
/// Mixes the leading 32 bits of two independent digest algorithms
/// (SHA-256 and Blake3) via XOR, then reduces into `[2, node_count - 1]`.
/// Step 0 would loop forever and step 1 degenerates to linear probing,
/// so both are excluded by construction. Deterministic per input.
pub fn step_size(input: &[u8], node_count: usize) -> usize {
    let sha = Sha256::digest(input);
    let b3 = blake3::hash(input);
    let lead_sha = u32::from_be_bytes(sha[..4].try_into().unwrap());
    let lead_b3 = u32::from_be_bytes(b3.as_bytes()[..4].try_into().unwrap());
    let mixed = (lead_sha ^ lead_b3) as usize;
    let span = node_count.saturating_sub(2).max(1);
    2 + mixed % span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_deterministic() {
        let d1 = Digest::compute(b"hello");
        let d2 = Digest::compute(b"hello");
        assert_eq!(d1, d2);
        assert_eq!(d1.to_hex(), d2.to_hex());
    }

    #[test]
    fn digest_different_inputs() {
        let d1 = Digest::compute(b"hello");
        let d2 = Digest::compute(b"world");
        assert_ne!(d1, d2);
    }

    #[test]
    fn digest_hex_is_8_chars() {
        let d = Digest::compute(b"anything at all");
        assert_eq!(d.to_hex().len(), 8);
    }

    #[test]
    fn known_sha256_prefix() {
        // SHA-256("hello") = 2cf24dba5fb0a30e26e83b2ac5b9e29e...
        let d = Digest::compute(b"hello");
        assert_eq!(d.to_hex(), "2cf24dba");
    }

    #[test]
    fn initial_index_within_bounds() {
        for i in 0..200 {
            let d = Digest::compute(format!("input-{i}").as_bytes());
            for size in [1, 4, 7, 100] {
                assert!(d.initial_index(size) < size);
            }
        }
    }

    #[test]
    fn initial_index_matches_prefix_reduction() {
        let d = Digest::compute(b"hello");
        assert_eq!(d.initial_index(4), d.prefix_u32() as usize % 4);
    }

    #[test]
    fn step_size_within_bounds() {
        for i in 0..200 {
            let input = format!("input-{i}");
            for size in [3, 4, 10, 100] {
                let step = step_size(input.as_bytes(), size);
                assert!(step >= 2, "step {step} below 2 for size {size}");
                assert!(step <= size - 1, "step {step} too large for size {size}");
            }
        }
    }

    #[test]
    fn step_size_deterministic() {
        let s1 = step_size(b"hello", 10);
        let s2 = step_size(b"hello", 10);
        assert_eq!(s1, s2);
    }
}
