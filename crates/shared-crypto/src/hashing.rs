//! # KangarooTwelve Hashing
//!
//! K12 is used as an extendable-output function: the same primitive produces
//! 3-byte identity checksums, 32-byte digests and 64-byte keystreams.
//! The customization string is always empty.

use shared_types::Hash;
use tiny_keccak::{Hasher, KangarooTwelve};

const NO_CUSTOMIZATION: &[u8] = &[];

/// Stateful K12 hasher.
pub struct K12Hasher {
    inner: KangarooTwelve<&'static [u8]>,
}

impl K12Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: KangarooTwelve::new(NO_CUSTOMIZATION),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Squeeze `output.len()` bytes.
    pub fn finalize_into(self, output: &mut [u8]) {
        self.inner.finalize(output);
    }

    /// Squeeze a 32-byte digest.
    pub fn finalize(self) -> Hash {
        let mut out = [0u8; 32];
        self.inner.finalize(&mut out);
        out
    }
}

impl Default for K12Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash `data` into `output`, filling it completely.
pub fn k12_into(data: &[u8], output: &mut [u8]) {
    let mut hasher = K12Hasher::new();
    hasher.update(data);
    hasher.finalize_into(output);
}

/// Hash `data` to `output_len` bytes.
pub fn k12(data: &[u8], output_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; output_len];
    k12_into(data, &mut out);
    out
}

/// Hash `data` to a 32-byte digest.
pub fn k12_32(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    k12_into(data, &mut out);
    out
}
