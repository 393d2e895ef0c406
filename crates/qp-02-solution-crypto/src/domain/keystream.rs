//! # Keystream Derivation
//!
//! Each call is independent and may run concurrently from any thread.

use super::errors::{Result, SolutionCryptoError};
use rand::{CryptoRng, RngCore};
use shared_crypto::{k12_32, k12_into};
use shared_types::{Hash, SharedSecret};
use tracing::trace;
use zeroize::Zeroize;

/// Keystream length: 32 bytes per masked field.
pub const KEYSTREAM_SIZE: usize = 64;

/// Limits for nonce rejection sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeystreamConfig {
    /// Nonces tried before giving up.
    pub max_attempts: u32,
}

impl Default for KeystreamConfig {
    fn default() -> Self {
        Self { max_attempts: 4096 }
    }
}

/// Intermediate key and the keystream expanded from it.
#[derive(Clone, PartialEq, Eq)]
pub struct Keystream {
    gamming_key: Hash,
    bytes: [u8; KEYSTREAM_SIZE],
}

impl Keystream {
    /// Derive the keystream for a fixed secret and nonce.
    pub fn derive(shared_secret: &SharedSecret, gamming_nonce: &Hash) -> Self {
        let gamming_key = gamming_key(shared_secret, gamming_nonce);
        let mut bytes = [0u8; KEYSTREAM_SIZE];
        k12_into(&gamming_key, &mut bytes);
        Self { gamming_key, bytes }
    }

    pub fn gamming_key(&self) -> &Hash {
        &self.gamming_key
    }

    pub fn as_bytes(&self) -> &[u8; KEYSTREAM_SIZE] {
        &self.bytes
    }

    /// A zero first byte marks the solution message sub-type.
    pub fn is_solution_type(&self) -> bool {
        self.gamming_key[0] == 0
    }

    /// Mask (or unmask) the two secret fields.
    pub fn apply(&self, mining_seed: &Hash, nonce: &Hash) -> (Hash, Hash) {
        apply_mask(mining_seed, nonce, &self.bytes)
    }
}

impl std::fmt::Debug for Keystream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keystream")
            .field("solution_type", &self.is_solution_type())
            .finish_non_exhaustive()
    }
}

impl Drop for Keystream {
    fn drop(&mut self) {
        self.gamming_key.zeroize();
        self.bytes.zeroize();
    }
}

/// `K12(shared_secret || gamming_nonce)` truncated to 32 bytes.
pub fn gamming_key(shared_secret: &SharedSecret, gamming_nonce: &Hash) -> Hash {
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(shared_secret);
    input[32..].copy_from_slice(gamming_nonce);
    let key = k12_32(&input);
    input.zeroize();
    key
}

/// XOR `mining_seed` with `keystream[0..32]` and `nonce` with `keystream[32..64]`.
pub fn apply_mask(mining_seed: &Hash, nonce: &Hash, keystream: &[u8; KEYSTREAM_SIZE]) -> (Hash, Hash) {
    let mut seed_out = [0u8; 32];
    let mut nonce_out = [0u8; 32];
    for i in 0..32 {
        seed_out[i] = mining_seed[i] ^ keystream[i];
        nonce_out[i] = nonce[i] ^ keystream[i + 32];
    }
    (seed_out, nonce_out)
}

/// Draws gamming nonces until one yields a solution-type gamming key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeystreamDeriver {
    config: KeystreamConfig,
}

impl KeystreamDeriver {
    pub fn new(config: KeystreamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeystreamConfig {
        &self.config
    }

    /// Derive with the operating system RNG.
    pub fn derive_nonce_and_keystream(&self, shared_secret: &SharedSecret) -> Result<(Hash, Keystream)> {
        self.derive_nonce_and_keystream_with(shared_secret, &mut rand::rngs::OsRng)
    }

    /// Derive with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// [`SolutionCryptoError::KeystreamExhausted`] when `max_attempts`
    /// nonces all produced a nonzero first gamming-key byte.
    pub fn derive_nonce_and_keystream_with<R: RngCore + CryptoRng + ?Sized>(
        &self,
        shared_secret: &SharedSecret,
        rng: &mut R,
    ) -> Result<(Hash, Keystream)> {
        let mut nonce = [0u8; 32];
        for attempt in 1..=self.config.max_attempts {
            rng.fill_bytes(&mut nonce);
            let keystream = Keystream::derive(shared_secret, &nonce);
            if keystream.is_solution_type() {
                trace!(attempt, "[qp-02] Gamming nonce accepted");
                return Ok((nonce, keystream));
            }
        }
        Err(SolutionCryptoError::KeystreamExhausted {
            attempts: self.config.max_attempts,
        })
    }
}
