//! # Seed-Derived Signatures
//!
//! A participant's secret is a 55-letter lowercase seed. Keys are derived as:
//!
//! ```text
//! seed (a..z -> 0..25) --K12--> subseed --K12--> private key --Ed25519--> public key
//! ```
//!
//! Messages are never signed directly: the signer first reduces the message to
//! a 32-byte K12 digest and signs the digest.

use crate::hashing::k12_32;
use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use shared_types::{PublicKey, SharedSecret, Signature};
use zeroize::Zeroize;

/// Number of letters in a secret seed.
pub const SEED_LENGTH: usize = 55;

/// Signing and key-agreement capability consumed by the packet builders.
///
/// Implementations hold the secret material; callers only ever see public
/// keys, signatures and derived shared secrets.
pub trait MessageSigner: Send + Sync {
    /// Public key matching the signing secret.
    fn public_key(&self) -> PublicKey;

    /// Sign `message` (the implementation digests it first).
    fn sign(&self, message: &[u8]) -> Signature;

    /// Diffie-Hellman shared secret with `peer`.
    fn shared_secret(&self, peer: &PublicKey) -> Result<SharedSecret, CryptoError>;
}

/// Key pair derived from a 55-letter secret seed.
pub struct SeedKeyPair {
    signing_key: SigningKey,
}

impl SeedKeyPair {
    /// Derive the key pair from a secret seed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSeed`] unless `seed` is exactly 55 ASCII
    /// lowercase letters.
    pub fn from_seed(seed: &str) -> Result<Self, CryptoError> {
        if seed.len() != SEED_LENGTH {
            return Err(CryptoError::InvalidSeed(format!(
                "expected {} letters, got {}",
                SEED_LENGTH,
                seed.len()
            )));
        }
        if !seed.bytes().all(|c| c.is_ascii_lowercase()) {
            return Err(CryptoError::InvalidSeed(
                "seed must contain only a-z".to_string(),
            ));
        }

        let mut letters: Vec<u8> = seed.bytes().map(|c| c - b'a').collect();
        let mut subseed = k12_32(&letters);
        let mut private_key = k12_32(&subseed);
        let signing_key = SigningKey::from_bytes(&private_key);

        letters.zeroize();
        subseed.zeroize();
        private_key.zeroize();

        Ok(Self { signing_key })
    }

    /// Create from raw 32-byte private key material.
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&private_key),
        }
    }

    /// Generate a random key pair (tests and tooling).
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }
}

impl MessageSigner for SeedKeyPair {
    fn public_key(&self) -> PublicKey {
        self.signing_key.verifying_key().to_bytes()
    }

    fn sign(&self, message: &[u8]) -> Signature {
        let digest = k12_32(message);
        self.signing_key.sign(&digest).to_bytes()
    }

    fn shared_secret(&self, peer: &PublicKey) -> Result<SharedSecret, CryptoError> {
        let peer = VerifyingKey::from_bytes(peer).map_err(|_| CryptoError::InvalidPublicKey)?;
        let shared = peer.to_montgomery() * self.signing_key.to_scalar();
        Ok(shared.to_bytes())
    }
}

impl std::fmt::Debug for SeedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedKeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Verify a signature produced by [`MessageSigner::sign`].
///
/// # Errors
///
/// [`CryptoError::InvalidPublicKey`] for a key that is not a curve point,
/// [`CryptoError::SignatureVerificationFailed`] for a bad signature.
pub fn verify(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    let digest = k12_32(message);

    verifying_key
        .verify(&digest, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}
