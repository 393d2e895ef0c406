//! # Shared Crypto - Protocol Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | KangarooTwelve (XOF) | Keystreams, digests, checksums |
//! | `signatures` | Ed25519 over K12 digests | Packet signing |
//! | `signatures` | X25519 on the Montgomery form | Shared secrets |
//! | `identity` | Base-26 with K12 checksum | Human-readable keys and tx hashes |
//!
//! ## Security Properties
//!
//! - **K12**: one XOF for every digest width, no length-extension
//! - **Ed25519**: deterministic nonces, no RNG dependency when signing
//! - Secret material is zeroized when key pairs are dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod identity;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{k12, k12_32, k12_into, K12Hasher};
pub use identity::{
    identity_to_public_key, public_key_to_identity, tx_hash_from_digest, IdentityCase,
    IDENTITY_LENGTH,
};
pub use signatures::{verify, MessageSigner, SeedKeyPair, SEED_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
