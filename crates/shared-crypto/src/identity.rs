//! # Identity Codec
//!
//! A 32-byte public key is shown to humans as 60 letters:
//!
//! - 56 letters: the key as four little-endian `u64` chunks, each written as
//!   14 base-26 digits, least significant first;
//! - 4 letters: an 18-bit checksum taken from a 3-byte K12 digest of the key.
//!
//! Identities use upper case. Transaction hashes reuse the same encoding in
//! lower case.

use crate::hashing::k12_into;
use crate::CryptoError;
use shared_types::{Hash, PublicKey};

/// Total identity length in characters.
pub const IDENTITY_LENGTH: usize = 60;

const CHUNK_LETTERS: usize = 14;
const BODY_LENGTH: usize = 4 * CHUNK_LETTERS;
const CHECKSUM_MASK: u32 = 0x3FFFF;

/// Letter case of an encoded identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityCase {
    /// `A..Z`, used for public keys.
    Upper,
    /// `a..z`, used for transaction hashes.
    Lower,
}

impl IdentityCase {
    fn base(self) -> u8 {
        match self {
            IdentityCase::Upper => b'A',
            IdentityCase::Lower => b'a',
        }
    }
}

fn checksum(key: &[u8; 32]) -> u32 {
    let mut digest = [0u8; 3];
    k12_into(key, &mut digest);
    u32::from_le_bytes([digest[0], digest[1], digest[2], 0]) & CHECKSUM_MASK
}

/// Encode a public key (or digest) as a 60-letter identity.
pub fn public_key_to_identity(key: &PublicKey, case: IdentityCase) -> String {
    let base = case.base();
    let mut out = Vec::with_capacity(IDENTITY_LENGTH);

    for chunk in key.chunks_exact(8) {
        let mut fragment = u64::from_le_bytes(chunk.try_into().unwrap_or([0u8; 8]));
        for _ in 0..CHUNK_LETTERS {
            out.push(base + (fragment % 26) as u8);
            fragment /= 26;
        }
    }

    let mut sum = checksum(key);
    for _ in 0..4 {
        out.push(base + (sum % 26) as u8);
        sum /= 26;
    }

    out.into_iter().map(char::from).collect()
}

/// Decode an upper-case identity back to its public key.
///
/// The checksum suffix is recomputed and compared.
///
/// # Errors
///
/// [`CryptoError::InvalidIdentity`] for a wrong length or a character outside
/// `A..Z`; [`CryptoError::ChecksumMismatch`] when the suffix does not match.
pub fn identity_to_public_key(identity: &str) -> Result<PublicKey, CryptoError> {
    decode(identity, IdentityCase::Upper)
}

/// Render a 32-byte transaction digest as a lower-case transaction hash.
pub fn tx_hash_from_digest(digest: &Hash) -> String {
    public_key_to_identity(digest, IdentityCase::Lower)
}

fn decode(text: &str, case: IdentityCase) -> Result<[u8; 32], CryptoError> {
    let bytes = text.as_bytes();
    if bytes.len() != IDENTITY_LENGTH {
        return Err(CryptoError::InvalidIdentity(format!(
            "expected {} characters, got {}",
            IDENTITY_LENGTH,
            bytes.len()
        )));
    }

    let base = case.base();
    let digit = |c: u8| -> Result<u64, CryptoError> {
        if (base..base + 26).contains(&c) {
            Ok(u64::from(c - base))
        } else {
            Err(CryptoError::InvalidIdentity(format!(
                "unexpected character {:?}",
                char::from(c)
            )))
        }
    };

    let mut key = [0u8; 32];
    for (i, out) in key.chunks_exact_mut(8).enumerate() {
        let letters = &bytes[i * CHUNK_LETTERS..(i + 1) * CHUNK_LETTERS];
        // 26^14 exceeds u64; wrapping arithmetic mirrors the encoder's modulus.
        let mut fragment = 0u64;
        for &c in letters.iter().rev() {
            fragment = fragment.wrapping_mul(26).wrapping_add(digit(c)?);
        }
        out.copy_from_slice(&fragment.to_le_bytes());
    }

    let mut sum = 0u32;
    for &c in bytes[BODY_LENGTH..].iter().rev() {
        sum = sum * 26 + digit(c)? as u32;
    }
    if sum != checksum(&key) {
        return Err(CryptoError::ChecksumMismatch);
    }

    Ok(key)
}
