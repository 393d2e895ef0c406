//! # Core Wire Entities
//!
//! Fixed-width byte arrays that cross subsystem boundaries.

/// A 32-byte public key.
pub type PublicKey = [u8; 32];

/// A 32-byte digest (K12 output truncated to 32 bytes).
pub type Hash = [u8; 32];

/// A 64-byte detached signature.
pub type Signature = [u8; 64];

/// A 32-byte secret produced by key agreement (or the all-zero sentinel).
pub type SharedSecret = [u8; 32];

/// The network's discrete logical time unit.
pub type Tick = u32;

/// Length of a public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Length of a digest in bytes.
pub const HASH_SIZE: usize = 32;

/// Length of a signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// All-zero shared secret used when a message is not encrypted to a peer.
pub const ZERO_SECRET: SharedSecret = [0u8; 32];

/// Convert a slice into a fixed 32-byte array.
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidLength`] when `bytes` is not exactly 32 bytes.
pub fn to_array32(bytes: &[u8]) -> Result<[u8; 32], crate::CodecError> {
    bytes
        .try_into()
        .map_err(|_| crate::CodecError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })
}

/// Decode a 64-character hex string into 32 bytes.
///
/// # Errors
///
/// Returns [`crate::CodecError::InvalidHex`] for non-hex input and
/// [`crate::CodecError::InvalidLength`] when the decoded value is not 32 bytes.
pub fn hex_to_array32(text: &str) -> Result<[u8; 32], crate::CodecError> {
    let bytes = hex::decode(text).map_err(|e| crate::CodecError::InvalidHex(e.to_string()))?;
    to_array32(&bytes)
}
