//! # Domain Entities

use super::errors::{Result, VerificationError};
use serde::{Deserialize, Serialize};
use shared_crypto::{identity_to_public_key, K12Hasher};
use shared_types::{hex_to_array32, Hash, PublicKey};

/// A solution waiting to be scored.
///
/// Seed and nonce are hex strings as received from miners; they are decoded
/// when a worker picks the entry up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingSolution {
    pub mining_seed: String,
    pub nonce: String,
    pub identity: String,
    pub correlation_tag: String,
}

impl PendingSolution {
    /// Entry whose correlation tag is derived from its contents.
    pub fn new(
        mining_seed: impl Into<String>,
        nonce: impl Into<String>,
        identity: impl Into<String>,
    ) -> Self {
        let mining_seed = mining_seed.into();
        let nonce = nonce.into();
        let identity = identity.into();
        let correlation_tag = correlation_tag(&mining_seed, &nonce, &identity);
        Self {
            mining_seed,
            nonce,
            identity,
            correlation_tag,
        }
    }

    /// Entry with a caller-chosen correlation tag.
    pub fn with_tag(
        mining_seed: impl Into<String>,
        nonce: impl Into<String>,
        identity: impl Into<String>,
        correlation_tag: impl Into<String>,
    ) -> Self {
        Self {
            mining_seed: mining_seed.into(),
            nonce: nonce.into(),
            identity: identity.into(),
            correlation_tag: correlation_tag.into(),
        }
    }

    pub fn decode_mining_seed(&self) -> Result<Hash> {
        Ok(hex_to_array32(&self.mining_seed)?)
    }

    pub fn decode_nonce(&self) -> Result<Hash> {
        Ok(hex_to_array32(&self.nonce)?)
    }

    pub fn decode_public_key(&self) -> Result<PublicKey> {
        identity_to_public_key(&self.identity)
            .map_err(|e| VerificationError::InvalidIdentity(e.to_string()))
    }
}

/// 32 hex characters of `K12(seed || nonce || identity)`.
fn correlation_tag(mining_seed: &str, nonce: &str, identity: &str) -> String {
    let mut hasher = K12Hasher::new();
    hasher
        .update(mining_seed.as_bytes())
        .update(nonce.as_bytes())
        .update(identity.as_bytes());
    let mut digest = [0u8; 16];
    hasher.finalize_into(&mut digest);
    hex::encode(digest)
}

/// Outcome of scoring one pending solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub correlation_tag: String,
    pub score: u32,
    pub is_valid: bool,
}
