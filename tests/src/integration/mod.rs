//! Cross-crate integration scenarios.

pub mod payment_flow;
pub mod solution_flow;
pub mod verification_flow;
pub mod wire_properties;

/// Shared fixtures.
#[cfg(test)]
pub(crate) mod fixtures {
    use shared_crypto::{public_key_to_identity, IdentityCase, MessageSigner, SeedKeyPair};

    pub const POOL_SEED: &str = "caaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaac";
    pub const MINER_SEED: &str = "mmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmmm";

    pub fn pool_signer() -> SeedKeyPair {
        SeedKeyPair::from_seed(POOL_SEED).unwrap()
    }

    pub fn miner_signer() -> SeedKeyPair {
        SeedKeyPair::from_seed(MINER_SEED).unwrap()
    }

    /// Identity of a freshly generated key.
    pub fn random_identity() -> String {
        public_key_to_identity(&SeedKeyPair::generate().public_key(), IdentityCase::Upper)
    }
}
