//! # Solution Crypto Service
//!
//! Implements `SolutionEncryptionApi` over a shared signer.

use crate::domain::errors::{Result, SolutionCryptoError};
use crate::domain::keystream::{KeystreamConfig, KeystreamDeriver};
use crate::domain::opener::{self, OpenedSolution};
use crate::domain::packet::{SolutionPacket, SolutionPacketBuilder, UnsignedSolutionPacket};
use crate::ports::inbound::SolutionEncryptionApi;
use shared_crypto::MessageSigner;
use shared_types::{PublicKey, ZERO_SECRET};
use std::sync::Arc;

/// Solution crypto service.
pub struct SolutionCryptoService {
    signer: Arc<dyn MessageSigner>,
    deriver: KeystreamDeriver,
}

impl SolutionCryptoService {
    pub fn new(signer: Arc<dyn MessageSigner>, config: KeystreamConfig) -> Self {
        Self {
            signer,
            deriver: KeystreamDeriver::new(config),
        }
    }

    fn builder(&self) -> SolutionPacketBuilder<'_> {
        SolutionPacketBuilder::new(self.signer.as_ref(), self.deriver)
    }
}

impl SolutionEncryptionApi for SolutionCryptoService {
    fn public_key(&self) -> PublicKey {
        self.signer.public_key()
    }

    fn build_solution_packet(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<SolutionPacket> {
        self.builder().build(destination, mining_seed, nonce)
    }

    fn prepare_unsigned(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<UnsignedSolutionPacket> {
        self.builder().prepare_unsigned(destination, mining_seed, nonce)
    }

    fn open_solution_packet(&self, packet: &[u8]) -> Result<OpenedSolution> {
        let destination = packet
            .get(40..72)
            .ok_or(SolutionCryptoError::InvalidPacketSize {
                expected: crate::SOLUTION_PACKET_SIZE,
                actual: packet.len(),
            })?;
        let own = self.signer.public_key();
        let secret = if destination == own.as_slice() {
            self.signer.shared_secret(&own)?
        } else {
            ZERO_SECRET
        };
        opener::open_solution_packet(packet, &secret)
    }
}
