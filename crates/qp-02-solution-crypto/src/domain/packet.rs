//! # Solution Packet Builder

use super::errors::{Result, SolutionCryptoError};
use super::keystream::KeystreamDeriver;
use qp_01_wire_protocol::{BroadcastMessage, MessageType, RequestResponseHeader, HEADER_SIZE};
use rand::{CryptoRng, RngCore};
use shared_crypto::MessageSigner;
use shared_types::{to_array32, ByteWriter, Hash, PublicKey, Signature, SIGNATURE_SIZE, ZERO_SECRET};
use tracing::debug;

/// Header, message block and both masked fields.
pub const UNSIGNED_PACKET_SIZE: usize = HEADER_SIZE + BroadcastMessage::SIZE + 64;

/// Complete broadcast including the trailing signature.
pub const SOLUTION_PACKET_SIZE: usize = UNSIGNED_PACKET_SIZE + SIGNATURE_SIZE;

/// Byte range covered by the signature.
pub const SIGNED_REGION: std::ops::Range<usize> = HEADER_SIZE..UNSIGNED_PACKET_SIZE;

/// A solution packet awaiting its signature.
///
/// The header already declares the signed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedSolutionPacket {
    bytes: [u8; UNSIGNED_PACKET_SIZE],
}

impl UnsignedSolutionPacket {
    pub fn as_bytes(&self) -> &[u8; UNSIGNED_PACKET_SIZE] {
        &self.bytes
    }

    /// Bytes the signer must sign.
    pub fn signing_region(&self) -> &[u8] {
        &self.bytes[SIGNED_REGION]
    }

    pub fn gamming_nonce(&self) -> Hash {
        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&self.bytes[72..104]);
        nonce
    }

    /// Append a signature produced externally over [`Self::signing_region`].
    pub fn attach_signature(self, signature: &Signature) -> SolutionPacket {
        let mut bytes = Vec::with_capacity(SOLUTION_PACKET_SIZE);
        bytes.extend_from_slice(&self.bytes);
        bytes.extend_from_slice(signature);
        SolutionPacket { bytes }
    }
}

/// A signed, ready-to-send solution broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPacket {
    bytes: Vec<u8>,
}

impl SolutionPacket {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for SolutionPacket {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Builds solution broadcasts for one signer.
pub struct SolutionPacketBuilder<'a> {
    signer: &'a dyn MessageSigner,
    deriver: KeystreamDeriver,
}

impl<'a> SolutionPacketBuilder<'a> {
    pub fn new(signer: &'a dyn MessageSigner, deriver: KeystreamDeriver) -> Self {
        Self { signer, deriver }
    }

    /// Build and sign a packet using the operating system RNG.
    pub fn build(&self, destination: &[u8], mining_seed: &[u8], nonce: &[u8]) -> Result<SolutionPacket> {
        self.build_with(destination, mining_seed, nonce, &mut rand::rngs::OsRng)
    }

    pub fn build_with<R: RngCore + CryptoRng + ?Sized>(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
        rng: &mut R,
    ) -> Result<SolutionPacket> {
        let unsigned = self.prepare_unsigned_with(destination, mining_seed, nonce, rng)?;
        let signature = self.signer.sign(unsigned.signing_region());
        Ok(unsigned.attach_signature(&signature))
    }

    /// Build the masked packet without signing it.
    pub fn prepare_unsigned(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<UnsignedSolutionPacket> {
        self.prepare_unsigned_with(destination, mining_seed, nonce, &mut rand::rngs::OsRng)
    }

    /// # Errors
    ///
    /// `InvalidLength` when any argument is not 32 bytes, plus key-agreement
    /// and keystream failures.
    pub fn prepare_unsigned_with<R: RngCore + CryptoRng + ?Sized>(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
        rng: &mut R,
    ) -> Result<UnsignedSolutionPacket> {
        let destination: PublicKey = to_array32(destination)
            .map_err(|_| SolutionCryptoError::length("destination", 32, destination.len()))?;
        let mining_seed: Hash = to_array32(mining_seed)
            .map_err(|_| SolutionCryptoError::length("mining seed", 32, mining_seed.len()))?;
        let nonce: Hash =
            to_array32(nonce).map_err(|_| SolutionCryptoError::length("nonce", 32, nonce.len()))?;

        let source = self.signer.public_key();
        let shared_secret = if destination == source {
            self.signer.shared_secret(&destination)?
        } else {
            ZERO_SECRET
        };

        let (gamming_nonce, keystream) = self
            .deriver
            .derive_nonce_and_keystream_with(&shared_secret, rng)?;
        let (masked_seed, masked_nonce) = keystream.apply(&mining_seed, &nonce);

        let header = RequestResponseHeader::for_payload(
            MessageType::BroadcastMessage,
            SOLUTION_PACKET_SIZE - HEADER_SIZE,
            0,
        )?;
        let message = BroadcastMessage {
            source_public_key: source,
            destination_public_key: destination,
            gamming_nonce,
        };

        let mut writer = ByteWriter::with_capacity(UNSIGNED_PACKET_SIZE);
        header.encode_into(&mut writer);
        message.encode_into(&mut writer);
        writer.put_bytes(&masked_seed).put_bytes(&masked_nonce);

        let mut bytes = [0u8; UNSIGNED_PACKET_SIZE];
        bytes.copy_from_slice(writer.as_slice());

        debug!(
            encrypted = destination == source,
            "[qp-02] Prepared solution packet"
        );
        Ok(UnsignedSolutionPacket { bytes })
    }
}
