//! # Solution Packet Opener
//!
//! Receiving side of a solution broadcast. The caller supplies the shared
//! secret; the all-zero secret opens packets that were not encrypted to the
//! signer's own key.

use super::errors::{Result, SolutionCryptoError};
use super::keystream::Keystream;
use super::packet::{SIGNED_REGION, SOLUTION_PACKET_SIZE};
use qp_01_wire_protocol::{
    BroadcastMessage, MessageType, ProtocolError, RequestResponseHeader, HEADER_SIZE,
};
use shared_crypto::verify;
use shared_types::{ByteReader, Hash, PublicKey, SharedSecret};

/// Plaintext view of a verified solution broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedSolution {
    pub source_public_key: PublicKey,
    pub destination_public_key: PublicKey,
    pub gamming_nonce: Hash,
    pub mining_seed: Hash,
    pub nonce: Hash,
}

/// Verify, re-derive and unmask a 232-byte solution broadcast.
pub fn open_solution_packet(packet: &[u8], shared_secret: &SharedSecret) -> Result<OpenedSolution> {
    if packet.len() != SOLUTION_PACKET_SIZE {
        return Err(SolutionCryptoError::InvalidPacketSize {
            expected: SOLUTION_PACKET_SIZE,
            actual: packet.len(),
        });
    }
    let header = RequestResponseHeader::decode(packet)?;
    if header.message_type() != MessageType::BroadcastMessage.as_u8() {
        return Err(ProtocolError::UnexpectedType {
            expected: MessageType::BroadcastMessage.as_u8(),
            actual: header.message_type(),
        }
        .into());
    }
    if header.size() != SOLUTION_PACKET_SIZE {
        return Err(SolutionCryptoError::InvalidPacketSize {
            expected: SOLUTION_PACKET_SIZE,
            actual: header.size(),
        });
    }

    let mut reader = ByteReader::new(&packet[HEADER_SIZE..]);
    let message = BroadcastMessage::decode(&mut reader)?;
    let masked_seed = reader.array32()?;
    let masked_nonce = reader.array32()?;
    let signature = reader.array64()?;

    verify(&message.source_public_key, &packet[SIGNED_REGION], &signature)?;

    let keystream = Keystream::derive(shared_secret, &message.gamming_nonce);
    if !keystream.is_solution_type() {
        return Err(SolutionCryptoError::NotSolutionMessage {
            first_byte: keystream.gamming_key()[0],
        });
    }
    let (mining_seed, nonce) = keystream.apply(&masked_seed, &masked_nonce);

    Ok(OpenedSolution {
        source_public_key: message.source_public_key,
        destination_public_key: message.destination_public_key,
        gamming_nonce: message.gamming_nonce,
        mining_seed,
        nonce,
    })
}
