//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::Result;
use crate::domain::opener::OpenedSolution;
use crate::domain::packet::{SolutionPacket, UnsignedSolutionPacket};
use shared_types::PublicKey;

/// Solution encryption API bound to one signing identity.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SolutionEncryptionApi: Send + Sync {
    /// Public key that signs outgoing packets.
    fn public_key(&self) -> PublicKey;

    /// Mask, sign and frame a solution for `destination`.
    fn build_solution_packet(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<SolutionPacket>;

    /// Mask and frame a solution, leaving signing to the caller.
    fn prepare_unsigned(
        &self,
        destination: &[u8],
        mining_seed: &[u8],
        nonce: &[u8],
    ) -> Result<UnsignedSolutionPacket>;

    /// Verify and unmask a received solution broadcast.
    fn open_solution_packet(&self, packet: &[u8]) -> Result<OpenedSolution>;
}
