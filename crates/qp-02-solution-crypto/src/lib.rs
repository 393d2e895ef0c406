//! # Solution Crypto Subsystem (QP-02)
//!
//! Builds and opens solution broadcasts: a 96-byte message block, the
//! solution's mining seed and nonce masked with a K12 keystream, and an
//! Ed25519 signature over everything between header and signature.
//!
//! ## Packet Layout (232 bytes)
//!
//! ```text
//! [0..8)     header        type = 1, dejavu = 0, size = 232
//! [8..40)    source public key
//! [40..72)   destination public key
//! [72..104)  gamming nonce
//! [104..136) mining seed  ^ keystream[0..32]
//! [136..168) solution nonce ^ keystream[32..64]
//! [168..232) signature over bytes [8..168)
//! ```
//!
//! ## Keystream
//!
//! `gammingKey = K12(sharedSecret || gammingNonce)[..32]`, retried with a new
//! nonce until `gammingKey[0] == 0` (the solution message sub-type), then
//! `keystream = K12(gammingKey)[..64]`. The shared secret is all zero unless
//! the solution is addressed to the signer's own key.
//!
//! ## Architecture
//!
//! - `domain/keystream.rs`: bounded rejection-sampling deriver
//! - `domain/packet.rs`: packet builder, unsigned packets, signature attach
//! - `domain/opener.rs`: receiving side (verify, re-derive, unmask)
//! - `ports/inbound.rs`: `SolutionEncryptionApi`
//! - `service.rs`: service bound to one signer

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::{Result, SolutionCryptoError};
pub use domain::keystream::{
    apply_mask, gamming_key, Keystream, KeystreamConfig, KeystreamDeriver, KEYSTREAM_SIZE,
};
pub use domain::opener::{open_solution_packet, OpenedSolution};
pub use domain::packet::{
    SolutionPacket, SolutionPacketBuilder, UnsignedSolutionPacket, SIGNED_REGION,
    SOLUTION_PACKET_SIZE, UNSIGNED_PACKET_SIZE,
};
pub use ports::inbound::SolutionEncryptionApi;
pub use service::SolutionCryptoService;
