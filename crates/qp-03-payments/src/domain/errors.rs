//! # Payment Errors

use qp_01_wire_protocol::ProtocolError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for payment operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors raised while building payment transactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// No recipient line survived parsing
    #[error("No valid recipients in payment list")]
    EmptyRecipientList,

    /// More recipients than the procedure input holds
    #[error("Too many recipients: {count} exceeds {max}")]
    TooManyRecipients { count: usize, max: usize },

    /// Node reported a negative fee
    #[error("Invalid fee: {0}")]
    InvalidFee(i64),

    /// Amount must be positive
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Amount sum does not fit i64
    #[error("Total amount overflows")]
    AmountOverflow,

    /// Scheduled tick does not fit u32
    #[error("Tick overflow: {current} + {lead}")]
    TickOverflow { current: u32, lead: u32 },

    /// Signing failure
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Framing failure
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
