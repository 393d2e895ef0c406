//! # Node Client Errors

use qp_01_wire_protocol::ProtocolError;
use qp_02_solution_crypto::SolutionCryptoError;
use qp_03_payments::PaymentError;
use thiserror::Error;

/// Result type alias for node client operations
pub type Result<T> = std::result::Result<T, NodeClientError>;

/// Errors raised by transports and request flows.
#[derive(Debug, Error)]
pub enum NodeClientError {
    /// TCP connect failed or timed out
    #[error("Failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    /// Socket read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Write did not finish in time
    #[error("Send timed out")]
    SendTimeout,

    /// Every send attempt failed
    #[error("Send failed after {attempts} attempts")]
    SendFailed { attempts: u32 },

    /// Nothing arrived where a response was expected
    #[error("No response from node")]
    NoResponse,

    /// Frame ended before its declared size
    #[error("Incomplete frame: missing {missing} of {expected} bytes")]
    IncompleteFrame { missing: usize, expected: usize },

    /// Response carries another request's correlation id
    #[error("Dejavu mismatch: sent {expected}, response carries {actual}")]
    DejavuMismatch { expected: u32, actual: u32 },

    /// Contract function returned an empty output
    #[error("Contract function {input_type} on contract {contract_index} failed")]
    ContractCallFailed { contract_index: u32, input_type: u16 },

    /// Malformed or unexpected frame
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Solution packet could not be built
    #[error("Solution error: {0}")]
    Solution(#[from] SolutionCryptoError),

    /// Payment transaction could not be built
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),
}
