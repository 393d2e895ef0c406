//! # Payments Subsystem (QP-03)
//!
//! Payouts are sent as one `SendToManyV1` procedure call on the utility
//! contract: up to 25 recipients per transaction, each with its own amount.
//!
//! ## Transaction Frame (1152 bytes)
//!
//! ```text
//! header (8) | transaction record (80) | SendToManyV1 input (1000) | signature (64)
//! ```
//!
//! - `record.amount` = sum of recipient amounts + contract fee
//! - `record.tick` = current tick + 10
//! - signature over `K12(record || input)`
//! - transaction hash = lower-case identity of `K12(record || input || signature)`

pub mod domain;

pub use domain::errors::{PaymentError, Result};
pub use domain::recipients::{
    parse_recipients, ParsedRecipients, Recipient, RejectedLine, RejectionReason,
    MAX_RECIPIENTS,
};
pub use domain::transaction::{
    SendToManyConfig, SendToManyInput, SendToManyResult, SignedTransaction,
    TransactionPacketBuilder,
};
