//! # Recipient Lists
//!
//! Payout lists arrive as newline-delimited `IDENTITY,AMOUNT` text. Lines
//! that are malformed, carry a non-positive amount or fail identity
//! decoding are skipped without aborting the rest of the batch.

use shared_crypto::{identity_to_public_key, IDENTITY_LENGTH};
use shared_types::PublicKey;
use tracing::debug;

/// Recipient slots in a SendToManyV1 input.
pub const MAX_RECIPIENTS: usize = 25;

/// One accepted payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub identity: String,
    pub public_key: PublicKey,
    pub amount: i64,
}

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    MissingSeparator,
    IdentityLength(usize),
    InvalidAmount(String),
    NonPositiveAmount(i64),
    InvalidIdentity(String),
}

/// A skipped input line (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: usize,
    pub reason: RejectionReason,
}

/// Outcome of parsing a payout list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecipients {
    pub recipients: Vec<Recipient>,
    pub rejected: Vec<RejectedLine>,
    /// Set when lines remained after the recipient cap was reached.
    pub truncated: bool,
}

impl ParsedRecipients {
    /// Sum of accepted amounts, `None` on overflow.
    pub fn total(&self) -> Option<i64> {
        self.recipients
            .iter()
            .try_fold(0i64, |acc, r| acc.checked_add(r.amount))
    }
}

/// Parse up to `max` recipients from `text`.
pub fn parse_recipients(text: &str, max: usize) -> ParsedRecipients {
    let mut parsed = ParsedRecipients::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if parsed.recipients.len() >= max {
            parsed.truncated = true;
            break;
        }
        match parse_line(line) {
            Ok(recipient) => parsed.recipients.push(recipient),
            Err(reason) => {
                debug!(line = index + 1, ?reason, "[qp-03] Skipping payout line");
                parsed.rejected.push(RejectedLine {
                    line: index + 1,
                    reason,
                });
            }
        }
    }
    parsed
}

fn parse_line(line: &str) -> Result<Recipient, RejectionReason> {
    let (identity, amount) = line
        .split_once(',')
        .ok_or(RejectionReason::MissingSeparator)?;
    let identity = identity.trim();
    let amount = amount.trim();

    if identity.len() != IDENTITY_LENGTH {
        return Err(RejectionReason::IdentityLength(identity.len()));
    }
    let amount: i64 = amount
        .parse()
        .map_err(|_| RejectionReason::InvalidAmount(amount.to_string()))?;
    if amount <= 0 {
        return Err(RejectionReason::NonPositiveAmount(amount));
    }
    let public_key = identity_to_public_key(identity)
        .map_err(|e| RejectionReason::InvalidIdentity(e.to_string()))?;

    Ok(Recipient {
        identity: identity.to_string(),
        public_key,
        amount,
    })
}
