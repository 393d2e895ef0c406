//! # Contract Transactions
//!
//! Builds signed procedure calls on the utility contract. SendToManyV1 is
//! the payout path; the burn procedure shares the same signing path.

use super::errors::{PaymentError, Result};
use super::recipients::{parse_recipients, ParsedRecipients, Recipient, MAX_RECIPIENTS};
use qp_01_wire_protocol::{
    contract_address, BurnQubicInput, MessageType, RequestResponseHeader, TransactionRecord,
    UtilProcedure, HEADER_SIZE, UTIL_CONTRACT_INDEX,
};
use serde::{Deserialize, Serialize};
use shared_crypto::{k12_32, tx_hash_from_digest, MessageSigner};
use shared_types::{ByteWriter, Hash, PublicKey, Signature, Tick, SIGNATURE_SIZE};
use tracing::{debug, info};

/// Payout transaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendToManyConfig {
    /// Ticks between the node's current tick and the scheduled tick.
    pub tick_lead: u32,
    /// Recipients accepted from one payout list.
    pub max_recipients: usize,
}

impl Default for SendToManyConfig {
    fn default() -> Self {
        Self {
            tick_lead: 10,
            max_recipients: MAX_RECIPIENTS,
        }
    }
}

/// Fixed 25-slot SendToManyV1 procedure input. Unused slots stay zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendToManyInput {
    addresses: [PublicKey; MAX_RECIPIENTS],
    amounts: [i64; MAX_RECIPIENTS],
    count: usize,
}

impl SendToManyInput {
    pub const SIZE: usize = MAX_RECIPIENTS * (32 + 8);

    pub fn from_recipients(recipients: &[Recipient]) -> Result<Self> {
        if recipients.len() > MAX_RECIPIENTS {
            return Err(PaymentError::TooManyRecipients {
                count: recipients.len(),
                max: MAX_RECIPIENTS,
            });
        }
        let mut input = Self {
            addresses: [[0u8; 32]; MAX_RECIPIENTS],
            amounts: [0i64; MAX_RECIPIENTS],
            count: recipients.len(),
        };
        for (slot, recipient) in recipients.iter().enumerate() {
            input.addresses[slot] = recipient.public_key;
            input.amounts[slot] = recipient.amount;
        }
        Ok(input)
    }

    /// Number of filled slots.
    pub fn recipient_count(&self) -> usize {
        self.count
    }

    pub fn addresses(&self) -> &[PublicKey; MAX_RECIPIENTS] {
        &self.addresses
    }

    pub fn amounts(&self) -> &[i64; MAX_RECIPIENTS] {
        &self.amounts
    }

    /// Sum of all slot amounts, `None` on overflow.
    pub fn total(&self) -> Option<i64> {
        self.amounts.iter().try_fold(0i64, |acc, a| acc.checked_add(*a))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(Self::SIZE);
        for address in &self.addresses {
            writer.put_bytes(address);
        }
        for amount in &self.amounts {
            writer.put_i64(*amount);
        }
        writer.into_inner()
    }
}

/// A signed transaction frame ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub record: TransactionRecord,
    pub signature: Signature,
    /// K12 digest of record, input and signature.
    pub digest: Hash,
    /// Lower-case rendering of `digest`.
    pub transaction_hash: String,
    frame: Vec<u8>,
}

impl SignedTransaction {
    /// Complete frame, header included.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn into_frame(self) -> Vec<u8> {
        self.frame
    }

    pub fn scheduled_tick(&self) -> Tick {
        self.record.tick
    }

    /// Caller-facing summary.
    pub fn result(&self) -> SendToManyResult {
        SendToManyResult {
            scheduled_tick: self.record.tick,
            transaction_hash: self.transaction_hash.clone(),
        }
    }
}

/// Outcome of a payout as reported to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendToManyResult {
    pub scheduled_tick: Tick,
    pub transaction_hash: String,
}

impl SendToManyResult {
    /// Zeroed result for a payout that did not go out.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_tick == 0 && self.transaction_hash.is_empty()
    }
}

/// Builds signed utility-contract transactions for one signer.
pub struct TransactionPacketBuilder<'a> {
    signer: &'a dyn MessageSigner,
    config: SendToManyConfig,
}

impl<'a> TransactionPacketBuilder<'a> {
    pub fn new(signer: &'a dyn MessageSigner, config: SendToManyConfig) -> Self {
        Self { signer, config }
    }

    pub fn config(&self) -> &SendToManyConfig {
        &self.config
    }

    /// Parse a payout list with this builder's recipient cap.
    pub fn parse(&self, csv: &str) -> ParsedRecipients {
        parse_recipients(csv, self.config.max_recipients.min(MAX_RECIPIENTS))
    }

    /// Parse `csv` and build the payout transaction.
    pub fn build_from_csv(&self, csv: &str, fee: i64, current_tick: Tick) -> Result<SignedTransaction> {
        let parsed = self.parse(csv);
        if !parsed.rejected.is_empty() {
            debug!(
                rejected = parsed.rejected.len(),
                "[qp-03] Payout list had skipped lines"
            );
        }
        self.build_send_to_many(&parsed.recipients, fee, current_tick)
    }

    /// Build a SendToManyV1 transaction paying `recipients`.
    ///
    /// # Errors
    ///
    /// `EmptyRecipientList` for an empty slice, `InvalidFee` for a negative
    /// fee, `AmountOverflow` when the debit does not fit i64.
    pub fn build_send_to_many(
        &self,
        recipients: &[Recipient],
        fee: i64,
        current_tick: Tick,
    ) -> Result<SignedTransaction> {
        if recipients.is_empty() {
            return Err(PaymentError::EmptyRecipientList);
        }
        if fee < 0 {
            return Err(PaymentError::InvalidFee(fee));
        }
        let input = SendToManyInput::from_recipients(recipients)?;
        let amount = input
            .total()
            .and_then(|sum| sum.checked_add(fee))
            .ok_or(PaymentError::AmountOverflow)?;

        let signed = self.sign_procedure(
            UtilProcedure::SendToManyV1,
            amount,
            current_tick,
            &input.encode(),
        )?;
        info!(
            recipients = input.recipient_count(),
            amount,
            tick = signed.record.tick,
            tx = %signed.transaction_hash,
            "[qp-03] Built SendToManyV1 transaction"
        );
        Ok(signed)
    }

    /// Build a burn transaction destroying `amount`.
    pub fn build_burn(&self, amount: i64, current_tick: Tick) -> Result<SignedTransaction> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(amount));
        }
        let input = BurnQubicInput { amount };
        self.sign_procedure(UtilProcedure::BurnQubic, amount, current_tick, &input.encode())
    }

    fn sign_procedure(
        &self,
        procedure: UtilProcedure,
        amount: i64,
        current_tick: Tick,
        input: &[u8],
    ) -> Result<SignedTransaction> {
        let tick = current_tick
            .checked_add(self.config.tick_lead)
            .ok_or(PaymentError::TickOverflow {
                current: current_tick,
                lead: self.config.tick_lead,
            })?;
        let input_size = u16::try_from(input.len()).map_err(|_| {
            qp_01_wire_protocol::ProtocolError::InputTooLarge { len: input.len() }
        })?;
        let record = TransactionRecord {
            source_public_key: self.signer.public_key(),
            destination_public_key: contract_address(UTIL_CONTRACT_INDEX),
            amount,
            tick,
            input_type: procedure as u16,
            input_size,
        };

        let body_len = TransactionRecord::SIZE + input.len();
        let header = RequestResponseHeader::for_payload(
            MessageType::BroadcastTransaction,
            body_len + SIGNATURE_SIZE,
            0,
        )?;

        let mut writer = ByteWriter::with_capacity(HEADER_SIZE + body_len + SIGNATURE_SIZE);
        header.encode_into(&mut writer);
        record.encode_into(&mut writer);
        writer.put_bytes(input);

        let signature = self.signer.sign(&writer.as_slice()[HEADER_SIZE..]);
        writer.put_bytes(&signature);

        let digest = k12_32(&writer.as_slice()[HEADER_SIZE..]);
        let transaction_hash = tx_hash_from_digest(&digest);

        Ok(SignedTransaction {
            record,
            signature,
            digest,
            transaction_hash,
            frame: writer.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::{public_key_to_identity, verify, IdentityCase, SeedKeyPair};
    use shared_types::ByteReader;

    const SEED: &str = "caaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaac";

    fn recipient(byte: u8, amount: i64) -> Recipient {
        Recipient {
            identity: public_key_to_identity(&[byte; 32], IdentityCase::Upper),
            public_key: [byte; 32],
            amount,
        }
    }

    #[test]
    fn test_input_size_and_zero_fill() {
        let input = SendToManyInput::from_recipients(&[recipient(1, 5)]).unwrap();
        let bytes = input.encode();
        assert_eq!(bytes.len(), 1000);
        assert_eq!(&bytes[..32], &[1u8; 32]);
        assert!(bytes[32..800].iter().all(|b| *b == 0));
        assert_eq!(&bytes[800..808], &5i64.to_le_bytes());
        assert!(bytes[808..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_send_to_many_frame() {
        let signer = SeedKeyPair::from_seed(SEED).unwrap();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let tx = builder
            .build_send_to_many(&[recipient(1, 100), recipient(2, 200)], 7, 1_000)
            .unwrap();

        assert_eq!(tx.record.amount, 307);
        assert_eq!(tx.record.tick, 1_010);
        assert_eq!(tx.record.input_type, 1);
        assert_eq!(tx.record.input_size, 1000);
        assert_eq!(tx.record.destination_public_key, contract_address(4));

        let frame = tx.frame();
        assert_eq!(frame.len(), 1152);
        let header = RequestResponseHeader::decode(frame).unwrap();
        assert_eq!(header.size(), 1152);
        assert_eq!(header.message_type(), 24);
        assert!(header.is_dejavu_zero());

        let decoded = TransactionRecord::decode(&mut ByteReader::new(&frame[8..88])).unwrap();
        assert_eq!(decoded, tx.record);
        verify(&signer.public_key(), &frame[8..1088], &tx.signature).unwrap();
        assert_eq!(&frame[1088..], &tx.signature[..]);
    }

    #[test]
    fn test_transaction_hash() {
        let signer = SeedKeyPair::from_seed(SEED).unwrap();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let tx = builder
            .build_send_to_many(&[recipient(1, 100)], 0, 50)
            .unwrap();
        assert_eq!(tx.digest, k12_32(&tx.frame()[8..]));
        assert_eq!(tx.transaction_hash.len(), 60);
        assert!(tx.transaction_hash.bytes().all(|c| c.is_ascii_lowercase()));
        assert_eq!(tx.result().scheduled_tick, 60);
    }

    #[test]
    fn test_empty_recipients_rejected() {
        let signer = SeedKeyPair::from_seed(SEED).unwrap();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        assert_eq!(
            builder.build_from_csv("garbage\n", 7, 1).unwrap_err(),
            PaymentError::EmptyRecipientList
        );
    }

    #[test]
    fn test_negative_fee_and_overflow() {
        let signer = SeedKeyPair::from_seed(SEED).unwrap();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        assert_eq!(
            builder
                .build_send_to_many(&[recipient(1, 1)], -1, 1)
                .unwrap_err(),
            PaymentError::InvalidFee(-1)
        );
        assert_eq!(
            builder
                .build_send_to_many(&[recipient(1, i64::MAX)], 1, 1)
                .unwrap_err(),
            PaymentError::AmountOverflow
        );
        assert!(matches!(
            builder.build_send_to_many(&[recipient(1, 1)], 0, u32::MAX),
            Err(PaymentError::TickOverflow { .. })
        ));
    }

    #[test]
    fn test_burn_transaction() {
        let signer = SeedKeyPair::from_seed(SEED).unwrap();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let tx = builder.build_burn(1_000_000, 20).unwrap();
        assert_eq!(tx.record.input_type, 2);
        assert_eq!(tx.record.input_size, 8);
        assert_eq!(tx.record.amount, 1_000_000);
        assert_eq!(tx.frame().len(), 8 + 80 + 8 + 64);
        assert_eq!(
            builder.build_burn(0, 20).unwrap_err(),
            PaymentError::InvalidAmount(0)
        );
    }

    #[test]
    fn test_empty_result() {
        assert!(SendToManyResult::empty().is_empty());
    }
}
