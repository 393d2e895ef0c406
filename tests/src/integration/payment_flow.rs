//! # Payment Flow
//!
//! Payout list parsing, SendToManyV1 construction and broadcast through
//! the node client:
//!
//! 1. CSV → recipients (malformed lines skipped, not fatal)
//! 2. Recipients + fee → signed 1152-byte transaction
//! 3. Fee query → build → send over a scripted transport

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{pool_signer, random_identity};

    use qp_01_wire_protocol::{MessageType, RequestResponseHeader, TransactionRecord, HEADER_SIZE};
    use qp_03_payments::{
        PaymentError, RejectionReason, SendToManyConfig, TransactionPacketBuilder, MAX_RECIPIENTS,
    };
    use qp_05_node_client::{MockTransport, NodeClient, NodeClientConfig, RetryPolicy};
    use shared_crypto::{identity_to_public_key, verify, MessageSigner};
    use shared_types::{ByteReader, ByteWriter};

    const INPUT_OFFSET: usize = HEADER_SIZE + TransactionRecord::SIZE;
    const AMOUNTS_OFFSET: usize = INPUT_OFFSET + MAX_RECIPIENTS * 32;
    const SIGNATURE_OFFSET: usize = AMOUNTS_OFFSET + MAX_RECIPIENTS * 8;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn amounts(frame: &[u8]) -> Vec<i64> {
        let mut reader = ByteReader::new(&frame[AMOUNTS_OFFSET..SIGNATURE_OFFSET]);
        (0..MAX_RECIPIENTS).map(|_| reader.i64().unwrap()).collect()
    }

    fn fee_frame(fee: i64, dejavu: u32) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        RequestResponseHeader::for_payload(MessageType::RespondContractFunction, 8, dejavu)
            .unwrap()
            .encode_into(&mut writer);
        writer.put_i64(fee);
        writer.into_inner()
    }

    /// Transport whose node echoes the fee request's dejavu.
    fn fee_answering_transport(fee: i64) -> MockTransport {
        let mut transport = MockTransport::new();
        transport.respond_with(move |sent| {
            let header = RequestResponseHeader::decode(sent).ok()?;
            (header.message_type() == MessageType::RequestContractFunction.as_u8())
                .then(|| fee_frame(fee, header.dejavu()))
        });
        transport
    }

    fn fast_config() -> NodeClientConfig {
        NodeClientConfig {
            send_retry: RetryPolicy {
                max_retries: 1,
                backoff_ms: 1,
            },
            ..NodeClientConfig::default()
        }
    }

    // =============================================================================
    // TRANSACTION CONSTRUCTION
    // =============================================================================

    #[test]
    fn test_two_recipient_payment_includes_fee() {
        let signer = pool_signer();
        let first = random_identity();
        let second = random_identity();
        let csv = format!("{first},100\n{second},200\n");

        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let tx = builder.build_from_csv(&csv, 7, 1_000).unwrap();
        let frame = tx.frame();

        assert_eq!(tx.record.amount, 307);
        assert_eq!(tx.scheduled_tick(), 1_010);
        assert_eq!(frame.len(), 1152);

        // Recipient slots: two filled, the rest zero
        assert_eq!(
            &frame[INPUT_OFFSET..INPUT_OFFSET + 32],
            &identity_to_public_key(&first).unwrap()
        );
        assert_eq!(
            &frame[INPUT_OFFSET + 32..INPUT_OFFSET + 64],
            &identity_to_public_key(&second).unwrap()
        );
        assert!(frame[INPUT_OFFSET + 64..AMOUNTS_OFFSET].iter().all(|&b| b == 0));

        let amounts = amounts(frame);
        assert_eq!(&amounts[..2], &[100, 200]);
        assert!(amounts[2..].iter().all(|&a| a == 0));

        // Signature covers record and input
        let signature: [u8; 64] = frame[SIGNATURE_OFFSET..].try_into().unwrap();
        verify(
            &signer.public_key(),
            &frame[HEADER_SIZE..SIGNATURE_OFFSET],
            &signature,
        )
        .unwrap();
    }

    #[test]
    fn test_short_identity_excluded_from_batch() {
        let signer = pool_signer();
        let valid_a = random_identity();
        let valid_b = random_identity();
        let short = &random_identity()[..59];
        let csv = format!("{valid_a},10\n{short},999\n{valid_b},20");

        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let parsed = builder.parse(&csv);
        assert_eq!(parsed.recipients.len(), 2);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 2);
        assert_eq!(parsed.rejected[0].reason, RejectionReason::IdentityLength(59));

        let tx = builder.build_from_csv(&csv, 1, 50).unwrap();
        assert_eq!(tx.record.amount, 31);
        assert_eq!(&amounts(tx.frame())[..3], &[10, 20, 0]);
    }

    #[test]
    fn test_only_malformed_lines_is_an_error() {
        let signer = pool_signer();
        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let err = builder.build_from_csv("TOOSHORT,5\n", 1, 50).unwrap_err();
        assert!(matches!(err, PaymentError::EmptyRecipientList));
    }

    #[test]
    fn test_recipient_cap() {
        let signer = pool_signer();
        let csv: String = (0..MAX_RECIPIENTS + 3)
            .map(|i| format!("{},{}\n", random_identity(), i + 1))
            .collect();

        let builder = TransactionPacketBuilder::new(&signer, SendToManyConfig::default());
        let parsed = builder.parse(&csv);
        assert_eq!(parsed.recipients.len(), MAX_RECIPIENTS);
        assert!(parsed.truncated);

        let tx = builder.build_from_csv(&csv, 0, 1).unwrap();
        let expected: i64 = (1..=MAX_RECIPIENTS as i64).sum();
        assert_eq!(tx.record.amount, expected);
    }

    // =============================================================================
    // NODE CLIENT FLOW
    // =============================================================================

    #[tokio::test]
    async fn test_send_to_many_over_transport() {
        let signer = pool_signer();
        let csv = format!("{},100\n{},200\n", random_identity(), random_identity());

        let mut client = NodeClient::new(fee_answering_transport(7), fast_config());

        let result = client.send_to_many(&signer, &csv, 4_000).await;
        assert!(!result.is_empty());
        assert_eq!(result.scheduled_tick, 4_010);
        assert_eq!(result.transaction_hash.len(), 60);
        assert!(result
            .transaction_hash
            .bytes()
            .all(|c| c.is_ascii_lowercase()));

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 2);

        let fee_request = RequestResponseHeader::decode(&sent[0]).unwrap();
        assert_eq!(fee_request.message_type(), MessageType::RequestContractFunction.as_u8());
        assert!(!fee_request.is_dejavu_zero());

        let broadcast = RequestResponseHeader::decode(&sent[1]).unwrap();
        assert_eq!(broadcast.message_type(), MessageType::BroadcastTransaction.as_u8());
        assert_eq!(broadcast.size(), sent[1].len());
        assert!(broadcast.is_dejavu_zero());
        assert_eq!(amounts(&sent[1])[..2], [100, 200]);
    }

    #[tokio::test]
    async fn test_send_to_many_without_fee_is_empty() {
        let signer = pool_signer();
        let csv = format!("{},100\n", random_identity());
        let mut client = NodeClient::new(MockTransport::new(), fast_config());

        let result = client.send_to_many(&signer, &csv, 4_000).await;
        assert!(result.is_empty());
        // Only the fee request went out
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_fee_response_aborts_payment() {
        let signer = pool_signer();
        let csv = format!("{},100\n", random_identity());
        let mut transport = MockTransport::new();
        transport.push_inbound(fee_frame(7, 1));
        let mut client = NodeClient::new(transport, fast_config());

        let result = client.send_to_many(&signer, &csv, 4_000).await;
        assert!(result.is_empty());
        assert_eq!(client.transport().sent().len(), 1);
    }
}
