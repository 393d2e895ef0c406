//! # Solution Flow
//!
//! A miner's solution travels from the packet builder through the node
//! client's retrying send, and is opened again on the receiving side.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{miner_signer, pool_signer};

    use qp_01_wire_protocol::{MessageType, RequestResponseHeader};
    use qp_02_solution_crypto::{
        open_solution_packet, KeystreamConfig, KeystreamDeriver, SolutionCryptoError,
        SolutionCryptoService, SolutionEncryptionApi, SolutionPacketBuilder, SIGNED_REGION,
        SOLUTION_PACKET_SIZE,
    };
    use qp_05_node_client::{MockTransport, NodeClient, NodeClientConfig, NodeClientError, RetryPolicy};
    use shared_crypto::MessageSigner;
    use shared_types::ZERO_SECRET;
    use std::sync::Arc;

    const MINING_SEED: [u8; 32] = [0x11; 32];
    const NONCE: [u8; 32] = [0x22; 32];

    fn config(max_retries: u32) -> NodeClientConfig {
        NodeClientConfig {
            send_retry: RetryPolicy {
                max_retries,
                backoff_ms: 1,
            },
            ..NodeClientConfig::default()
        }
    }

    #[tokio::test]
    async fn test_solution_round_trip_through_client() {
        let miner = miner_signer();
        let pool = pool_signer().public_key();

        let mut client = NodeClient::new(MockTransport::new(), config(3));
        client
            .send_solution(&miner, &pool, &MINING_SEED, &NONCE)
            .await
            .unwrap();

        let packet = &client.transport().sent()[0];
        assert_eq!(packet.len(), SOLUTION_PACKET_SIZE);

        let header = RequestResponseHeader::decode(packet).unwrap();
        assert_eq!(header.message_type(), MessageType::BroadcastMessage.as_u8());
        assert_eq!(header.size(), SOLUTION_PACKET_SIZE);

        // Masked fields do not appear in the clear
        assert!(!packet.windows(32).any(|w| w == MINING_SEED));

        // Foreign destination: the zero secret keys the stream
        let opened = open_solution_packet(packet, &ZERO_SECRET).unwrap();
        assert_eq!(opened.source_public_key, miner.public_key());
        assert_eq!(opened.destination_public_key, pool);
        assert_eq!(opened.mining_seed, MINING_SEED);
        assert_eq!(opened.nonce, NONCE);
    }

    #[tokio::test]
    async fn test_solution_send_retries_then_fails() {
        let miner = miner_signer();
        let pool = pool_signer().public_key();

        let mut transport = MockTransport::new();
        transport.fail_next_sends(2);
        let mut client = NodeClient::new(transport, config(3));
        client
            .send_solution(&miner, &pool, &MINING_SEED, &NONCE)
            .await
            .unwrap();
        assert_eq!(client.transport().send_attempts(), 3);
        assert_eq!(client.transport().sent().len(), 1);

        let mut transport = MockTransport::new();
        transport.fail_next_sends(10);
        let mut client = NodeClient::new(transport, config(1));
        let err = client
            .send_solution(&miner, &pool, &MINING_SEED, &NONCE)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeClientError::SendFailed { attempts: 2 }));
    }

    #[test]
    fn test_self_addressed_solution_uses_shared_secret() {
        let miner = miner_signer();
        let own_key = miner.public_key();
        let builder = SolutionPacketBuilder::new(&miner, KeystreamDeriver::default());
        let packet = builder.build(&own_key, &MINING_SEED, &NONCE).unwrap();

        let secret = miner.shared_secret(&own_key).unwrap();
        let opened = open_solution_packet(packet.as_bytes(), &secret).unwrap();
        assert_eq!(opened.mining_seed, MINING_SEED);
        assert_eq!(opened.nonce, NONCE);

        // The zero secret does not unmask a self-addressed packet
        let wrong = open_solution_packet(packet.as_bytes(), &ZERO_SECRET);
        assert!(!matches!(wrong, Ok(ref o) if o.mining_seed == MINING_SEED));
    }

    #[test]
    fn test_tampered_packet_rejected() {
        let miner = miner_signer();
        let pool = pool_signer().public_key();
        let builder = SolutionPacketBuilder::new(&miner, KeystreamDeriver::default());
        let mut bytes = builder
            .build(&pool, &MINING_SEED, &NONCE)
            .unwrap()
            .into_bytes();

        bytes[SIGNED_REGION.end - 1] ^= 0x01;
        let err = open_solution_packet(&bytes, &ZERO_SECRET).unwrap_err();
        assert!(matches!(err, SolutionCryptoError::Crypto(_)));
    }

    #[test]
    fn test_service_matches_builder() {
        let service = SolutionCryptoService::new(Arc::new(miner_signer()), KeystreamConfig::default());
        let pool = pool_signer().public_key();
        let packet = service
            .build_solution_packet(&pool, &MINING_SEED, &NONCE)
            .unwrap();
        let opened = service.open_solution_packet(packet.as_bytes()).unwrap();
        assert_eq!(opened.nonce, NONCE);
        assert_eq!(opened.destination_public_key, pool);
    }
}
