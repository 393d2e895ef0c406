//! # Wire Properties
//!
//! Property checks across the codec and crypto crates, driven by seeded
//! random inputs.

#[cfg(test)]
mod tests {
    use qp_01_wire_protocol::{
        parse_system_info, FrameIter, ProtocolError, RequestResponseHeader, SystemInfo,
        HEADER_SIZE, MAX_FRAME_SIZE, SYSTEM_INFO_SIZE,
    };
    use qp_02_solution_crypto::{apply_mask, Keystream, KeystreamConfig, KeystreamDeriver};
    use qp_04_verification_pool::{PendingSolution, PendingSolutionStore, VerificationError};
    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};
    use shared_crypto::{
        identity_to_public_key, public_key_to_identity, CryptoError, IdentityCase,
        IDENTITY_LENGTH,
    };

    #[test]
    fn test_identity_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut key = [0u8; 32];
            rng.fill_bytes(&mut key);
            let identity = public_key_to_identity(&key, IdentityCase::Upper);
            assert_eq!(identity.len(), IDENTITY_LENGTH);
            assert_eq!(identity_to_public_key(&identity).unwrap(), key);
        }
    }

    #[test]
    fn test_identity_length_rejected() {
        let identity = public_key_to_identity(&[42u8; 32], IdentityCase::Upper);
        assert!(matches!(
            identity_to_public_key(&identity[..59]),
            Err(CryptoError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_header_size_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sizes = vec![0, HEADER_SIZE, MAX_FRAME_SIZE];
        sizes.extend((0..100).map(|_| rng.gen_range(0..=MAX_FRAME_SIZE)));

        for size in sizes {
            let message_type: u8 = rng.gen();
            let dejavu: u32 = rng.gen();
            let header = RequestResponseHeader::new(size, message_type, dejavu).unwrap();
            let decoded = RequestResponseHeader::decode(&header.encode()).unwrap();
            assert_eq!(decoded.size(), size);
            assert_eq!(decoded.message_type(), message_type);
            assert_eq!(decoded.dejavu(), dejavu);
        }

        assert!(matches!(
            RequestResponseHeader::new(MAX_FRAME_SIZE + 1, 0, 0),
            Err(ProtocolError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn test_keystream_determinism_and_involution() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut secret = [0u8; 32];
            let mut nonce = [0u8; 32];
            let mut seed = [0u8; 32];
            let mut solution_nonce = [0u8; 32];
            rng.fill_bytes(&mut secret);
            rng.fill_bytes(&mut nonce);
            rng.fill_bytes(&mut seed);
            rng.fill_bytes(&mut solution_nonce);

            let a = Keystream::derive(&secret, &nonce);
            let b = Keystream::derive(&secret, &nonce);
            assert_eq!(a.as_bytes(), b.as_bytes());

            let (masked_seed, masked_nonce) = apply_mask(&seed, &solution_nonce, a.as_bytes());
            let (plain_seed, plain_nonce) = apply_mask(&masked_seed, &masked_nonce, a.as_bytes());
            assert_eq!(plain_seed, seed);
            assert_eq!(plain_nonce, solution_nonce);
        }
    }

    #[test]
    fn test_rejection_sampling_terminates() {
        let deriver = KeystreamDeriver::new(KeystreamConfig::default());
        let mut rng = StdRng::seed_from_u64(99);
        for i in 0..20u8 {
            let secret = [i; 32];
            let (nonce, keystream) = deriver
                .derive_nonce_and_keystream_with(&secret, &mut rng)
                .unwrap();
            assert_eq!(keystream.gamming_key()[0], 0);
            assert_eq!(Keystream::derive(&secret, &nonce).as_bytes(), keystream.as_bytes());
        }
    }

    #[test]
    fn test_system_info_first_match_in_stream() {
        let frame = |tick: u32| {
            let info = SystemInfo {
                tick,
                ..SystemInfo::default()
            };
            let mut bytes = RequestResponseHeader::new(HEADER_SIZE + SYSTEM_INFO_SIZE, 47, 5)
                .unwrap()
                .encode()
                .to_vec();
            bytes.extend_from_slice(&info.encode());
            bytes
        };

        let mut stream = RequestResponseHeader::new(HEADER_SIZE + 4, 1, 0)
            .unwrap()
            .encode()
            .to_vec();
        stream.extend_from_slice(&[0xEE; 4]);
        stream.extend(frame(100));
        stream.extend(frame(200));

        assert_eq!(FrameIter::new(&stream).count(), 3);
        assert_eq!(parse_system_info(&stream).unwrap().tick, 100);
    }

    #[test]
    fn test_store_lifo_property() {
        let store = PendingSolutionStore::new();
        for tag in ["E1", "E2", "E3"] {
            store.push(PendingSolution::with_tag("", "", "", tag));
        }

        let popped: Vec<String> = (0..3)
            .map(|_| store.pop_most_recent().unwrap().correlation_tag)
            .collect();
        assert_eq!(popped, ["E3", "E2", "E1"]);
        assert!(matches!(
            store.pop_most_recent(),
            Err(VerificationError::EmptyStore)
        ));
    }
}
