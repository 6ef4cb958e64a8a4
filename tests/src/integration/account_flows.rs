//! # Account Flows
//!
//! Key derivation and signing through the container's `AccountService`,
//! plus the payloads exchanged with the relay service and the browser
//! extension.

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use shared_crypto::keccak256;
    use sw_02_externally_owned_accounts::{
        derive_address, derive_private_key, derive_public_key, is_within_bounds, parse_mnemonic,
        sign, AccountApi, AccountError, Address, Network, SafeCreationResponse,
        SafeCreationTransactionRequest, S_UPPER_BOUND, SECP256K1_N,
    };
    use wallet_runtime::{WalletConfig, WalletContainer};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TEST_PHRASE: &str = "test test test test test test test test test test test junk";

    fn container(network: Network) -> WalletContainer {
        let mut config = WalletConfig::default();
        config.accounts.network = network;
        WalletContainer::new(&config).unwrap()
    }

    fn relay_response(r: &str, s: &str, v: &str) -> SafeCreationResponse {
        serde_json::from_value(serde_json::json!({
            "signature": { "r": r, "s": s, "v": v },
            "tx": {
                "from": "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf",
                "value": 0,
                "data": "0x608060",
                "gas": "469472",
                "gasPrice": "10000000000",
                "nonce": 0
            },
            "safe": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "payment": "4694720000000000"
        }))
        .unwrap()
    }

    // =============================================================================
    // DERIVATION
    // =============================================================================

    #[test]
    fn test_same_mnemonic_same_address() {
        let mnemonic = parse_mnemonic(TEST_PHRASE).unwrap();
        let address = || {
            let private_key = derive_private_key(&mnemonic, Network::Mainnet).unwrap();
            derive_address(&derive_public_key(&private_key).unwrap()).unwrap()
        };

        assert_eq!(address(), address());
        assert_eq!(
            address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_generated_account_roundtrips_through_import() {
        let first = container(Network::Mainnet);
        let account = first.accounts.generate_account().unwrap();
        let phrase = account.mnemonic().unwrap().phrase();

        let second = container(Network::Mainnet);
        let restored = second.accounts.import_account(&phrase).unwrap();
        assert_eq!(restored.address(), account.address());
        assert_eq!(restored.private_key(), account.private_key());
    }

    #[test]
    fn test_derived_accounts_are_distinct() {
        let wallet = container(Network::Mainnet);
        let root = wallet.accounts.import_account(TEST_PHRASE).unwrap();

        let addresses: Vec<Address> = (1..4)
            .map(|i| wallet.accounts.derive_account(&root.address(), i).unwrap().address())
            .collect();
        assert_eq!(
            addresses[0].to_string(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        );
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_eq!(wallet.key_store.len(), 4);
    }

    // =============================================================================
    // SIGNING
    // =============================================================================

    #[test]
    fn test_signatures_are_low_s_and_verifiable() {
        let wallet = container(Network::Mainnet);
        let account = wallet.accounts.generate_account().unwrap();

        for i in 0..8u8 {
            let message = [i; 16];
            let signature = wallet.accounts.sign_message(&account.address(), &message).unwrap();
            assert!(is_within_bounds(&signature.r, &signature.s, signature.v));
            assert!(wallet
                .accounts
                .verify(&account.address(), &signature, &message)
                .unwrap());
        }
    }

    #[test]
    fn test_transaction_hash_signer_recovered() {
        let wallet = container(Network::Testnet);
        let account = wallet.accounts.generate_account().unwrap();
        let hash = keccak256(b"rlp-encoded transaction");

        let signature = wallet.accounts.sign_hash(&account.address(), &hash).unwrap();
        assert_eq!(
            wallet.accounts.recover_address(&hash, &signature).unwrap(),
            account.address()
        );
    }

    // =============================================================================
    // EXTERNAL PAYLOADS
    // =============================================================================

    #[test]
    fn test_browser_extension_pairing() {
        let wallet = container(Network::Mainnet);
        let extension = container(Network::Mainnet)
            .accounts
            .generate_account()
            .unwrap();

        let expiration = "2026-10-19T12:00:00+00:00";
        let signature = sign(format!("GNO{expiration}").as_bytes(), extension.private_key()).unwrap();
        let code = serde_json::json!({
            "expirationDate": expiration,
            "signature": {
                "v": signature.v,
                "r": signature.r.to_string(),
                "s": signature.s.to_string(),
            }
        })
        .to_string();

        assert_eq!(
            wallet.accounts.address_from_browser_extension_code(&code).unwrap(),
            extension.address()
        );
    }

    #[test]
    fn test_safe_creation_request_uses_random_s() {
        let wallet = container(Network::Mainnet);
        let owner = wallet.accounts.generate_account().unwrap();
        let s = wallet.accounts.ecdsa_random_s();

        let request = SafeCreationTransactionRequest::new(&[owner.address()], 1, s).unwrap();
        assert_eq!(request.owners, vec![owner.address().to_string()]);
        assert_eq!(U256::from_dec_str(&request.s).unwrap(), s);
        assert!(s <= S_UPPER_BOUND);
    }

    #[test]
    fn test_relay_signature_validation() {
        let valid = relay_response("1000", "2000", "28");
        assert!(valid.validated_signature().is_ok());
        assert_eq!(
            valid.safe_address().unwrap().to_string(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );

        let high_s = (S_UPPER_BOUND + U256::one()).to_string();
        assert_eq!(
            relay_response("1000", &high_s, "27").validated_signature(),
            Err(AccountError::SignatureOutOfBounds)
        );
        assert_eq!(
            relay_response(&SECP256K1_N.to_string(), "1", "27").validated_signature(),
            Err(AccountError::SignatureOutOfBounds)
        );
        assert_eq!(
            relay_response("1000", "2000", "26").validated_signature(),
            Err(AccountError::SignatureOutOfBounds)
        );
    }

    #[test]
    fn test_s_bound_is_inclusive() {
        assert!(is_within_bounds(&U256::one(), &S_UPPER_BOUND, 27));
        assert!(!is_within_bounds(&U256::one(), &(S_UPPER_BOUND + U256::one()), 27));
    }
}
