// =============================================================================
// INTEGRATION TESTS - PLAIN TRANSACTION SIGNING
// The regular transfer review flow, including the memo display setting
// =============================================================================

#[path = "common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::{address, test_client, test_client_with, DESTINATION};
use safe_signer::modules::transaction::Transaction;
use safe_signer::services::client::{
    unpack_get_public_key_response, unpack_sign_tx_response, ClientError,
};
use safe_signer::services::device::{ReviewContent, ReviewPolicy};
use safe_signer::services::wallet::signing::SigningService;

fn sample_transaction() -> Transaction {
    Transaction {
        nonce: 1,
        coin: "ETH".to_string(),
        value: 401346,
        to: address(DESTINATION),
        memo: "<3 from Kim".to_string(),
    }
}

/// Approves everything and records what was put up for review.
struct RecordingPolicy {
    seen: Arc<Mutex<Option<ReviewContent>>>,
}

impl ReviewPolicy for RecordingPolicy {
    fn review(&mut self, content: &ReviewContent) -> bool {
        *self.seen.lock().unwrap() = Some(content.clone());
        true
    }
}

// =============================================================================
// TEST 1: Sign Regular Transaction And Verify
// =============================================================================

#[test]
fn test_sign_regular_tx() {
    let mut client = test_client();
    let path = "m/44'/1'/0'/0/0";

    let rapdu = client.get_public_key(path).unwrap();
    let public_key = unpack_get_public_key_response(&rapdu.data)
        .unwrap()
        .public_key;

    let serialized_tx = sample_transaction().serialize().unwrap();
    client.sign_tx(path, &serialized_tx).unwrap();

    let response = client.get_async_response().expect("no signature response");
    let signature = unpack_sign_tx_response(&response.data).unwrap();

    assert!(SigningService::check_signature_validity(
        &public_key,
        &signature.der_sig,
        &serialized_tx,
    ));
    println!("✅ Regular transaction signature verified");
}

// =============================================================================
// TEST 2: Memo Display Setting Controls Review Content
// =============================================================================

#[test]
fn test_memo_hidden_by_default() {
    let seen = Arc::new(Mutex::new(None));
    let mut client = test_client_with(Box::new(RecordingPolicy { seen: seen.clone() }));

    let serialized_tx = sample_transaction().serialize().unwrap();
    client.sign_tx("m/44'/1'/0'/0/0", &serialized_tx).unwrap();

    match seen.lock().unwrap().clone() {
        Some(ReviewContent::Transfer { memo, coin, .. }) => {
            assert_eq!(coin, "ETH");
            assert!(memo.is_none(), "memo shown without the setting enabled");
        }
        other => panic!("unexpected review content: {:?}", other),
    };
}

#[test]
fn test_memo_shown_when_enabled() {
    let seen = Arc::new(Mutex::new(None));
    let mut client = test_client_with(Box::new(RecordingPolicy { seen: seen.clone() }));
    client.transport_mut().set_display_memo(true);

    let serialized_tx = sample_transaction().serialize().unwrap();
    client.sign_tx("m/44'/1'/0'/0/0", &serialized_tx).unwrap();

    match seen.lock().unwrap().clone() {
        Some(ReviewContent::Transfer { memo, .. }) => {
            assert_eq!(memo.as_deref(), Some("<3 from Kim"));
        }
        other => panic!("unexpected review content: {:?}", other),
    };
}

// =============================================================================
// TEST 3: Error Paths
// =============================================================================

#[test]
fn test_unparseable_payload_rejected() {
    let mut client = test_client();
    let err = client
        .sign_tx("m/44'/1'/0'/0/0", &[0xde, 0xad, 0xbe, 0xef])
        .unwrap_err();
    assert!(matches!(err, ClientError::Device(0xB005)));
}

#[test]
fn test_invalid_path_fails_client_side() {
    let mut client = test_client();
    let serialized_tx = sample_transaction().serialize().unwrap();
    let err = client.sign_tx("m/44'/not-a-path", &serialized_tx).unwrap_err();
    assert!(matches!(err, ClientError::Path(_)));
}
