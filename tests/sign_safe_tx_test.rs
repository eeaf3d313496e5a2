// =============================================================================
// INTEGRATION TESTS - SIGN SAFE TRANSACTION
// Streams a Safe payload through SIGN_TX with automatic approval and checks
// the signature against the device's public key
// =============================================================================

#[path = "common/mod.rs"]
mod common;

use common::{known_safe_fixture, test_client, test_client_with};
use safe_signer::services::client::{
    unpack_get_public_key_response, unpack_sign_tx_response, ClientError,
};
use safe_signer::services::device::AutoReject;
use safe_signer::services::wallet::signing::SigningService;

fn safe_payload() -> Vec<u8> {
    let (domain, safe_tx) = known_safe_fixture();
    let mut transaction_data = Vec::new();
    transaction_data.extend_from_slice(&domain.to_bytes());
    transaction_data.extend_from_slice(&serde_json::to_vec(&safe_tx).unwrap());
    transaction_data
}

// =============================================================================
// TEST 1: Sign Safe Transaction And Verify
// =============================================================================

#[test]
fn test_sign_safe_tx() {
    let mut client = test_client();
    let path = "m/44'/60'/0'/0/0";

    // First get the public key
    let rapdu = client.get_public_key(path).unwrap();
    let public_key = unpack_get_public_key_response(&rapdu.data)
        .unwrap()
        .public_key;
    assert_eq!(public_key.len(), 65);
    assert_eq!(public_key[0], 0x04);

    // Send the sign transaction instruction; approval happens in the
    // device's review policy
    let transaction_data = safe_payload();
    client.sign_tx(path, &transaction_data).unwrap();

    // Get and verify the signature
    let response = client.get_async_response().expect("no signature response");
    let signature = unpack_sign_tx_response(&response.data).unwrap();

    assert!(SigningService::check_signature_validity(
        &public_key,
        &signature.der_sig,
        &transaction_data,
    ));
    println!("✅ Safe transaction signature verified");
}

// =============================================================================
// TEST 2: Rejection Surfaces As Deny
// =============================================================================

#[test]
fn test_sign_safe_tx_rejected() {
    let mut client = test_client_with(Box::new(AutoReject));

    let err = client
        .sign_tx("m/44'/60'/0'/0/0", &safe_payload())
        .unwrap_err();
    assert!(matches!(err, ClientError::Device(0x6985)));
    assert!(client.get_async_response().is_none());
}

// =============================================================================
// TEST 3: Signature Does Not Cover A Different Payload
// =============================================================================

#[test]
fn test_signature_bound_to_payload() {
    let mut client = test_client();
    let path = "m/44'/60'/0'/0/0";

    let rapdu = client.get_public_key(path).unwrap();
    let public_key = unpack_get_public_key_response(&rapdu.data)
        .unwrap()
        .public_key;

    let transaction_data = safe_payload();
    client.sign_tx(path, &transaction_data).unwrap();
    let response = client.get_async_response().unwrap();
    let signature = unpack_sign_tx_response(&response.data).unwrap();

    let mut tampered = transaction_data.clone();
    *tampered.last_mut().unwrap() ^= 0x01;
    assert!(!SigningService::check_signature_validity(
        &public_key,
        &signature.der_sig,
        &tampered,
    ));
}

// =============================================================================
// TEST 4: Keys Differ Across Derivation Paths
// =============================================================================

#[test]
fn test_signatures_differ_across_paths() {
    let mut client = test_client();
    let payload = safe_payload();

    let key_a = unpack_get_public_key_response(
        &client.get_public_key("m/44'/60'/0'/0/0").unwrap().data,
    )
    .unwrap()
    .public_key;
    let key_b = unpack_get_public_key_response(
        &client.get_public_key("m/44'/60'/0'/0/1").unwrap().data,
    )
    .unwrap()
    .public_key;
    assert_ne!(key_a, key_b);

    client.sign_tx("m/44'/60'/0'/0/1", &payload).unwrap();
    let response = client.get_async_response().unwrap();
    let signature = unpack_sign_tx_response(&response.data).unwrap();

    // The signature binds to the path's key, not the default one.
    assert!(SigningService::check_signature_validity(
        &key_b,
        &signature.der_sig,
        &payload,
    ));
    assert!(!SigningService::check_signature_validity(
        &key_a,
        &signature.der_sig,
        &payload,
    ));
}
