use safe_signer::config::Config;
use safe_signer::modules::transaction::Transaction;
use safe_signer::services::client::{unpack_get_public_key_response, unpack_sign_tx_response};
use safe_signer::services::device::TerminalReview;
use safe_signer::services::wallet::signing::SigningService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Manual review flow: sign a sample transfer with approval prompted at the
/// terminal, then verify the returned signature.
fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safe_signer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");
    let mut client = safe_signer::create_signer(&config, Box::new(TerminalReview))
        .expect("Failed to initialize device");
    client.transport_mut().set_display_memo(true);

    let path = "m/44'/1'/0'/0/0";
    let rapdu = client.get_public_key(path).expect("get_public_key failed");
    let public_key = unpack_get_public_key_response(&rapdu.data)
        .expect("malformed public key response")
        .public_key;
    tracing::info!(path, public_key = %hex::encode(&public_key), "derived public key");

    let mut to = [0u8; 20];
    hex::decode_to_slice("de0b295669a9fd93d5f28d9ec85e40f4cb697bae", &mut to)
        .expect("address literal");
    let transaction = Transaction {
        nonce: 1,
        coin: "ETH".to_string(),
        value: 401346,
        to,
        memo: "<3 from Kim".to_string(),
    };
    let serialized_tx = transaction
        .serialize()
        .expect("transaction serialization failed");

    match client.sign_tx(path, &serialized_tx) {
        Ok(()) => {
            let response = client
                .get_async_response()
                .expect("signature response missing");
            let signature = unpack_sign_tx_response(&response.data)
                .expect("malformed signature response");

            tracing::info!(signature = %hex::encode(&signature.der_sig), "transaction approved");
            if SigningService::check_signature_validity(
                &public_key,
                &signature.der_sig,
                &serialized_tx,
            ) {
                tracing::info!("signature verification successful");
            } else {
                tracing::error!("signature verification failed");
            }
        }
        Err(e) => tracing::error!(error = %e, "transaction rejected or failed"),
    }
}
