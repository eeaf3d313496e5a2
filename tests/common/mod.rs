use safe_signer::config::Config;
use safe_signer::modules::safe_tx::{SafeDomain, SafeTx};
use safe_signer::services::client::CommandSender;
use safe_signer::services::device::{AutoApprove, Device, ReviewPolicy};

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub const SAFE_ADDRESS: &str = "88ffb774b8583c1c9a2b71b7391861c0be253993";
#[allow(dead_code)]
pub const DESTINATION: &str = "de0b295669a9fd93d5f28d9ec85e40f4cb697bae";
#[allow(dead_code)]
pub const EXPECTED_SAFE_TX_HASH: &str =
    "938061ada63cd3e0fa939ef7881e8bffcf1bc1ebc0904ba6ed69d0a5f46db575";

/// Auto-approving client over a fresh test device.
#[allow(dead_code)]
pub fn test_client() -> CommandSender<Device> {
    test_client_with(Box::new(AutoApprove))
}

#[allow(dead_code)]
pub fn test_client_with(policy: Box<dyn ReviewPolicy>) -> CommandSender<Device> {
    safe_signer::create_signer(&Config::test_default(), policy)
        .expect("Failed to initialize test device")
}

#[allow(dead_code)]
pub fn address(hex_str: &str) -> [u8; 20] {
    let mut out = [0u8; 20];
    hex::decode_to_slice(hex_str, &mut out).expect("address literal");
    out
}

/// The Safe fixture with a known reference hash: mainnet, value 0.123 ETH,
/// empty call data, nonce 1.
#[allow(dead_code)]
pub fn known_safe_fixture() -> (SafeDomain, SafeTx) {
    let domain = SafeDomain {
        chain_id: 1,
        safe_address: address(SAFE_ADDRESS),
    };
    let tx = SafeTx {
        to: address(DESTINATION),
        value: 123_000_000_000_000_000,
        nonce: 1,
        ..Default::default()
    };
    (domain, tx)
}
