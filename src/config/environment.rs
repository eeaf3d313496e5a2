use std::env;

use crate::services::wallet::derivation::is_valid_seed_phrase;

/// Standard BIP39 test vector; the seed every test device boots with.
pub const DEFAULT_TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub device_mnemonic: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let device_mnemonic = match env::var("DEVICE_MNEMONIC") {
            Ok(mnemonic) => mnemonic,
            Err(_) => {
                tracing::warn!("DEVICE_MNEMONIC not set, using the standard test mnemonic");
                DEFAULT_TEST_MNEMONIC.to_string()
            }
        };

        if !is_valid_seed_phrase(&device_mnemonic) {
            return Err("DEVICE_MNEMONIC is not a valid BIP39 seed phrase".to_string());
        }

        Ok(Self { device_mnemonic })
    }

    /// Fixed configuration for tests: the standard test mnemonic.
    pub fn test_default() -> Self {
        Self {
            device_mnemonic: DEFAULT_TEST_MNEMONIC.to_string(),
        }
    }
}
