use bip39::{Language, Mnemonic};
use coins_bip32::path::DerivationPath;
use coins_bip32::prelude::*;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// HD WALLET DERIVATION
// BIP39 mnemonic -> seed -> BIP32 path -> secp256k1 keypair
// =============================================================================

const HARDENED: u32 = 0x8000_0000;

#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
    #[error("malformed encoded derivation path")]
    WrongEncoding,
    #[error("key derivation failed: {0}")]
    KeyDerive(String),
}

/// BIP32 path stored as an array of [`u32`] components.
///
/// Wire form: one length byte (component count) followed by each component
/// as a big-endian u32, hardened components carrying the `0x8000_0000` bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bip32Path(Vec<u32>);

impl Bip32Path {
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.0.len() * 4);
        out.push(self.0.len() as u8);
        for component in &self.0 {
            out.extend_from_slice(&component.to_be_bytes());
        }
        out
    }

    /// Decodes the wire form. Fails on an empty buffer or when the length
    /// byte disagrees with the number of component bytes.
    pub fn from_wire(data: &[u8]) -> Result<Self, DerivationError> {
        if data.is_empty() || (data[0] as usize * 4 != data.len() - 1) {
            return Err(DerivationError::WrongEncoding);
        }

        Ok(Bip32Path(
            data[1..]
                .chunks(4)
                .map(|chunk| u32::from_be_bytes(chunk.try_into().unwrap()))
                .collect(),
        ))
    }
}

impl FromStr for Bip32Path {
    type Err = DerivationError;

    /// Parses the conventional textual form, e.g. `m/44'/60'/0'/0/0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(DerivationError::InvalidPath(s.to_string()));
        }

        let mut components = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'').or(part.strip_suffix('h')) {
                Some(digits) => (digits, HARDENED),
                None => (part, 0),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| DerivationError::InvalidPath(s.to_string()))?;
            if index >= HARDENED {
                return Err(DerivationError::InvalidPath(s.to_string()));
            }
            components.push(index | hardened);
        }

        if components.is_empty() {
            return Err(DerivationError::InvalidPath(s.to_string()));
        }
        Ok(Bip32Path(components))
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            if component & HARDENED != 0 {
                write!(f, "/{}'", component & !HARDENED)?;
            } else {
                write!(f, "/{}", component)?;
            }
        }
        Ok(())
    }
}

/// Validate BIP39 seed phrase
pub fn is_valid_seed_phrase(seed_phrase: &str) -> bool {
    let words: Vec<&str> = seed_phrase.split_whitespace().collect();
    if !matches!(words.len(), 12 | 15 | 18 | 21 | 24) {
        return false;
    }
    Mnemonic::parse_in_normalized(Language::English, seed_phrase).is_ok()
}

pub fn seed_from_mnemonic(seed_phrase: &str) -> Result<[u8; 64], DerivationError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, seed_phrase)
        .map_err(|e| DerivationError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed(""))
}

/// A secp256k1 keypair derived for one BIP32 path.
pub struct DerivedKey {
    pub secret: SecretKey,
    pub public: PublicKey,
}

/// Derive the keypair at `path` from a 64-byte BIP39 seed.
pub fn derive_keypair(seed: &[u8; 64], path: &Bip32Path) -> Result<DerivedKey, DerivationError> {
    let derivation_path = DerivationPath::from_str(&path.to_string())
        .map_err(|e| DerivationError::InvalidPath(e.to_string()))?;

    let key = coins_bip32::xkeys::XPriv::root_from_seed(&seed[..], None)
        .map_err(|e| DerivationError::KeyDerive(e.to_string()))?
        .derive_path(&derivation_path)
        .map_err(|e| DerivationError::KeyDerive(e.to_string()))?;

    let signing_key: &SigningKey = key.as_ref();
    let priv_bytes = signing_key.to_bytes();

    let secret = SecretKey::from_slice(&priv_bytes)
        .map_err(|e| DerivationError::KeyDerive(e.to_string()))?;
    let public = PublicKey::from_secret_key(&Secp256k1::new(), &secret);

    Ok(DerivedKey { secret, public })
}
