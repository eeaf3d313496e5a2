use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

use crate::services::hashing::keccak256;
use crate::services::wallet::derivation::{derive_keypair, Bip32Path, DerivationError};

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error(transparent)]
    Derivation(#[from] DerivationError),
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}

/// ECDSA signature as it travels on the wire: DER bytes plus a recovery id.
pub struct RecoverableDer {
    pub der: Vec<u8>,
    pub v: u8,
}

pub struct SigningService;

impl SigningService {
    /// Sign a 32-byte digest with a recoverable ECDSA signature.
    pub fn sign_digest(secret: &SecretKey, digest: &[u8; 32]) -> Result<RecoverableDer, SigningError> {
        let secp = Secp256k1::new();
        let message = Message::from_digest_slice(digest)
            .map_err(|e| SigningError::InvalidDigest(e.to_string()))?;

        let sig = secp.sign_ecdsa_recoverable(&message, secret);
        let (rec_id, _) = sig.serialize_compact();

        Ok(RecoverableDer {
            der: sig.to_standard().serialize_der().to_vec(),
            v: rec_id.to_i32() as u8,
        })
    }

    /// Sign an arbitrary payload: derive the key at `path`, hash the payload
    /// with Keccak256, and sign the digest.
    pub fn sign_payload(
        seed: &[u8; 64],
        path: &Bip32Path,
        payload: &[u8],
    ) -> Result<RecoverableDer, SigningError> {
        let key = derive_keypair(seed, path)?;
        let digest = keccak256(payload);
        Self::sign_digest(&key.secret, &digest)
    }

    /// Verify a DER signature over `keccak256(message)` against an
    /// uncompressed SEC1 public key. Any malformed input is simply invalid.
    pub fn check_signature_validity(public_key: &[u8], der_sig: &[u8], message: &[u8]) -> bool {
        let secp = Secp256k1::verification_only();
        let Ok(public_key) = PublicKey::from_slice(public_key) else {
            return false;
        };
        let Ok(sig) = Signature::from_der(der_sig) else {
            return false;
        };
        let digest = keccak256(message);
        let Ok(message) = Message::from_digest_slice(&digest) else {
            return false;
        };
        secp.verify_ecdsa(&message, &sig, &public_key).is_ok()
    }
}
