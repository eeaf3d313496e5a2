use crate::services::wallet::derivation::DerivationError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("device returned status word {0:#06x}")]
    Device(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
    #[error(transparent)]
    Path(#[from] DerivationError),
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Unpacked GET_PUBLIC_KEY response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyData {
    /// Uncompressed SEC1 public key (65 bytes).
    pub public_key: Vec<u8>,
}

/// Unpacked SIGN_TX response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureData {
    pub der_sig: Vec<u8>,
    /// Recovery id of the signature.
    pub v: u8,
}
