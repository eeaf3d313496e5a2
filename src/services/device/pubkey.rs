use crate::services::device::types::AppError;
use crate::services::wallet::derivation::{derive_keypair, Bip32Path};

/// GET_PUBLIC_KEY: data is an encoded derivation path; the response is the
/// key length byte followed by the uncompressed SEC1 public key.
pub fn handler(seed: &[u8; 64], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let path = Bip32Path::from_wire(data).map_err(|_| AppError::WrongApduLength)?;
    let key = derive_keypair(seed, &path).map_err(|e| {
        tracing::warn!(error = %e, path = %path, "public key derivation failed");
        AppError::KeyDeriveFail
    })?;

    let public_key = key.public.serialize_uncompressed();
    tracing::debug!(path = %path, public_key = %hex::encode(public_key), "derived public key");

    let mut out = Vec::with_capacity(1 + public_key.len());
    out.push(public_key.len() as u8);
    out.extend_from_slice(&public_key);
    Ok(out)
}
