use crate::services::client::types::{ClientError, PublicKeyData, SignatureData};

/// Response layout: `key_len` u8 | public key bytes.
pub fn unpack_get_public_key_response(data: &[u8]) -> Result<PublicKeyData, ClientError> {
    let (&key_len, rest) = data
        .split_first()
        .ok_or(ClientError::MalformedResponse("empty public key response"))?;
    if rest.len() != key_len as usize {
        return Err(ClientError::MalformedResponse(
            "public key length byte disagrees with payload",
        ));
    }
    Ok(PublicKeyData {
        public_key: rest.to_vec(),
    })
}

/// Response layout: `sig_len` u8 | DER signature | `v` u8.
pub fn unpack_sign_tx_response(data: &[u8]) -> Result<SignatureData, ClientError> {
    let (&sig_len, rest) = data
        .split_first()
        .ok_or(ClientError::MalformedResponse("empty signature response"))?;
    if rest.len() != sig_len as usize + 1 {
        return Err(ClientError::MalformedResponse(
            "signature length byte disagrees with payload",
        ));
    }
    Ok(SignatureData {
        der_sig: rest[..sig_len as usize].to_vec(),
        v: rest[sig_len as usize],
    })
}
