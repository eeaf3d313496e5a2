use serde::{Deserialize, Serialize};

/// Length of the encoded domain header: 8-byte chain id + 20-byte address.
pub const SAFE_DOMAIN_LEN: usize = 28;

/// A Gnosis Safe multisig transaction, as submitted for hashing/signing.
///
/// The JSON wire form is compact serde_json: `to` as a byte array,
/// `data`/`gas_token`/`refund_receiver` as bare hex strings (no 0x prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTx {
    pub to: [u8; 20],
    pub value: u64,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
    pub operation: u8,
    pub safe_tx_gas: u64,
    pub base_gas: u64,
    pub gas_price: u64,
    #[serde(with = "hex::serde")]
    pub gas_token: [u8; 20],
    #[serde(with = "hex::serde")]
    pub refund_receiver: [u8; 20],
    pub nonce: u64,
}

/// EIP-712 domain of a Safe: the chain it lives on and its address.
///
/// Travels as the first protocol chunk, encoded as
/// `chain_id` (8 bytes big-endian) followed by the 20-byte Safe address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeDomain {
    pub chain_id: u64,
    pub safe_address: [u8; 20],
}

impl SafeDomain {
    pub fn to_bytes(&self) -> [u8; SAFE_DOMAIN_LEN] {
        let mut out = [0u8; SAFE_DOMAIN_LEN];
        out[0..8].copy_from_slice(&self.chain_id.to_be_bytes());
        out[8..].copy_from_slice(&self.safe_address);
        out
    }

    /// Decodes a domain header. Returns `None` unless `data` is exactly 28 bytes.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != SAFE_DOMAIN_LEN {
            return None;
        }
        let mut safe_address = [0u8; 20];
        safe_address.copy_from_slice(&data[8..]);
        Some(Self {
            chain_id: u64::from_be_bytes(data[0..8].try_into().ok()?),
            safe_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_roundtrip() {
        let mut safe_address = [0u8; 20];
        hex::decode_to_slice("88ffb774b8583c1c9a2b71b7391861c0be253993", &mut safe_address)
            .unwrap();
        let domain = SafeDomain {
            chain_id: 1,
            safe_address,
        };

        let bytes = domain.to_bytes();
        assert_eq!(bytes[0..8], 1u64.to_be_bytes());
        assert_eq!(SafeDomain::from_bytes(&bytes), Some(domain));
    }

    #[test]
    fn test_domain_rejects_wrong_length() {
        assert!(SafeDomain::from_bytes(&[0u8; 27]).is_none());
        assert!(SafeDomain::from_bytes(&[0u8; 29]).is_none());
        assert!(SafeDomain::from_bytes(&[]).is_none());
    }

    #[test]
    fn test_safe_tx_json_wire_format() {
        let tx = SafeTx {
            value: 42,
            nonce: 7,
            ..Default::default()
        };

        let json = serde_json::to_string(&tx).unwrap();
        // Addresses travel as bare hex strings, data as an empty hex string.
        assert!(json.contains(r#""data":"""#));
        assert!(json.contains(r#""gas_token":"0000000000000000000000000000000000000000""#));

        let back: SafeTx = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
