use sha3::{Digest, Keccak256};

use crate::modules::safe_tx::{SafeDomain, SafeTx};

// =============================================================================
// EIP-712 SAFE TRANSACTION HASHING
// Implements the Gnosis Safe off-chain hash: domain separator, struct hash,
// and the final 0x1901-prefixed digest
// =============================================================================

// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
const DOMAIN_SEPARATOR_TYPEHASH: &str =
    "47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218";

// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,
// uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,
// address refundReceiver,uint256 nonce)")
const SAFE_TX_TYPEHASH: &str =
    "bb8310d486368db6bd6f849402fdd73ad53d316b5a4b2644ad6efe0f941286d8";

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Pads a byte array to 32 bytes (right-aligned) as per Ethereum ABI encoding rules
pub fn pad_to_32_bytes(input: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if input.len() <= 32 {
        padded[32 - input.len()..].copy_from_slice(input);
    } else {
        padded.copy_from_slice(&input[0..32]);
    }
    padded
}

/// Encodes data according to Ethereum ABI encoding rules: each element
/// right-aligned and zero-padded to a 32-byte word
pub fn abi_encode(elements: &[&[u8]]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(elements.len() * 32);
    for element in elements {
        if element.len() == 32 {
            encoded.extend_from_slice(element);
        } else {
            encoded.extend_from_slice(&pad_to_32_bytes(element));
        }
    }
    encoded
}

fn typehash(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut out).expect("typehash literal");
    out
}

pub fn domain_hash(domain: &SafeDomain) -> [u8; 32] {
    let domain_data = abi_encode(&[
        &typehash(DOMAIN_SEPARATOR_TYPEHASH),
        &domain.chain_id.to_be_bytes(),
        &domain.safe_address,
    ]);
    keccak256(&domain_data)
}

pub fn struct_hash(tx: &SafeTx) -> [u8; 32] {
    let data_hash = keccak256(&tx.data);
    let tx_data = abi_encode(&[
        &typehash(SAFE_TX_TYPEHASH),
        &tx.to,
        &tx.value.to_be_bytes(),
        &data_hash,
        &[tx.operation],
        &tx.safe_tx_gas.to_be_bytes(),
        &tx.base_gas.to_be_bytes(),
        &tx.gas_price.to_be_bytes(),
        &tx.gas_token,
        &tx.refund_receiver,
        &tx.nonce.to_be_bytes(),
    ]);
    keccak256(&tx_data)
}

/// Final Safe transaction hash: keccak256(0x19 | 0x01 | domain | struct)
pub fn safe_tx_hash(domain: &SafeDomain, tx: &SafeTx) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(&domain_hash(domain));
    preimage.extend_from_slice(&struct_hash(tx));
    keccak256(&preimage)
}
