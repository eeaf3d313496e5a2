use crate::modules::safe_tx::{SafeDomain, SafeTx, SAFE_DOMAIN_LEN};
use crate::services::device::types::AppError;
use crate::services::device::MAX_TRANSACTION_LEN;
use crate::services::hashing;

/// Reassembly state for one chunked GET_SAFE_TX_HASH exchange.
#[derive(Default)]
pub struct SafeTxContext {
    domain: Option<SafeDomain>,
    raw_tx: Vec<u8>,
}

impl SafeTxContext {
    fn reset(&mut self) {
        self.domain = None;
        self.raw_tx.clear();
    }
}

/// Chunk 0 carries the 28-byte domain header (chain id + Safe address) and
/// resets any previous state; chunk 1 appends JSON payload bytes. When the
/// last chunk arrives the payload is parsed and the Safe hash returned.
pub fn handler(
    ctx: &mut SafeTxContext,
    chunk: u8,
    more: bool,
    data: &[u8],
) -> Result<Vec<u8>, AppError> {
    match chunk {
        0 => {
            ctx.reset();
            if data.len() != SAFE_DOMAIN_LEN {
                return Err(AppError::WrongApduLength);
            }
            ctx.domain = SafeDomain::from_bytes(data);
            tracing::debug!(domain = ?ctx.domain, "safe tx hash: received domain header");
            Ok(Vec::new())
        }
        1 => {
            let domain = ctx.domain.ok_or(AppError::WrongP1P2)?;

            if ctx.raw_tx.len() + data.len() > MAX_TRANSACTION_LEN {
                ctx.reset();
                return Err(AppError::TxWrongLength);
            }
            ctx.raw_tx.extend_from_slice(data);

            if more {
                return Ok(Vec::new());
            }

            let tx: SafeTx = match serde_json::from_slice(&ctx.raw_tx) {
                Ok(tx) => tx,
                Err(e) => {
                    tracing::debug!(error = %e, "safe tx hash: payload did not parse");
                    ctx.reset();
                    return Err(AppError::TxParsingFail);
                }
            };

            let hash = hashing::safe_tx_hash(&domain, &tx);
            tracing::debug!(hash = %hex::encode(hash), "safe tx hash computed");
            ctx.reset();
            Ok(hash.to_vec())
        }
        _ => Err(AppError::WrongP1P2),
    }
}
