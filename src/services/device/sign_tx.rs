use crate::modules::safe_tx::{SafeDomain, SafeTx, SAFE_DOMAIN_LEN};
use crate::modules::transaction::Transaction;
use crate::services::device::review::{ReviewContent, ReviewPolicy};
use crate::services::device::types::{AppError, DeviceSettings};
use crate::services::device::MAX_TRANSACTION_LEN;
use crate::services::wallet::derivation::Bip32Path;
use crate::services::wallet::signing::SigningService;

/// Reassembly state for one chunked SIGN_TX exchange.
#[derive(Default)]
pub struct SignTxContext {
    path: Option<Bip32Path>,
    raw_tx: Vec<u8>,
}

impl SignTxContext {
    fn reset(&mut self) {
        self.path = None;
        self.raw_tx.clear();
    }
}

/// Chunk 0 carries the encoded derivation path; later chunks accumulate the
/// payload. On the last chunk the payload is put up for review and, if
/// approved, signed over its Keccak256 digest.
pub fn handler(
    ctx: &mut SignTxContext,
    seed: &[u8; 64],
    settings: &DeviceSettings,
    policy: &mut dyn ReviewPolicy,
    chunk: u8,
    more: bool,
    data: &[u8],
) -> Result<Vec<u8>, AppError> {
    if chunk == 0 {
        ctx.reset();
        ctx.path = Some(Bip32Path::from_wire(data).map_err(|_| AppError::WrongApduLength)?);
        return Ok(Vec::new());
    }

    let path = ctx.path.clone().ok_or(AppError::WrongP1P2)?;

    if ctx.raw_tx.len() + data.len() > MAX_TRANSACTION_LEN {
        ctx.reset();
        return Err(AppError::TxWrongLength);
    }
    ctx.raw_tx.extend_from_slice(data);

    if more {
        return Ok(Vec::new());
    }

    let content = match review_content(&ctx.raw_tx, settings) {
        Ok(content) => content,
        Err(e) => {
            ctx.reset();
            return Err(e);
        }
    };
    if !policy.review(&content) {
        tracing::info!("sign tx: review rejected");
        ctx.reset();
        return Err(AppError::Deny);
    }

    let sig = SigningService::sign_payload(seed, &path, &ctx.raw_tx).map_err(|e| {
        tracing::warn!(error = %e, "sign tx: signing failed");
        AppError::TxSignFail
    })?;
    ctx.reset();

    let mut out = Vec::with_capacity(1 + sig.der.len() + 1);
    out.push(sig.der.len() as u8);
    out.extend_from_slice(&sig.der);
    out.push(sig.v);
    Ok(out)
}

/// A payload is either a Safe envelope (28-byte domain header followed by
/// compact JSON) or a plain binary transaction.
fn review_content(raw_tx: &[u8], settings: &DeviceSettings) -> Result<ReviewContent, AppError> {
    if raw_tx.len() > SAFE_DOMAIN_LEN && raw_tx[SAFE_DOMAIN_LEN] == b'{' {
        let domain = SafeDomain::from_bytes(&raw_tx[..SAFE_DOMAIN_LEN]);
        let tx = serde_json::from_slice::<SafeTx>(&raw_tx[SAFE_DOMAIN_LEN..]);
        if let (Some(domain), Ok(tx)) = (domain, tx) {
            return Ok(ReviewContent::SafeTx {
                chain_id: domain.chain_id,
                safe_address: domain.safe_address,
                to: tx.to,
                value: tx.value,
                operation: tx.operation,
                nonce: tx.nonce,
            });
        }
    }

    let tx = Transaction::parse(raw_tx).map_err(|e| {
        tracing::debug!(error = %e, "sign tx: payload did not parse");
        AppError::TxParsingFail
    })?;
    Ok(ReviewContent::Transfer {
        coin: tx.coin,
        value: tx.value,
        to: tx.to,
        memo: settings.display_memo.then_some(tx.memo),
    })
}
