pub mod pubkey;
pub mod review;
pub mod safe_tx;
pub mod sign_tx;
pub mod types;

pub use review::{AutoApprove, AutoReject, ReviewContent, ReviewPolicy, TerminalReview};
pub use types::{AppError, DeviceSettings};

use crate::config::Config;
use crate::services::transport::{
    Command, Response, Transport, CLA, INS_GET_APP_NAME, INS_GET_PUBLIC_KEY, INS_GET_SAFE_TX_HASH,
    INS_GET_VERSION, INS_SIGN_TX, P2_LAST, P2_MORE,
};
use crate::services::wallet::derivation::seed_from_mnemonic;
use safe_tx::SafeTxContext;
use sign_tx::SignTxContext;

/// Reassembled transaction payloads are capped at this size.
pub const MAX_TRANSACTION_LEN: usize = 510;

/// In-process rendition of the signer application: holds the seed material,
/// per-instruction reassembly contexts, settings, and the review policy.
pub struct Device {
    seed: [u8; 64],
    settings: DeviceSettings,
    policy: Box<dyn ReviewPolicy>,
    safe_tx: SafeTxContext,
    sign_tx: SignTxContext,
}

impl Device {
    pub fn new(config: &Config, policy: Box<dyn ReviewPolicy>) -> Result<Self, AppError> {
        let seed =
            seed_from_mnemonic(&config.device_mnemonic).map_err(|_| AppError::KeyDeriveFail)?;
        Ok(Self {
            seed,
            settings: DeviceSettings::default(),
            policy,
            safe_tx: SafeTxContext::default(),
            sign_tx: SignTxContext::default(),
        })
    }

    /// Settings-screen toggle: show the memo during plain-transfer review.
    pub fn set_display_memo(&mut self, display_memo: bool) {
        self.settings.display_memo = display_memo;
    }

    fn dispatch(&mut self, command: &Command) -> Result<Vec<u8>, AppError> {
        if command.cla != CLA {
            return Err(AppError::ClaNotSupported);
        }

        let more = match command.p2 {
            P2_MORE => true,
            P2_LAST => false,
            _ => return Err(AppError::WrongP1P2),
        };

        match command.ins {
            INS_GET_VERSION => {
                require_empty(command)?;
                get_version()
            }
            INS_GET_APP_NAME => {
                require_empty(command)?;
                Ok(env!("CARGO_PKG_NAME").as_bytes().to_vec())
            }
            INS_GET_PUBLIC_KEY => {
                if command.p1 != 0 || more {
                    return Err(AppError::WrongP1P2);
                }
                pubkey::handler(&self.seed, &command.data)
            }
            INS_SIGN_TX => sign_tx::handler(
                &mut self.sign_tx,
                &self.seed,
                &self.settings,
                self.policy.as_mut(),
                command.p1,
                more,
                &command.data,
            ),
            INS_GET_SAFE_TX_HASH => {
                safe_tx::handler(&mut self.safe_tx, command.p1, more, &command.data)
            }
            _ => Err(AppError::InsNotSupported),
        }
    }
}

impl Transport for Device {
    fn exchange(&mut self, command: Command) -> Response {
        tracing::trace!(
            ins = command.ins,
            p1 = command.p1,
            p2 = command.p2,
            len = command.data.len(),
            "command received"
        );
        match self.dispatch(&command) {
            Ok(data) => Response::ok(data),
            Err(e) => {
                tracing::debug!(ins = command.ins, error = %e, "command failed");
                Response::error(e.status_word())
            }
        }
    }
}

fn require_empty(command: &Command) -> Result<(), AppError> {
    if command.p1 != 0 || command.p2 != 0 {
        return Err(AppError::WrongP1P2);
    }
    if !command.data.is_empty() {
        return Err(AppError::WrongApduLength);
    }
    Ok(())
}

fn get_version() -> Result<Vec<u8>, AppError> {
    let mut parts = env!("CARGO_PKG_VERSION")
        .split('.')
        .map(|part| part.parse::<u8>());

    let mut out = Vec::with_capacity(3);
    for _ in 0..3 {
        let part = parts
            .next()
            .and_then(|part| part.ok())
            .ok_or(AppError::VersionParsingFail)?;
        out.push(part);
    }
    Ok(out)
}
