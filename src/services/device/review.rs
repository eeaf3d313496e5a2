use std::io::{self, BufRead, Write};

// =============================================================================
// TRANSACTION REVIEW
// The in-process stand-in for the on-device review screen: handlers build a
// ReviewContent and a ReviewPolicy decides whether the user approves it
// =============================================================================

/// What the device would put on screen for the user to approve.
#[derive(Debug, Clone)]
pub enum ReviewContent {
    Transfer {
        coin: String,
        value: u64,
        to: [u8; 20],
        /// Present only when the display-memo setting is enabled.
        memo: Option<String>,
    },
    SafeTx {
        chain_id: u64,
        safe_address: [u8; 20],
        to: [u8; 20],
        value: u64,
        operation: u8,
        nonce: u64,
    },
}

/// Decides the outcome of a review. Installed once per device; the test
/// harness uses the auto policies, the manual binary prompts the operator.
pub trait ReviewPolicy {
    fn review(&mut self, content: &ReviewContent) -> bool;
}

pub struct AutoApprove;

impl ReviewPolicy for AutoApprove {
    fn review(&mut self, content: &ReviewContent) -> bool {
        tracing::debug!(?content, "auto-approving review");
        true
    }
}

pub struct AutoReject;

impl ReviewPolicy for AutoReject {
    fn review(&mut self, content: &ReviewContent) -> bool {
        tracing::debug!(?content, "auto-rejecting review");
        false
    }
}

/// Interactive policy for the manual-review binary: prints the transaction
/// and reads an approve/reject answer from the terminal.
pub struct TerminalReview;

impl ReviewPolicy for TerminalReview {
    fn review(&mut self, content: &ReviewContent) -> bool {
        match content {
            ReviewContent::Transfer {
                coin,
                value,
                to,
                memo,
            } => {
                println!("Review transaction");
                println!("  Coin:  {}", coin);
                println!("  Value: {}", value);
                println!("  To:    0x{}", hex::encode(to));
                if let Some(memo) = memo {
                    println!("  Memo:  {}", memo);
                }
            }
            ReviewContent::SafeTx {
                chain_id,
                safe_address,
                to,
                value,
                operation,
                nonce,
            } => {
                println!("Review Safe transaction");
                println!("  Chain id:  {}", chain_id);
                println!("  Safe:      0x{}", hex::encode(safe_address));
                println!("  To:        0x{}", hex::encode(to));
                println!("  Value:     {}", value);
                println!("  Operation: {}", operation);
                println!("  Nonce:     {}", nonce);
            }
        }

        print!("Approve? [y/N] ");
        io::stdout().flush().ok();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}
