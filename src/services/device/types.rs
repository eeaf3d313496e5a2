/// Everything a command handler can fail with, one variant per status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("transaction review denied")]
    Deny,
    #[error("wrong p1/p2")]
    WrongP1P2,
    #[error("wrong command length")]
    WrongApduLength,
    #[error("instruction not supported")]
    InsNotSupported,
    #[error("class not supported")]
    ClaNotSupported,
    #[error("transaction payload too large")]
    TxWrongLength,
    #[error("transaction parsing failed")]
    TxParsingFail,
    #[error("transaction hashing failed")]
    TxHashFail,
    #[error("transaction signing failed")]
    TxSignFail,
    #[error("key derivation failed")]
    KeyDeriveFail,
    #[error("version parsing failed")]
    VersionParsingFail,
}

impl AppError {
    /// Status word reported to the command sender.
    pub fn status_word(&self) -> u16 {
        match self {
            AppError::Deny => 0x6985,
            AppError::WrongP1P2 => 0x6A86,
            AppError::WrongApduLength => 0x6A87,
            AppError::InsNotSupported => 0x6D00,
            AppError::ClaNotSupported => 0x6E00,
            AppError::TxWrongLength => 0xB004,
            AppError::TxParsingFail => 0xB005,
            AppError::TxHashFail => 0xB006,
            AppError::TxSignFail => 0xB008,
            AppError::KeyDeriveFail => 0xB009,
            AppError::VersionParsingFail => 0xB00A,
        }
    }
}

/// Runtime-togglable device settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceSettings {
    /// Show the memo field during plain-transfer review.
    pub display_memo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_words() {
        assert_eq!(AppError::Deny.status_word(), 0x6985);
        assert_eq!(AppError::WrongApduLength.status_word(), 0x6A87);
        assert_eq!(AppError::TxParsingFail.status_word(), 0xB005);
    }
}
