use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("{0} exceeds 255 bytes")]
    FieldTooLong(&'static str),
    #[error("transaction payload is truncated")]
    Truncated,
    #[error("trailing bytes after transaction payload")]
    TrailingBytes,
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}

/// A plain value-transfer transaction, reviewed field by field on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub coin: String,
    pub value: u64,
    pub to: [u8; 20],
    pub memo: String,
}

impl Transaction {
    /// Deterministic binary encoding:
    /// `nonce` BE8 | `coin` len u8 + bytes | `value` BE8 | `to` 20 | `memo` len u8 + bytes.
    pub fn serialize(&self) -> Result<Vec<u8>, TransactionError> {
        if self.coin.len() > u8::MAX as usize {
            return Err(TransactionError::FieldTooLong("coin"));
        }
        if self.memo.len() > u8::MAX as usize {
            return Err(TransactionError::FieldTooLong("memo"));
        }

        let mut out = Vec::with_capacity(8 + 1 + self.coin.len() + 8 + 20 + 1 + self.memo.len());
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.push(self.coin.len() as u8);
        out.extend_from_slice(self.coin.as_bytes());
        out.extend_from_slice(&self.value.to_be_bytes());
        out.extend_from_slice(&self.to);
        out.push(self.memo.len() as u8);
        out.extend_from_slice(self.memo.as_bytes());
        Ok(out)
    }

    pub fn parse(data: &[u8]) -> Result<Self, TransactionError> {
        let mut cursor = Cursor { data, pos: 0 };

        let nonce = u64::from_be_bytes(cursor.take(8)?.try_into().unwrap());
        let coin_len = cursor.take(1)?[0] as usize;
        let coin = core::str::from_utf8(cursor.take(coin_len)?)
            .map_err(|_| TransactionError::InvalidUtf8("coin"))?
            .to_string();
        let value = u64::from_be_bytes(cursor.take(8)?.try_into().unwrap());
        let mut to = [0u8; 20];
        to.copy_from_slice(cursor.take(20)?);
        let memo_len = cursor.take(1)?[0] as usize;
        let memo = core::str::from_utf8(cursor.take(memo_len)?)
            .map_err(|_| TransactionError::InvalidUtf8("memo"))?
            .to_string();

        if cursor.pos != data.len() {
            return Err(TransactionError::TrailingBytes);
        }

        Ok(Self {
            nonce,
            coin,
            value,
            to,
            memo,
        })
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], TransactionError> {
        if self.pos + n > self.data.len() {
            return Err(TransactionError::Truncated);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}
