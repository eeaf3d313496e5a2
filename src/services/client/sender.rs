use crate::modules::safe_tx::{SafeDomain, SafeTx};
use crate::services::client::types::ClientError;
use crate::services::transport::{
    Command, Response, Transport, CHUNK_SIZE, CLA, INS_GET_APP_NAME, INS_GET_PUBLIC_KEY,
    INS_GET_SAFE_TX_HASH, INS_GET_VERSION, INS_SIGN_TX, P2_LAST, P2_MORE,
};
use crate::services::wallet::derivation::Bip32Path;

/// Client-side command sender: builds commands, chunks payloads at the
/// 255-byte boundary, and surfaces device status words as errors.
pub struct CommandSender<T: Transport> {
    transport: T,
    async_response: Option<Response>,
}

impl<T: Transport> CommandSender<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            async_response: None,
        }
    }

    /// Direct access to the underlying transport, e.g. to flip device
    /// settings on an in-process device.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn exchange(&mut self, ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> Result<Response, ClientError> {
        let response = self.transport.exchange(Command {
            cla: CLA,
            ins,
            p1,
            p2,
            data,
        });
        if !response.is_ok() {
            return Err(ClientError::Device(response.status));
        }
        Ok(response)
    }

    pub fn get_version(&mut self) -> Result<(u8, u8, u8), ClientError> {
        let response = self.exchange(INS_GET_VERSION, 0, 0, Vec::new())?;
        match response.data[..] {
            [major, minor, patch] => Ok((major, minor, patch)),
            _ => Err(ClientError::MalformedResponse("version is not 3 bytes")),
        }
    }

    pub fn get_app_name(&mut self) -> Result<String, ClientError> {
        let response = self.exchange(INS_GET_APP_NAME, 0, 0, Vec::new())?;
        String::from_utf8(response.data)
            .map_err(|_| ClientError::MalformedResponse("app name is not UTF-8"))
    }

    pub fn get_public_key(&mut self, path: &str) -> Result<Response, ClientError> {
        let path: Bip32Path = path.parse()?;
        self.exchange(INS_GET_PUBLIC_KEY, 0, P2_LAST, path.to_wire())
    }

    /// Raw chunk of the GET_SAFE_TX_HASH exchange; `chunk` 0 is the domain
    /// header, `chunk` 1 the JSON payload.
    pub fn get_safe_tx_hash(
        &mut self,
        chunk: u8,
        more: bool,
        data: &[u8],
    ) -> Result<Response, ClientError> {
        let p2 = if more { P2_MORE } else { P2_LAST };
        self.exchange(INS_GET_SAFE_TX_HASH, chunk, p2, data.to_vec())
    }

    /// Full GET_SAFE_TX_HASH flow: domain header first, then the compact
    /// JSON encoding of the transaction split at the chunk boundary.
    pub fn safe_tx_hash(
        &mut self,
        domain: &SafeDomain,
        tx: &SafeTx,
    ) -> Result<[u8; 32], ClientError> {
        self.get_safe_tx_hash(0, true, &domain.to_bytes())?;

        let payload = serde_json::to_vec(tx)?;
        let mut response = None;
        for (i, data) in payload.chunks(CHUNK_SIZE).enumerate() {
            let more = (i + 1) * CHUNK_SIZE < payload.len();
            tracing::debug!(chunk = i + 1, more, size = data.len(), "sending safe tx chunk");
            response = Some(self.get_safe_tx_hash(1, more, data)?);
        }

        let response = response.ok_or(ClientError::MalformedResponse("empty safe tx payload"))?;
        response
            .data
            .as_slice()
            .try_into()
            .map_err(|_| ClientError::MalformedResponse("safe tx hash is not 32 bytes"))
    }

    /// Streams a signing request: the derivation path, then the payload in
    /// chunks. The device reviews the transaction through its installed
    /// policy; the final response is held for [`Self::get_async_response`].
    pub fn sign_tx(&mut self, path: &str, transaction: &[u8]) -> Result<(), ClientError> {
        let path: Bip32Path = path.parse()?;
        self.exchange(INS_SIGN_TX, 0, P2_MORE, path.to_wire())?;

        if transaction.is_empty() {
            let response = self.exchange(INS_SIGN_TX, 1, P2_LAST, Vec::new())?;
            self.async_response = Some(response);
            return Ok(());
        }

        let mut last = None;
        for (i, data) in transaction.chunks(CHUNK_SIZE).enumerate() {
            let more = (i + 1) * CHUNK_SIZE < transaction.len();
            let p2 = if more { P2_MORE } else { P2_LAST };
            last = Some(self.exchange(INS_SIGN_TX, (i + 1) as u8, p2, data.to_vec())?);
        }

        self.async_response = last;
        Ok(())
    }

    /// Takes the response produced by the approval flow of the last
    /// [`Self::sign_tx`] call, if any.
    pub fn get_async_response(&mut self) -> Option<Response> {
        self.async_response.take()
    }
}
