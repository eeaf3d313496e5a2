// =============================================================================
// WIRE PROTOCOL
// APDU-style command/response exchange between the command sender and the
// signer device. Synchronous and blocking: one request, one reply.
// =============================================================================

/// Application class byte expected on every command.
pub const CLA: u8 = 0xe0;

pub const INS_GET_VERSION: u8 = 0x03;
pub const INS_GET_APP_NAME: u8 = 0x04;
pub const INS_GET_PUBLIC_KEY: u8 = 0x05;
pub const INS_SIGN_TX: u8 = 0x06;
pub const INS_GET_SAFE_TX_HASH: u8 = 0x07;

/// Payloads larger than this are split across multiple commands.
pub const CHUNK_SIZE: usize = 255;

/// P2 flag: more chunks of the current payload follow.
pub const P2_MORE: u8 = 0x80;
/// P2 flag: this chunk completes the payload.
pub const P2_LAST: u8 = 0x00;

/// Status word returned on success.
pub const SW_OK: u16 = 0x9000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub data: Vec<u8>,
    pub status: u16,
}

impl Response {
    pub fn ok(data: Vec<u8>) -> Self {
        Self {
            data,
            status: SW_OK,
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            data: Vec::new(),
            status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SW_OK
    }
}

/// A blocking command/response channel to a signer device.
pub trait Transport {
    fn exchange(&mut self, command: Command) -> Response;
}
