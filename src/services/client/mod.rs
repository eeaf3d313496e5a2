pub mod sender;
pub mod types;
pub mod unpack;

pub use sender::CommandSender;
pub use types::{ClientError, PublicKeyData, SignatureData};
pub use unpack::{unpack_get_public_key_response, unpack_sign_tx_response};
