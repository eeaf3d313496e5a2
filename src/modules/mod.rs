pub mod safe_tx;
pub mod transaction;
