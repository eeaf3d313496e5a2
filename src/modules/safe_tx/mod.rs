pub mod model;

pub use model::{SafeDomain, SafeTx, SAFE_DOMAIN_LEN};
