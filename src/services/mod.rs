pub mod client;
pub mod device;
pub mod hashing;
pub mod transport;
pub mod wallet;
