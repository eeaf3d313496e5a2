pub mod environment;

pub use environment::{Config, DEFAULT_TEST_MNEMONIC};
