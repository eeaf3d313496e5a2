pub mod derivation;
pub mod signing;

pub use derivation::*;
pub use signing::*;
