//! Core types shared across the crate: constants, errors, and the external
//! collaborator interfaces (algorithm identifiers, cipher/MAC handles).

mod constants;
mod error;
mod traits;

pub use constants::*;
pub use error::ConstructionError;
pub use traits::{CipherAlgorithm, CipherHandle, CryptoFactory, MacAlgorithm, MacHandle};
