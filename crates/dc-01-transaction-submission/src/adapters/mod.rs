//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete implementations of outbound ports and identity loading.

mod credentials;
mod event_hub;
mod signing;

pub use credentials::{load_msp_directory, MspCredentials, KEYSTORE_DIR, SIGNCERTS_DIR};
pub use signing::{verify_signature, EcdsaSigner};
