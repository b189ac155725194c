//! Cryptographic primitives for the ballot workspace.
//!
//! - **Ed25519** for account keys, permit signing and signature verification
//! - **Blake2b-256** for permit digests and deterministic name-derived accounts

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{account_from_name, account_from_private, generate_keypair, keypair_from_seed};
pub use sign::{sign_message, verify_signature};
