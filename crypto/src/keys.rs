//! Ed25519 key generation and account derivation.

use crate::hash::blake2b_256_multi;
use ballot_types::{AccountId, KeyPair, PrivateKey};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

/// Domain tag for name-derived account seeds.
const NAME_SEED_DOMAIN: &[u8] = b"ballot/account-name/v1";

/// Generate a new key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    KeyPair {
        account: AccountId::new(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        account: AccountId::new(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// The account identity (public key) belonging to a private key.
pub fn account_from_private(private: &PrivateKey) -> AccountId {
    let signing_key = SigningKey::from_bytes(&private.0);
    AccountId::new(signing_key.verifying_key().to_bytes())
}

/// Derive a deterministic key pair from a human-readable name.
///
/// Used by scripted sessions where participants are named rather than keyed.
/// The seed is public, so these keys must never guard real funds.
pub fn account_from_name(name: &str) -> KeyPair {
    let seed = blake2b_256_multi(&[NAME_SEED_DOMAIN, name.as_bytes()]);
    keypair_from_seed(&seed)
}
