//! Fundamental types for the ballot workspace.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identities, keys and signatures, proposal labels, weights, token
//! amounts, timestamps and the clock abstraction.

pub mod account;
pub mod amount;
pub mod error;
pub mod keys;
pub mod label;
pub mod time;

pub use account::{AccountId, TokenId};
pub use amount::{TokenAmount, Weight};
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, Signature};
pub use label::ProposalLabel;
pub use time::{Clock, SystemClock, Timestamp};
