//! Nullable infrastructure for deterministic testing.
//!
//! The forwarder's external collaborators (clock, authorizer, token transfer)
//! are abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be told to fail for chosen payers
//! - Record what they were asked to do
//!
//! Usage: swap real implementations for nullables in tests.

pub mod authorizer;
pub mod clock;
pub mod transfer;

pub use authorizer::NullAuthorizer;
pub use clock::NullClock;
pub use transfer::{NullTransfer, RecordedTransfer};
