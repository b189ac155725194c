//! The two external capabilities a batch is built from.
//!
//! Implementations are plain values: the batch loop stages work on clones and
//! keeps a clone only when its records succeed, which is what makes a batch
//! (or a single record) all-or-nothing.

use crate::error::ForwardError;
use crate::permit::PermitRequest;
use ballot_types::{AccountId, Timestamp, TokenAmount, TokenId};

/// Validates a signed spending permission.
pub trait Authorizer: Clone {
    /// Accept `request` at time `now`, or explain why not.
    fn authorize(&mut self, request: &PermitRequest, now: Timestamp) -> Result<(), ForwardError>;

    /// Human-readable name of this authorizer.
    fn name(&self) -> &str;
}

/// Moves tokens between accounts.
pub trait TokenTransfer: Clone {
    fn transfer_from(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), ForwardError>;

    /// Human-readable name of this transfer capability.
    fn name(&self) -> &str;
}
