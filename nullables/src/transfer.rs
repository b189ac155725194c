//! Nullable token transfer: record transfers without moving anything.

use ballot_forwarder::{ForwardError, TokenTransfer};
use ballot_types::{AccountId, TokenAmount, TokenId};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub token: TokenId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: TokenAmount,
}

/// A transfer capability that always succeeds, except for failing payers.
#[derive(Clone, Debug, Default)]
pub struct NullTransfer {
    failing: HashSet<AccountId>,
    transfers: Vec<RecordedTransfer>,
}

impl NullTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transfer out of `payer` fail.
    pub fn failing(mut self, payer: AccountId) -> Self {
        self.failing.insert(payer);
        self
    }

    /// Transfers committed so far (for assertions).
    pub fn transfers(&self) -> &[RecordedTransfer] {
        &self.transfers
    }
}

impl TokenTransfer for NullTransfer {
    fn transfer_from(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), ForwardError> {
        if self.failing.contains(from) {
            return Err(ForwardError::InsufficientBalance {
                needed: amount,
                available: TokenAmount::default(),
            });
        }
        self.transfers.push(RecordedTransfer {
            token: *token,
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "null-transfer"
    }
}
