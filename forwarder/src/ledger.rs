//! In-memory token balances.

use crate::capability::TokenTransfer;
use crate::error::ForwardError;
use ballot_types::{AccountId, TokenAmount, TokenId};
use std::collections::HashMap;

/// Balances per `(token, account)`. Missing entries read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: HashMap<(TokenId, AccountId), TokenAmount>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `account` out of thin air.
    pub fn mint(
        &mut self,
        token: &TokenId,
        account: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), ForwardError> {
        let balance = self
            .balance_of(token, account)
            .checked_add(amount)
            .ok_or(ForwardError::Overflow)?;
        self.balances.insert((*token, *account), balance);
        Ok(())
    }

    pub fn balance_of(&self, token: &TokenId, account: &AccountId) -> TokenAmount {
        self.balances
            .get(&(*token, *account))
            .copied()
            .unwrap_or_default()
    }
}

impl TokenTransfer for TokenLedger {
    fn transfer_from(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), ForwardError> {
        let available = self.balance_of(token, from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(ForwardError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(ForwardError::Overflow)?;

        self.balances.insert((*token, *from), remaining);
        self.balances.insert((*token, *to), credited);
        Ok(())
    }

    fn name(&self) -> &str {
        "ledger"
    }
}
