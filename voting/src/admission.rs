//! Admission: the only way new eligible voters enter the ballot.

use crate::engine::{rejected, Ballot};
use crate::error::BallotError;
use ballot_types::{AccountId, Weight};
use std::collections::HashSet;

impl Ballot {
    /// Give `target` the right to vote (weight 1). Chairperson only.
    ///
    /// Fails with `AlreadyVoted` if the target has voted or delegated, and
    /// with `AlreadyEligible` if it already holds weight, so delegated weight
    /// can never be overwritten.
    pub fn grant_right(
        &mut self,
        caller: &AccountId,
        target: &AccountId,
    ) -> Result<(), BallotError> {
        let granted = self
            .check_grant(caller, std::slice::from_ref(target))
            .map_err(|err| rejected("grant_right", caller, err))?;

        self.registry.voter_mut(target).weight = Weight::ONE;
        self.registry.set_granted(granted);
        tracing::debug!(to = %target.short(), "voting right granted");
        Ok(())
    }

    /// Admit several accounts at once. Either all are admitted or none.
    ///
    /// A target listed twice fails with `AlreadyEligible` on its second entry.
    pub fn grant_rights(
        &mut self,
        caller: &AccountId,
        targets: &[AccountId],
    ) -> Result<(), BallotError> {
        let granted = self
            .check_grant(caller, targets)
            .map_err(|err| rejected("grant_rights", caller, err))?;

        for target in targets {
            self.registry.voter_mut(target).weight = Weight::ONE;
        }
        self.registry.set_granted(granted);
        tracing::debug!(count = targets.len(), "voting rights granted");
        Ok(())
    }

    /// Read-only admission checks. Returns the new `granted` total.
    fn check_grant(
        &self,
        caller: &AccountId,
        targets: &[AccountId],
    ) -> Result<Weight, BallotError> {
        self.ensure_open()?;
        self.ensure_chairperson(caller)?;

        let mut seen = HashSet::with_capacity(targets.len());
        for target in targets {
            let voter = self.registry.voter(target);
            if voter.has_voted() {
                return Err(BallotError::AlreadyVoted);
            }
            if voter.is_eligible() || !seen.insert(*target) {
                return Err(BallotError::AlreadyEligible);
            }
        }

        let count = u64::try_from(targets.len()).map_err(|_| BallotError::Overflow)?;
        Self::add_weight(self.registry.granted(), Weight::new(count))
    }
}
