//! Vote delegation: entrust voting weight to another account.
//!
//! Only the immediate edge is stored (`VoterStatus::Delegated(target)`); chains
//! are walked lazily each time they are resolved:
//! - **Transitive delegation** (A→B→C means A's weight lands with C)
//! - **Cycle detection**: a walk that reaches the caller is rejected
//! - **Bounded walks**: at most one hop per known voter, plus one
//!
//! If the chain ends at a voter who already voted, the delegated weight goes
//! straight onto that voter's proposal; otherwise it is added to their weight.

use crate::engine::{rejected, Ballot};
use crate::error::BallotError;
use crate::registry::{ProposalIndex, VoterStatus};
use ballot_types::{AccountId, Weight};

/// Where a delegation's weight ends up once committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Landing {
    /// The final delegate has not voted yet: raise their weight.
    Delegate { account: AccountId, weight: Weight },
    /// The final delegate already voted: raise their proposal's count.
    Proposal { index: ProposalIndex, vote_count: Weight },
}

impl Ballot {
    /// Delegate the caller's vote to `target`.
    ///
    /// Checks run in order: ballot open, caller eligible (`NotEligible`), caller
    /// not yet voted (`AlreadyVoted`), `target != caller` (`SelfDelegation`),
    /// the chain from `target` never reaches the caller (`DelegationCycle`), and
    /// the chain ends at an eligible voter (`NonVoterDelegate`).
    pub fn delegate(&mut self, caller: &AccountId, target: &AccountId) -> Result<(), BallotError> {
        let landing = self
            .plan_delegation(caller, target)
            .map_err(|err| rejected("delegate", caller, err))?;

        let moved = {
            let voter = self.registry.voter_mut(caller);
            voter.status = VoterStatus::Delegated(*target);
            voter.weight
        };
        match landing {
            Landing::Delegate { account, weight } => {
                self.registry.voter_mut(&account).weight = weight;
                tracing::debug!(
                    caller = %caller.short(),
                    to = %target.short(),
                    delegate = %account.short(),
                    weight = %moved,
                    "delegated to pending voter"
                );
            }
            Landing::Proposal { index, vote_count } => {
                if let Some(proposal) = self.registry.proposal_mut(index) {
                    proposal.vote_count = vote_count;
                }
                tracing::debug!(
                    caller = %caller.short(),
                    to = %target.short(),
                    proposal = index,
                    weight = %moved,
                    "delegated to voter who already voted"
                );
            }
        }
        Ok(())
    }

    /// The account at the end of `account`'s delegation chain.
    ///
    /// An account that has not delegated resolves to itself.
    pub fn resolve_delegate(&self, account: &AccountId) -> Result<AccountId, BallotError> {
        self.walk_chain(account, None)
    }

    /// Accounts that delegated directly to `delegate`, sorted.
    pub fn delegators(&self, delegate: &AccountId) -> Vec<AccountId> {
        let mut found: Vec<AccountId> = self
            .registry
            .voters()
            .filter(|(_, voter)| voter.delegate().as_ref() == Some(delegate))
            .map(|(account, _)| *account)
            .collect();
        found.sort();
        found
    }

    /// Read-only probing: validate the delegation and compute its effect.
    fn plan_delegation(
        &self,
        caller: &AccountId,
        target: &AccountId,
    ) -> Result<Landing, BallotError> {
        self.ensure_open()?;
        let sender = self.registry.voter(caller);
        if !sender.is_eligible() {
            return Err(BallotError::NotEligible);
        }
        if sender.has_voted() {
            return Err(BallotError::AlreadyVoted);
        }
        if caller == target {
            return Err(BallotError::SelfDelegation);
        }

        let end = self.walk_chain(target, Some(caller))?;
        let delegate = self.registry.voter(&end);
        if !delegate.is_eligible() {
            return Err(BallotError::NonVoterDelegate);
        }

        match delegate.chosen_proposal() {
            Some(index) => {
                let proposal = self
                    .registry
                    .proposal(index)
                    .ok_or(BallotError::InvalidProposal {
                        index,
                        count: self.registry.proposals().len(),
                    })?;
                Ok(Landing::Proposal {
                    index,
                    vote_count: Self::add_weight(proposal.vote_count, sender.weight)?,
                })
            }
            None => Ok(Landing::Delegate {
                account: end,
                weight: Self::add_weight(delegate.weight, sender.weight)?,
            }),
        }
    }

    /// Follow delegate edges from `start` to the end of the chain.
    ///
    /// Fails with `DelegationCycle` when the walk reaches `forbidden` or runs
    /// longer than the number of stored voters allows.
    fn walk_chain(
        &self,
        start: &AccountId,
        forbidden: Option<&AccountId>,
    ) -> Result<AccountId, BallotError> {
        let max_hops = self.registry.voter_count() + 1;
        let mut current = *start;
        for _ in 0..=max_hops {
            if forbidden == Some(&current) {
                return Err(BallotError::DelegationCycle);
            }
            match self.registry.voter(&current).delegate() {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        Err(BallotError::DelegationCycle)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BallotError;
    use crate::registry::VoterStatus;
    use crate::Ballot;
    use ballot_types::{AccountId, Weight};

    fn account(n: u8) -> AccountId {
        AccountId::new([n; 32])
    }

    /// Chairperson is account 1; accounts 2..=n are admitted.
    fn ballot_with_voters(n: u8) -> Ballot {
        let mut ballot = Ballot::with_text_labels(account(1), &["a", "b", "c"]).unwrap();
        for i in 2..=n {
            ballot.grant_right(&account(1), &account(i)).unwrap();
        }
        ballot
    }

    // ── Preconditions ────────────────────────────────────────────────────

    #[test]
    fn test_not_eligible_checked_first() {
        let mut ballot = ballot_with_voters(2);
        assert_eq!(
            ballot.delegate(&account(9), &account(9)),
            Err(BallotError::NotEligible)
        );
    }

    #[test]
    fn test_already_voted_cannot_delegate() {
        let mut ballot = ballot_with_voters(3);
        ballot.vote(&account(2), 0).unwrap();
        assert_eq!(
            ballot.delegate(&account(2), &account(3)),
            Err(BallotError::AlreadyVoted)
        );
    }

    #[test]
    fn test_already_delegated_cannot_delegate_again() {
        let mut ballot = ballot_with_voters(3);
        ballot.delegate(&account(2), &account(3)).unwrap();
        assert_eq!(
            ballot.delegate(&account(2), &account(1)),
            Err(BallotError::AlreadyVoted)
        );
    }

    #[test]
    fn test_self_delegation_rejected() {
        let mut ballot = ballot_with_voters(2);
        assert_eq!(
            ballot.delegate(&account(2), &account(2)),
            Err(BallotError::SelfDelegation)
        );
        assert!(!ballot.voter(&account(2)).has_voted());
    }

    #[test]
    fn test_delegate_to_non_voter_rejected() {
        let mut ballot = ballot_with_voters(2);
        assert_eq!(
            ballot.delegate(&account(2), &account(7)),
            Err(BallotError::NonVoterDelegate)
        );
        assert_eq!(ballot.voter(&account(2)).status, VoterStatus::Pending);
        // Probing an unknown account must not create a record for it.
        assert_eq!(ballot.registry().voter_count(), 2);
    }

    // ── Cycles ───────────────────────────────────────────────────────────

    #[test]
    fn test_two_cycle_rejected() {
        let mut ballot = ballot_with_voters(3);
        ballot.delegate(&account(2), &account(3)).unwrap();
        assert_eq!(
            ballot.delegate(&account(3), &account(2)),
            Err(BallotError::DelegationCycle)
        );
        assert_eq!(ballot.voter(&account(3)).status, VoterStatus::Pending);
        assert_eq!(ballot.voter(&account(3)).weight, Weight::new(2));
    }

    #[test]
    fn test_long_cycle_rejected() {
        let mut ballot = ballot_with_voters(8);
        for i in 2..8 {
            ballot.delegate(&account(i), &account(i + 1)).unwrap();
        }
        assert_eq!(
            ballot.delegate(&account(8), &account(2)),
            Err(BallotError::DelegationCycle)
        );
        assert!(ballot.is_conserved());
    }

    // ── Effects ──────────────────────────────────────────────────────────

    #[test]
    fn test_delegation_to_pending_voter_moves_weight() {
        let mut ballot = ballot_with_voters(2);
        ballot.delegate(&account(2), &account(1)).unwrap();

        let sender = ballot.voter(&account(2));
        assert!(sender.has_voted());
        assert_eq!(sender.delegate(), Some(account(1)));
        assert_eq!(ballot.voter(&account(1)).weight, Weight::new(2));
        assert!(ballot.is_conserved());
    }

    #[test]
    fn test_delegation_to_voted_voter_counts_immediately() {
        let mut ballot = ballot_with_voters(2);
        ballot.vote(&account(1), 2).unwrap();
        ballot.delegate(&account(2), &account(1)).unwrap();
        assert_eq!(ballot.proposals()[2].vote_count, Weight::new(2));
        assert_eq!(ballot.voter(&account(1)).weight, Weight::ONE);
        assert!(ballot.is_conserved());
    }

    #[test]
    fn test_stored_edge_is_immediate_target() {
        let mut ballot = ballot_with_voters(4);
        ballot.delegate(&account(3), &account(4)).unwrap();
        ballot.delegate(&account(2), &account(3)).unwrap();
        assert_eq!(ballot.voter(&account(2)).delegate(), Some(account(3)));
        assert_eq!(ballot.resolve_delegate(&account(2)), Ok(account(4)));
        assert_eq!(ballot.voter(&account(4)).weight, Weight::new(3));
    }

    #[test]
    fn test_chain_through_voted_end() {
        let mut ballot = ballot_with_voters(4);
        ballot.vote(&account(4), 1).unwrap();
        ballot.delegate(&account(3), &account(4)).unwrap();
        ballot.delegate(&account(2), &account(3)).unwrap();
        assert_eq!(ballot.proposals()[1].vote_count, Weight::new(3));
        assert!(ballot.is_conserved());
    }

    #[test]
    fn test_delegating_into_existing_chain_lands_at_end() {
        let mut ballot = ballot_with_voters(3);
        ballot.delegate(&account(3), &account(2)).unwrap();
        assert_eq!(
            ballot.delegate(&account(1), &account(5)),
            Err(BallotError::NonVoterDelegate)
        );
        ballot.delegate(&account(1), &account(3)).unwrap();
        assert_eq!(ballot.voter(&account(2)).weight, Weight::new(3));
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_undelegated_is_self() {
        let ballot = ballot_with_voters(2);
        assert_eq!(ballot.resolve_delegate(&account(2)), Ok(account(2)));
        assert_eq!(ballot.resolve_delegate(&account(42)), Ok(account(42)));
    }

    #[test]
    fn test_delegators_fan_in() {
        let mut ballot = ballot_with_voters(6);
        for i in 3..=6 {
            ballot.delegate(&account(i), &account(2)).unwrap();
        }
        assert_eq!(
            ballot.delegators(&account(2)),
            vec![account(3), account(4), account(5), account(6)]
        );
        assert_eq!(ballot.voter(&account(2)).weight, Weight::new(5));
        assert!(ballot.delegators(&account(3)).is_empty());
    }
}
