//! Direct vote casting.

use crate::engine::{rejected, Ballot};
use crate::error::BallotError;
use crate::registry::{ProposalIndex, VoterStatus};
use ballot_types::{AccountId, Weight};

impl Ballot {
    /// Cast the caller's whole weight (own plus delegated) for `proposal`.
    ///
    /// Checks run in order: ballot open, `NotEligible`, `AlreadyVoted`,
    /// `InvalidProposal`.
    pub fn vote(&mut self, caller: &AccountId, proposal: ProposalIndex) -> Result<(), BallotError> {
        let (weight, vote_count) = self
            .check_vote(caller, proposal)
            .map_err(|err| rejected("vote", caller, err))?;

        self.registry.voter_mut(caller).status = VoterStatus::Voted(proposal);
        if let Some(entry) = self.registry.proposal_mut(proposal) {
            entry.vote_count = vote_count;
        }
        tracing::debug!(caller = %caller.short(), proposal, %weight, "vote cast");
        Ok(())
    }

    /// Returns the caller's weight and the proposal's count after the vote.
    fn check_vote(
        &self,
        caller: &AccountId,
        proposal: ProposalIndex,
    ) -> Result<(Weight, Weight), BallotError> {
        self.ensure_open()?;
        let voter = self.registry.voter(caller);
        if !voter.is_eligible() {
            return Err(BallotError::NotEligible);
        }
        if voter.has_voted() {
            return Err(BallotError::AlreadyVoted);
        }
        let entry = self
            .registry
            .proposal(proposal)
            .ok_or(BallotError::InvalidProposal {
                index: proposal,
                count: self.registry.proposals().len(),
            })?;
        Ok((voter.weight, Self::add_weight(entry.vote_count, voter.weight)?))
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

    #[test]
    fn test_vote_records_choice_and_weight() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a", "b"]).unwrap();
        ballot.vote(&account(1), 1).unwrap();
        let chair = ballot.voter(&account(1));
        assert_eq!(chair.status, VoterStatus::Voted(1));
        assert_eq!(chair.chosen_proposal(), Some(1));
        assert_eq!(ballot.proposals()[1].vote_count, Weight::ONE);
        assert_eq!(ballot.proposals()[0].vote_count, Weight::ZERO);
    }

    #[test]
    fn test_zero_weight_cannot_vote() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a"]).unwrap();
        assert_eq!(ballot.vote(&account(2), 0), Err(BallotError::NotEligible));
    }

    #[test]
    fn test_double_vote_rejected() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a", "b"]).unwrap();
        ballot.vote(&account(1), 0).unwrap();
        assert_eq!(ballot.vote(&account(1), 1), Err(BallotError::AlreadyVoted));
        assert_eq!(ballot.proposals()[1].vote_count, Weight::ZERO);
    }

    #[test]
    fn test_delegator_cannot_vote() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a"]).unwrap();
        ballot.grant_right(&account(1), &account(2)).unwrap();
        ballot.delegate(&account(2), &account(1)).unwrap();
        assert_eq!(ballot.vote(&account(2), 0), Err(BallotError::AlreadyVoted));
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a", "b", "c"]).unwrap();
        assert_eq!(
            ballot.vote(&account(1), 3),
            Err(BallotError::InvalidProposal { index: 3, count: 3 })
        );
        assert_eq!(ballot.voter(&account(1)).status, VoterStatus::Pending);
        assert!(ballot.proposals().iter().all(|p| p.vote_count.is_zero()));
        ballot.vote(&account(1), 2).unwrap();
    }

    #[test]
    fn test_accumulated_weight_is_cast() {
        let mut ballot = Ballot::with_text_labels(account(1), &["a", "b"]).unwrap();
        ballot
            .grant_rights(&account(1), &[account(2), account(3)])
            .unwrap();
        ballot.delegate(&account(2), &account(1)).unwrap();
        ballot.delegate(&account(3), &account(1)).unwrap();
        ballot.vote(&account(1), 0).unwrap();
        assert_eq!(ballot.proposals()[0].vote_count, Weight::new(3));
        assert!(ballot.is_conserved());
    }
}
