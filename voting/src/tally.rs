//! Read-only tallying.

use crate::engine::Ballot;
use crate::registry::ProposalIndex;
use ballot_types::{ProposalLabel, Weight};
use serde::Serialize;

/// One line of a tally report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub index: ProposalIndex,
    pub label: String,
    pub vote_count: u64,
}

impl Ballot {
    /// Index of the proposal with the most votes.
    ///
    /// Ties go to the lowest index; if nothing has been counted this is 0.
    pub fn winning_proposal(&self) -> ProposalIndex {
        let mut winning = 0;
        let mut best = Weight::ZERO;
        for (index, proposal) in self.registry.proposals().iter().enumerate() {
            if proposal.vote_count > best {
                best = proposal.vote_count;
                winning = index;
            }
        }
        winning
    }

    /// Label of [`Ballot::winning_proposal`].
    pub fn winner_label(&self) -> ProposalLabel {
        // A ballot always holds at least one proposal.
        self.registry.proposals()[self.winning_proposal()].label
    }

    /// Per-proposal counts in proposal order.
    pub fn tally(&self) -> Vec<TallyRow> {
        self.registry
            .proposals()
            .iter()
            .enumerate()
            .map(|(index, proposal)| TallyRow {
                index,
                label: proposal.label.text(),
                vote_count: proposal.vote_count.raw(),
            })
            .collect()
    }

    /// Total weight counted across all proposals.
    pub fn turnout(&self) -> Weight {
        self.registry
            .proposals()
            .iter()
            .map(|proposal| proposal.vote_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::Ballot;
    use ballot_types::{AccountId, Weight};

    fn account(n: u8) -> AccountId {
        AccountId::new([n; 32])
    }

    /// Build a ballot whose proposals end up with exactly `counts` votes.
    fn ballot_with_counts(counts: &[u64]) -> Ballot {
        let labels: Vec<String> = (0..counts.len()).map(|i| format!("p{i}")).collect();
        let mut ballot = Ballot::with_text_labels(account(0), &labels).unwrap();
        let mut next = 1u8;
        for (index, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                ballot.grant_right(&account(0), &account(next)).unwrap();
                ballot.vote(&account(next), index).unwrap();
                next += 1;
            }
        }
        ballot
    }

    #[test]
    fn test_all_zero_winner_is_first() {
        let ballot = ballot_with_counts(&[0, 0, 0]);
        assert_eq!(ballot.winning_proposal(), 0);
        assert_eq!(ballot.winner_label().text(), "p0");
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let ballot = ballot_with_counts(&[5, 5, 3]);
        assert_eq!(ballot.winning_proposal(), 0);
    }

    #[test]
    fn test_later_tie_does_not_displace_earlier_leader() {
        let ballot = ballot_with_counts(&[1, 4, 2, 4]);
        assert_eq!(ballot.winning_proposal(), 1);
        assert_eq!(ballot.winner_label().text(), "p1");
    }

    #[test]
    fn test_strict_maximum_wins() {
        let ballot = ballot_with_counts(&[2, 1, 3]);
        assert_eq!(ballot.winning_proposal(), 2);
    }

    #[test]
    fn test_tally_rows_and_turnout() {
        let ballot = ballot_with_counts(&[2, 0, 1]);
        let rows = ballot.tally();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "p0");
        assert_eq!(rows[0].vote_count, 2);
        assert_eq!(rows[2].vote_count, 1);
        assert_eq!(ballot.turnout(), Weight::new(3));
    }

    #[test]
    fn test_tally_is_repeatable() {
        let ballot = ballot_with_counts(&[3, 3]);
        assert_eq!(ballot.winning_proposal(), ballot.winning_proposal());
        assert_eq!(ballot.tally(), ballot.tally());
    }
}
