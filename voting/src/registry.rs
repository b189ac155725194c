//! Voter and proposal storage.
//!
//! The registry only stores; every check lives in the components that mutate it
//! (admission, delegation, vote). Writes through the registry never fail.

use ballot_types::{AccountId, ProposalLabel, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a proposal in the ballot.
pub type ProposalIndex = usize;

/// Where a voter stands. Only `Pending` can transition, and only once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterStatus {
    /// Has neither voted nor delegated.
    #[default]
    Pending,
    /// Voted directly for a proposal.
    Voted(ProposalIndex),
    /// Handed its weight to another account (the immediate target, not the chain end).
    Delegated(AccountId),
}

/// A voter record. Unknown accounts read as the default: zero weight, pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub weight: Weight,
    pub status: VoterStatus,
}

impl Voter {
    /// True once the voter has voted or delegated. Never resets.
    pub fn has_voted(&self) -> bool {
        !matches!(self.status, VoterStatus::Pending)
    }

    pub fn chosen_proposal(&self) -> Option<ProposalIndex> {
        match self.status {
            VoterStatus::Voted(index) => Some(index),
            _ => None,
        }
    }

    pub fn delegate(&self) -> Option<AccountId> {
        match self.status {
            VoterStatus::Delegated(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        !self.weight.is_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub label: ProposalLabel,
    pub vote_count: Weight,
}

impl Proposal {
    pub fn new(label: ProposalLabel) -> Self {
        Self {
            label,
            vote_count: Weight::ZERO,
        }
    }
}

/// All state of one voting session.
#[derive(Clone, Debug)]
pub struct Registry {
    chairperson: AccountId,
    voters: HashMap<AccountId, Voter>,
    proposals: Vec<Proposal>,
    /// Total weight ever introduced by initialization and admission.
    granted: Weight,
    closed: bool,
}

impl Registry {
    /// Fresh registry: the chairperson starts with weight 1.
    pub(crate) fn new(chairperson: AccountId, proposals: Vec<Proposal>) -> Self {
        let mut voters = HashMap::new();
        voters.insert(
            chairperson,
            Voter {
                weight: Weight::ONE,
                status: VoterStatus::Pending,
            },
        );
        Self {
            chairperson,
            voters,
            proposals,
            granted: Weight::ONE,
            closed: false,
        }
    }

    /// Rebuild a registry from previously stored parts, unchecked.
    pub(crate) fn from_parts(
        chairperson: AccountId,
        voters: HashMap<AccountId, Voter>,
        proposals: Vec<Proposal>,
        granted: Weight,
        closed: bool,
    ) -> Self {
        Self {
            chairperson,
            voters,
            proposals,
            granted,
            closed,
        }
    }

    pub fn chairperson(&self) -> &AccountId {
        &self.chairperson
    }

    /// The voter record for an account, or the default record if never touched.
    pub fn voter(&self, account: &AccountId) -> Voter {
        self.voters.get(account).copied().unwrap_or_default()
    }

    pub(crate) fn voter_mut(&mut self, account: &AccountId) -> &mut Voter {
        self.voters.entry(*account).or_default()
    }

    /// Every stored voter record, in no particular order.
    pub fn voters(&self) -> impl Iterator<Item = (&AccountId, &Voter)> {
        self.voters.iter()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal(&self, index: ProposalIndex) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub(crate) fn proposal_mut(&mut self, index: ProposalIndex) -> Option<&mut Proposal> {
        self.proposals.get_mut(index)
    }

    pub fn granted(&self) -> Weight {
        self.granted
    }

    pub(crate) fn set_granted(&mut self, granted: Weight) {
        self.granted = granted;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn set_closed(&mut self) {
        self.closed = true;
    }
}
