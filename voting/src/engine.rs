//! The ballot: one exclusively-owned registry plus the operations over it.
//!
//! Each mutating operation first builds a plan from read-only checks and then
//! commits it with infallible writes, so a rejected call leaves no trace.
//! Admission, delegation, voting and tallying are implemented in their own
//! modules as further `impl Ballot` blocks.

use crate::error::BallotError;
use crate::registry::{Proposal, ProposalIndex, Registry, Voter, VoterStatus};
use ballot_types::{AccountId, ProposalLabel, Weight};
use serde::{Deserialize, Serialize};

/// A single mutating request, as submitted by a caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    GrantRight { to: AccountId },
    Delegate { to: AccountId },
    Vote { proposal: ProposalIndex },
    Close,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GrantRight { .. } => "grant_right",
            Self::Delegate { .. } => "delegate",
            Self::Vote { .. } => "vote",
            Self::Close => "close",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ballot {
    pub(crate) registry: Registry,
}

impl Ballot {
    /// Open a ballot chaired by `chairperson` over the given proposals.
    ///
    /// The chairperson is admitted with weight 1. Labels may repeat.
    pub fn new(
        chairperson: AccountId,
        labels: impl IntoIterator<Item = ProposalLabel>,
    ) -> Result<Self, BallotError> {
        let proposals: Vec<Proposal> = labels.into_iter().map(Proposal::new).collect();
        if proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        tracing::info!(
            chairperson = %chairperson.short(),
            proposals = proposals.len(),
            "ballot opened"
        );
        Ok(Self {
            registry: Registry::new(chairperson, proposals),
        })
    }

    /// Like [`Ballot::new`], building each label from text of at most 32 bytes.
    pub fn with_text_labels<S: AsRef<str>>(
        chairperson: AccountId,
        labels: &[S],
    ) -> Result<Self, BallotError> {
        let labels = labels
            .iter()
            .map(|text| ProposalLabel::from_text(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(chairperson, labels)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn chairperson(&self) -> &AccountId {
        self.registry.chairperson()
    }

    pub fn voter(&self, account: &AccountId) -> Voter {
        self.registry.voter(account)
    }

    pub fn proposals(&self) -> &[Proposal] {
        self.registry.proposals()
    }

    pub fn is_closed(&self) -> bool {
        self.registry.is_closed()
    }

    /// Freeze the ballot: every later mutation fails with `BallotClosed`.
    pub fn close(&mut self, caller: &AccountId) -> Result<(), BallotError> {
        self.ensure_open()
            .and_then(|()| self.ensure_chairperson(caller))
            .map_err(|err| rejected("close", caller, err))?;
        self.registry.set_closed();
        tracing::info!(turnout = %self.turnout(), "ballot closed");
        Ok(())
    }

    /// Dispatch an [`Operation`] on behalf of `caller`.
    pub fn apply(&mut self, caller: &AccountId, op: &Operation) -> Result<(), BallotError> {
        match op {
            Operation::GrantRight { to } => self.grant_right(caller, to),
            Operation::Delegate { to } => self.delegate(caller, to),
            Operation::Vote { proposal } => self.vote(caller, *proposal),
            Operation::Close => self.close(caller),
        }
    }

    /// Weight conservation: everything granted is either still held by a
    /// pending voter or already counted on a proposal.
    pub fn is_conserved(&self) -> bool {
        let counted: u128 = self
            .registry
            .proposals()
            .iter()
            .map(|p| u128::from(p.vote_count.raw()))
            .sum();
        let pending: u128 = self
            .registry
            .voters()
            .filter(|(_, v)| v.status == VoterStatus::Pending)
            .map(|(_, v)| u128::from(v.weight.raw()))
            .sum();
        counted + pending == u128::from(self.registry.granted().raw())
    }

    pub(crate) fn ensure_open(&self) -> Result<(), BallotError> {
        if self.registry.is_closed() {
            return Err(BallotError::BallotClosed);
        }
        Ok(())
    }

    pub(crate) fn ensure_chairperson(&self, caller: &AccountId) -> Result<(), BallotError> {
        if caller != self.registry.chairperson() {
            return Err(BallotError::Unauthorized);
        }
        Ok(())
    }

    pub(crate) fn add_weight(current: Weight, extra: Weight) -> Result<Weight, BallotError> {
        current.checked_add(extra).ok_or(BallotError::Overflow)
    }
}

/// Log a rejected operation and hand the error back.
pub(crate) fn rejected(op: &'static str, caller: &AccountId, err: BallotError) -> BallotError {
    tracing::debug!(op, caller = %caller.short(), error = %err, "operation rejected");
    err
}
