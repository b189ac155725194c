//! A ballot shared between concurrent submitters.
//!
//! Every operation runs under one mutex, so its checks and its writes form a
//! single critical section and submitters observe a total order of operations.

use crate::engine::{Ballot, Operation};
use crate::error::BallotError;
use crate::registry::ProposalIndex;
use crate::tally::TallyRow;
use ballot_types::{AccountId, ProposalLabel};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to one ballot.
#[derive(Clone)]
pub struct SharedBallot {
    inner: Arc<Mutex<Ballot>>,
}

impl SharedBallot {
    pub fn new(ballot: Ballot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ballot)),
        }
    }

    // A panic while holding the lock cannot leave partial writes, because
    // operations only write after all checks pass; the state stays usable.
    fn lock(&self) -> MutexGuard<'_, Ballot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn grant_right(&self, caller: &AccountId, target: &AccountId) -> Result<(), BallotError> {
        self.lock().grant_right(caller, target)
    }

    pub fn delegate(&self, caller: &AccountId, target: &AccountId) -> Result<(), BallotError> {
        self.lock().delegate(caller, target)
    }

    pub fn vote(&self, caller: &AccountId, proposal: ProposalIndex) -> Result<(), BallotError> {
        self.lock().vote(caller, proposal)
    }

    pub fn close(&self, caller: &AccountId) -> Result<(), BallotError> {
        self.lock().close(caller)
    }

    pub fn apply(&self, caller: &AccountId, op: &Operation) -> Result<(), BallotError> {
        self.lock().apply(caller, op)
    }

    pub fn winning_proposal(&self) -> ProposalIndex {
        self.lock().winning_proposal()
    }

    pub fn winner_label(&self) -> ProposalLabel {
        self.lock().winner_label()
    }

    pub fn tally(&self) -> Vec<TallyRow> {
        self.lock().tally()
    }

    /// Run a read-only query against a consistent view of the ballot.
    pub fn read<R>(&self, f: impl FnOnce(&Ballot) -> R) -> R {
        f(&self.lock())
    }
}
