//! Persisting a ballot as bytes and restoring it.
//!
//! Restored state is untrusted: it is checked for the same invariants the
//! operations maintain before a [`Ballot`] is handed back.

use crate::engine::Ballot;
use crate::error::BallotError;
use crate::registry::{Proposal, Registry, Voter, VoterStatus};
use ballot_types::{AccountId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable form of a ballot's registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub chairperson: AccountId,
    pub proposals: Vec<Proposal>,
    /// Voter records sorted by account, so equal ballots encode identically.
    pub voters: Vec<(AccountId, Voter)>,
    pub granted: Weight,
    pub closed: bool,
}

impl Ballot {
    pub fn snapshot(&self) -> BallotSnapshot {
        let registry = &self.registry;
        let mut voters: Vec<(AccountId, Voter)> =
            registry.voters().map(|(id, voter)| (*id, *voter)).collect();
        voters.sort_by(|a, b| a.0.cmp(&b.0));
        BallotSnapshot {
            chairperson: *registry.chairperson(),
            proposals: registry.proposals().to_vec(),
            voters,
            granted: registry.granted(),
            closed: registry.is_closed(),
        }
    }

    /// Serialize the ballot to bytes (bincode).
    pub fn save_state(&self) -> Result<Vec<u8>, BallotError> {
        bincode::serialize(&self.snapshot()).map_err(|e| BallotError::Snapshot(e.to_string()))
    }

    /// Restore a ballot from bytes produced by [`Ballot::save_state`].
    pub fn load_state(data: &[u8]) -> Result<Self, BallotError> {
        let snapshot: BallotSnapshot =
            bincode::deserialize(data).map_err(|e| BallotError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Rebuild a ballot from a snapshot, rejecting inconsistent state.
    pub fn from_snapshot(snapshot: BallotSnapshot) -> Result<Self, BallotError> {
        let voter_count = snapshot.voters.len();
        let voters: HashMap<AccountId, Voter> = snapshot.voters.into_iter().collect();
        if voters.len() != voter_count {
            return Err(invalid("duplicate voter records".to_string()));
        }
        let ballot = Self {
            registry: Registry::from_parts(
                snapshot.chairperson,
                voters,
                snapshot.proposals,
                snapshot.granted,
                snapshot.closed,
            ),
        };
        ballot.validate()?;
        Ok(ballot)
    }

    fn validate(&self) -> Result<(), BallotError> {
        let registry = &self.registry;
        let count = registry.proposals().len();
        if count == 0 {
            return Err(invalid("no proposals".to_string()));
        }
        for (account, voter) in registry.voters() {
            match voter.status {
                VoterStatus::Voted(index) if index >= count => {
                    return Err(invalid(format!(
                        "{} voted for proposal {index} of {count}",
                        account.short()
                    )));
                }
                VoterStatus::Delegated(target) if target == *account => {
                    return Err(invalid(format!("{} delegates to itself", account.short())));
                }
                VoterStatus::Delegated(_) if self.resolve_delegate(account).is_err() => {
                    return Err(invalid(format!(
                        "delegation chain from {} does not terminate",
                        account.short()
                    )));
                }
                _ => {}
            }
        }
        if !self.is_conserved() {
            return Err(invalid("vote weight is not conserved".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> BallotError {
    tracing::warn!(%reason, "rejecting ballot snapshot");
    BallotError::Snapshot(reason)
}
