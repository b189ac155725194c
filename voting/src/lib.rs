//! Delegated voting engine.
//!
//! One chairperson opens a ballot over a fixed list of proposals and grants
//! voting rights. Voters either vote directly or delegate their weight to
//! another voter; delegation is transitive and may never form a cycle.
//! Every mutating operation is all-or-nothing: its checks are read-only and
//! its writes happen only after all of them pass.
//!
//! Key principle: weight is never created or destroyed after it is granted,
//! only moved along delegation edges or counted on a proposal.

mod admission;
mod delegation;
pub mod engine;
pub mod error;
pub mod registry;
pub mod shared;
pub mod snapshot;
pub mod tally;
mod vote;

pub use engine::{Ballot, Operation};
pub use error::BallotError;
pub use registry::{Proposal, ProposalIndex, Registry, Voter, VoterStatus};
pub use shared::SharedBallot;
pub use snapshot::BallotSnapshot;
pub use tally::TallyRow;
