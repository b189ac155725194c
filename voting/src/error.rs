use ballot_types::TypesError;
use thiserror::Error;

/// Why a ballot operation was rejected.
///
/// A rejected operation never leaves partial writes behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BallotError {
    #[error("caller is not the chairperson")]
    Unauthorized,

    #[error("caller has no voting weight")]
    NotEligible,

    #[error("account has already voted or delegated")]
    AlreadyVoted,

    #[error("account already holds voting weight")]
    AlreadyEligible,

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("delegation would form a cycle")]
    DelegationCycle,

    #[error("delegation chain ends at an account without voting weight")]
    NonVoterDelegate,

    #[error("proposal {index} out of range ({count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("a ballot needs at least one proposal")]
    NoProposals,

    #[error("ballot is closed")]
    BallotClosed,

    #[error("weight arithmetic overflowed")]
    Overflow,

    #[error("invalid proposal label: {0}")]
    Label(#[from] TypesError),

    #[error("snapshot rejected: {0}")]
    Snapshot(String),
}
