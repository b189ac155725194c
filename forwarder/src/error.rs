//! Forwarder errors.

use ballot_types::{Timestamp, TokenAmount};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForwardError {
    #[error("permit signature does not verify")]
    InvalidSignature,

    #[error("permit expired at {deadline}, now {now}")]
    Expired { deadline: Timestamp, now: Timestamp },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("token amount arithmetic overflowed")]
    Overflow,

    #[error("rejected by capability: {0}")]
    Rejected(String),

    #[error("record {index} failed: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<ForwardError>,
    },
}
