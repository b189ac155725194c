//! Errors raised while constructing the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("proposal label is {len} bytes, at most {max} allowed")]
    LabelTooLong { len: usize, max: usize },

    #[error("invalid account identity: {0}")]
    InvalidAccount(String),
}
