//! Nullable authorizer: accept permits without checking signatures.

use ballot_forwarder::{Authorizer, ForwardError, PermitRequest};
use ballot_types::{AccountId, Timestamp};
use std::collections::HashSet;

/// Accepts every permit except those from payers it was told to reject.
///
/// Accepted requests are recorded. Because the forwarder stages work on
/// clones, a batch that aborts leaves no recorded requests behind.
#[derive(Clone, Debug, Default)]
pub struct NullAuthorizer {
    rejected: HashSet<AccountId>,
    accepted: Vec<PermitRequest>,
}

impl NullAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every permit from `payer` fail with `ForwardError::Rejected`.
    pub fn rejecting(mut self, payer: AccountId) -> Self {
        self.rejected.insert(payer);
        self
    }

    /// Requests accepted so far (for assertions).
    pub fn accepted(&self) -> &[PermitRequest] {
        &self.accepted
    }
}

impl Authorizer for NullAuthorizer {
    fn authorize(&mut self, request: &PermitRequest, _now: Timestamp) -> Result<(), ForwardError> {
        if self.rejected.contains(&request.owner) {
            return Err(ForwardError::Rejected(format!(
                "permit from {} refused",
                request.owner.short()
            )));
        }
        self.accepted.push(request.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "null-authorizer"
    }
}
